use crate::core::models::topology::BondGraph;
use serde::Deserialize;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScalingError {
    #[error("Scaling factor for the {band} band must lie in [0, 1], got {value}")]
    InvalidScale { band: ScalingBand, value: f64 },
}

/// Topological distance class of a near-bonded pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalingBand {
    OneTwo,
    OneThree,
    OneFour,
}

impl ScalingBand {
    fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(Self::OneTwo),
            2 => Some(Self::OneThree),
            3 => Some(Self::OneFour),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScalingBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::OneTwo => "1-2",
            Self::OneThree => "1-3",
            Self::OneFour => "1-4",
        };
        write!(f, "{label}")
    }
}

/// Scale factors applied to 1-2, 1-3 and 1-4 pairs. Defaults exclude 1-2 and 1-3 pairs
/// and leave 1-4 pairs at full strength.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    pub scale_12: f64,
    pub scale_13: f64,
    pub scale_14: f64,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            scale_12: 0.0,
            scale_13: 0.0,
            scale_14: 1.0,
        }
    }
}

impl ScalingConfig {
    pub fn new(scale_12: f64, scale_13: f64, scale_14: f64) -> Self {
        Self {
            scale_12,
            scale_13,
            scale_14,
        }
    }

    pub fn scale(&self, band: ScalingBand) -> f64 {
        match band {
            ScalingBand::OneTwo => self.scale_12,
            ScalingBand::OneThree => self.scale_13,
            ScalingBand::OneFour => self.scale_14,
        }
    }

    pub fn validate(&self) -> Result<(), ScalingError> {
        for band in [ScalingBand::OneTwo, ScalingBand::OneThree, ScalingBand::OneFour] {
            let value = self.scale(band);
            if !(0.0..=1.0).contains(&value) {
                return Err(ScalingError::InvalidScale { band, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingEntry {
    pub neighbor: usize,
    pub band: ScalingBand,
    pub scale: f64,
}

/// Per-particle table of near-bonded neighbors and their scale factors.
///
/// Bands are assigned by breadth-first search over the bond graph, so a pair that is
/// reachable along paths of several lengths (rings) always takes the band of its shortest
/// path. The table is symmetric: `j` appears in the entries of `i` and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalings {
    config: ScalingConfig,
    entries: Vec<Vec<ScalingEntry>>,
}

impl Scalings {
    pub fn build(graph: &BondGraph, config: ScalingConfig) -> Result<Self, ScalingError> {
        config.validate()?;
        let natom = graph.natom();

        let mut entries = Vec::with_capacity(natom);
        let mut depth = vec![usize::MAX; natom];
        let mut queue = VecDeque::new();
        let mut visited = Vec::new();

        for source in 0..natom {
            depth[source] = 0;
            visited.push(source);
            queue.push_back(source);

            let mut list = Vec::new();
            while let Some(current) = queue.pop_front() {
                let next_depth = depth[current] + 1;
                let Some(band) = ScalingBand::from_depth(next_depth) else {
                    continue;
                };
                for &neighbor in graph.neighbors(current) {
                    if depth[neighbor] != usize::MAX {
                        continue;
                    }
                    depth[neighbor] = next_depth;
                    visited.push(neighbor);
                    queue.push_back(neighbor);
                    list.push(ScalingEntry {
                        neighbor,
                        band,
                        scale: config.scale(band),
                    });
                }
            }
            list.sort_unstable_by_key(|entry| entry.neighbor);
            entries.push(list);

            for index in visited.drain(..) {
                depth[index] = usize::MAX;
            }
        }

        Ok(Self { config, entries })
    }

    pub fn config(&self) -> &ScalingConfig {
        &self.config
    }

    /// Number of particles covered by the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self, index: usize) -> &[ScalingEntry] {
        self.entries.get(index).map_or(&[], Vec::as_slice)
    }

    fn entry(&self, i: usize, j: usize) -> Option<&ScalingEntry> {
        let list = self.entries(i);
        list.binary_search_by_key(&j, |entry| entry.neighbor)
            .ok()
            .map(|pos| &list[pos])
    }

    pub fn band(&self, i: usize, j: usize) -> Option<ScalingBand> {
        self.entry(i, j).map(|entry| entry.band)
    }

    /// Scale factor for the pair `(i, j)`; 1.0 for pairs beyond 1-4 and for `i == j`.
    pub fn lookup(&self, i: usize, j: usize) -> f64 {
        self.entry(i, j).map_or(1.0, |entry| entry.scale)
    }
}
