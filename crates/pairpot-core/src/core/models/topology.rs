use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Bond ({i}, {j}) references a particle outside 0..{natom}")]
    IndexOutOfRange { i: usize, j: usize, natom: usize },
    #[error("Particle {0} cannot be bonded to itself")]
    SelfBond(usize),
}

/// An undirected bond, stored with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(a: usize, b: usize) -> Self {
        if a < b {
            Self { i: a, j: b }
        } else {
            Self { i: b, j: a }
        }
    }
}

/// Undirected bond graph over particle indices.
///
/// Duplicate bonds are collapsed. Neighbor lists are kept sorted so that graph
/// traversals visit particles in a reproducible order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondGraph {
    natom: usize,
    bonds: Vec<Bond>,
    adjacency: Vec<Vec<usize>>,
}

impl BondGraph {
    pub fn new(natom: usize, pairs: &[(usize, usize)]) -> Result<Self, TopologyError> {
        let mut bonds = Vec::with_capacity(pairs.len());
        for &(a, b) in pairs {
            if a >= natom || b >= natom {
                return Err(TopologyError::IndexOutOfRange { i: a, j: b, natom });
            }
            if a == b {
                return Err(TopologyError::SelfBond(a));
            }
            bonds.push(Bond::new(a, b));
        }
        bonds.sort_unstable();
        bonds.dedup();

        let mut adjacency = vec![Vec::new(); natom];
        for bond in &bonds {
            adjacency[bond.i].push(bond.j);
            adjacency[bond.j].push(bond.i);
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }

        Ok(Self {
            natom,
            bonds,
            adjacency,
        })
    }

    pub fn empty(natom: usize) -> Self {
        Self {
            natom,
            bonds: Vec::new(),
            adjacency: vec![Vec::new(); natom],
        }
    }

    pub fn natom(&self) -> usize {
        self.natom
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn are_bonded(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_new_orders_indices() {
        let bond = Bond::new(5, 2);
        assert_eq!(bond.i, 2);
        assert_eq!(bond.j, 5);
    }

    #[test]
    fn bond_graph_builds_symmetric_adjacency() {
        let graph = BondGraph::new(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(3), &[2]);
        assert!(graph.are_bonded(2, 1));
        assert!(!graph.are_bonded(0, 3));
    }

    #[test]
    fn bond_graph_collapses_duplicate_bonds() {
        let graph = BondGraph::new(3, &[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(graph.bonds().len(), 1);
        assert_eq!(graph.neighbors(0), &[1]);
    }

    #[test]
    fn bond_graph_rejects_out_of_range_index() {
        let err = BondGraph::new(2, &[(0, 2)]).unwrap_err();
        assert_eq!(
            err,
            TopologyError::IndexOutOfRange {
                i: 0,
                j: 2,
                natom: 2
            }
        );
    }

    #[test]
    fn bond_graph_rejects_self_bond() {
        assert_eq!(
            BondGraph::new(3, &[(1, 1)]).unwrap_err(),
            TopologyError::SelfBond(1)
        );
    }

    #[test]
    fn neighbors_of_unknown_index_is_empty() {
        let graph = BondGraph::empty(2);
        assert!(graph.neighbors(7).is_empty());
    }
}
