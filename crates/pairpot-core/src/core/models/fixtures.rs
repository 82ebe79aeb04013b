//! Reference systems shared by the unit tests.
//!
//! Coordinates are given in angstrom and converted to bohr on construction.

use super::atom::Particle;
use super::system::System;
use crate::core::geometry::cell::Cell;
use crate::core::units::ANGSTROM;
use nalgebra::Vector3;

fn build(
    numbers: &[u8],
    ffatypes: &[&str],
    positions: &[[f64; 3]],
    bonds: &[(usize, usize)],
    rvecs: &[[f64; 3]],
    charges: Option<&[f64]>,
) -> System {
    let particles = numbers
        .iter()
        .zip(ffatypes)
        .enumerate()
        .map(|(index, (&number, &ffatype))| {
            let particle = Particle::new(number, ffatype);
            match charges {
                Some(q) => particle.with_charge(q[index]),
                None => particle,
            }
        })
        .collect();
    let to_bohr = |v: &[f64; 3]| Vector3::new(v[0], v[1], v[2]) * ANGSTROM;
    let positions = positions.iter().map(to_bohr).collect();
    let rvecs: Vec<Vector3<f64>> = rvecs.iter().map(to_bohr).collect();
    let cell = Cell::new(&rvecs).expect("fixture cell is valid");
    System::new(particles, positions, bonds, cell).expect("fixture system is valid")
}

const WATER32_POSITIONS: [[f64; 3]; 96] = [
    [-4.583, 5.333, 1.56],
    [-3.777, 5.331, 0.943],
    [-5.081, 4.589, 1.176],
    [-0.083, 4.218, 0.07],
    [-0.431, 3.397, 0.609],
    [0.377, 3.756, -0.688],
    [-1.488, 2.692, 4.125],
    [-2.465, 2.433, 3.916],
    [-1.268, 2.145, 4.952],
    [-2.461, -2.548, -6.136],
    [-1.892, -2.241, -6.921],
    [-1.97, -3.321, -5.773],
    [4.032, 0.161, 2.183],
    [4.272, -0.052, 1.232],
    [4.044, -0.76, 2.641],
    [2.95, -3.497, -1.006],
    [2.599, -3.901, -0.129],
    [3.193, -4.283, -1.533],
    [-2.89, -4.797, -2.735],
    [-2.81, -5.706, -2.297],
    [-2.437, -4.128, -2.039],
    [-0.553, 0.922, -3.731],
    [-0.163, 1.552, -3.085],
    [-1.376, 0.544, -3.469],
    [4.179, 4.017, 4.278],
    [3.275, 3.832, 3.876],
    [4.658, 4.492, 3.572],
    [5.739, 1.425, 3.944],
    [5.125, 2.066, 4.346],
    [5.173, 1.181, 3.097],
    [0.988, -0.76, -5.445],
    [1.64, -1.372, -4.989],
    [0.546, -0.22, -4.762],
    [-0.748, 1.985, 1.249],
    [-0.001, 1.49, 1.54],
    [-1.16, 2.255, 2.109],
    [4.127, -0.234, -3.149],
    [5.022, -0.436, -3.428],
    [3.54, -0.918, -3.601],
    [-2.473, 2.768, -1.395],
    [-1.533, 2.719, -1.214],
    [-2.702, 1.808, -1.479],
    [-0.124, -2.116, 2.404],
    [0.612, -2.593, 2.01],
    [0.265, -1.498, 3.089],
    [0.728, 2.823, -2.19],
    [0.646, 3.694, -2.685],
    [1.688, 2.705, -1.947],
    [4.256, -5.427, -2.644],
    [5.222, -5.046, -2.479],
    [4.174, -5.628, -3.593],
    [-3.178, -0.508, -4.227],
    [-2.762, -1.221, -4.818],
    [-3.603, 0.073, -4.956],
    [-1.449, 5.3, -4.805],
    [-1.397, 4.47, -5.317],
    [-2.102, 5.091, -4.067],
    [3.354, 2.192, -1.755],
    [3.407, 1.433, -2.405],
    [3.971, 2.958, -2.196],
    [1.773, -4.018, 1.769],
    [1.121, -4.532, 1.201],
    [1.975, -4.529, 2.618],
    [1.526, 1.384, 2.712],
    [2.317, 1.07, 2.251],
    [1.353, 0.657, 3.364],
    [2.711, -2.398, -4.253],
    [2.202, -3.257, -4.12],
    [3.305, -2.61, -5.099],
    [6.933, 0.093, -1.393],
    [6.16, -0.137, -0.795],
    [6.748, -0.394, -2.229],
    [-5.605, -2.549, 3.151],
    [-4.756, -2.503, 3.616],
    [-5.473, -3.187, 2.378],
    [0.821, -4.406, 6.516],
    [0.847, -3.675, 7.225],
    [-0.014, -4.24, 5.988],
    [1.577, 3.933, 3.762],
    [1.221, 2.975, 3.64],
    [1.367, 4.126, 4.659],
    [-2.111, -3.741, -0.219],
    [-1.378, -4.425, -0.036],
    [-1.825, -2.775, 0.003],
    [0.926, -1.961, -2.063],
    [0.149, -1.821, -1.402],
    [1.725, -2.303, -1.536],
    [4.531, -1.03, -0.547],
    [4.29, -1.98, -0.581],
    [4.292, -0.597, -1.39],
    [-0.74, -1.262, -0.029],
    [-1.272, -0.422, -0.099],
    [-0.403, -1.349, 0.873],
    [3.655, 3.021, 0.988],
    [2.706, 3.053, 1.282],
    [3.542, 2.615, 0.02],
];

/// A single water molecule without periodicity (TIP3P-like charges).
pub fn water() -> System {
    build(
        &[8, 1, 1],
        &["O", "H", "H"],
        &WATER32_POSITIONS[..3],
        &[(0, 1), (0, 2)],
        &[],
        Some(&[-0.834, 0.417, 0.417]),
    )
}

/// 32 water molecules in a cubic box with an edge of 9.865 angstrom.
pub fn water32() -> System {
    let numbers: Vec<u8> = (0..96).map(|i| if i % 3 == 0 { 8 } else { 1 }).collect();
    let ffatypes: Vec<&str> = (0..96)
        .map(|i| if i % 3 == 0 { "O" } else { "H" })
        .collect();
    let charges: Vec<f64> = (0..96)
        .map(|i| if i % 3 == 0 { -0.834 } else { 0.417 })
        .collect();
    let bonds: Vec<(usize, usize)> = (0..96usize)
        .filter(|i| i % 3 != 0)
        .map(|i| ((i / 3) * 3, i))
        .collect();
    build(
        &numbers,
        &ffatypes,
        &WATER32_POSITIONS,
        &bonds,
        &[[9.865, 0.0, 0.0], [0.0, 9.865, 0.0], [0.0, 0.0, 9.865]],
        Some(&charges),
    )
}

/// Caffeine in vacuum, without charges.
pub fn caffeine() -> System {
    build(
        &[8, 8, 7, 7, 7, 7, 6, 6, 6, 6, 6, 6, 6, 6, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        &[
            "O", "O", "N", "N", "N", "N", "C", "C", "C", "C", "C", "C", "C", "C", "H", "H", "H",
            "H", "H", "H", "H", "H", "H", "H",
        ],
        &[
            [0.47, 2.5688, 0.0006],
            [-3.1271, -0.4436, -0.0003],
            [-0.9686, -1.3125, 0.0],
            [2.2182, 0.1412, -0.0003],
            [-1.3477, 1.0797, -0.0001],
            [1.4119, -1.9372, 0.0002],
            [0.8579, 0.2592, -0.0008],
            [0.3897, -1.0264, -0.0004],
            [0.0307, 1.422, -0.0006],
            [-1.9061, -0.2495, -0.0004],
            [2.5032, -1.1998, 0.0003],
            [-1.4276, -2.696, 0.0008],
            [3.1926, 1.2061, 0.0003],
            [-2.2969, 2.1881, 0.0007],
            [3.5163, -1.5787, 0.0008],
            [-1.0451, -3.1973, -0.8937],
            [-2.5186, -2.7596, 0.0011],
            [-1.0447, -3.1963, 0.8957],
            [4.1992, 0.7801, 0.0002],
            [3.0468, 1.8092, -0.8992],
            [3.0466, 1.8083, 0.9004],
            [-1.8087, 3.1651, -0.0003],
            [-2.9322, 2.1027, 0.8881],
            [-2.9346, 2.1021, -0.8849],
        ],
        &[
            (0, 8), (1, 9), (2, 7), (9, 2), (2, 11), (3, 6), (10, 3), (3, 12), (8, 4), (9, 4),
            (4, 13), (5, 7), (10, 5), (6, 7), (8, 6), (10, 14), (11, 15), (16, 11), (17, 11),
            (18, 12), (19, 12), (20, 12), (13, 21), (13, 22), (13, 23),
        ],
        &[],
        None,
    )
}

/// Alpha quartz in a triclinic (hexagonal) cell.
pub fn quartz() -> System {
    build(
        &[14, 14, 14, 8, 8, 8, 8, 8, 8],
        &["Si", "Si", "Si", "O", "O", "O", "O", "O", "O"],
        &[
            [1.999357437, -1.154329699, -1.801733563],
            [0.0, 2.308659399, 1.801733563],
            [-1.999357437, -1.154329699, 0.0],
            [1.762048976, 0.299963042, -1.159593954],
            [-1.140800226, 1.375997798, 2.443872642],
            [-0.621248751, -1.675960841, 0.642139609],
            [0.621248751, -1.675960841, -2.443872642],
            [-1.762048976, 0.299963042, -0.642139609],
            [1.140800226, 1.375997798, 1.159593954],
        ],
        &[
            (2, 8), (1, 8), (2, 7), (0, 7), (1, 6), (0, 6), (2, 5), (1, 5), (1, 4), (0, 4), (2,
        3), (0, 3),
        ],
        &[
            [0.0, 0.0, 5.405222],
            [0.0, 4.913416, 0.0],
            [-4.255154, 2.456708, 0.0],
        ],
        Some(&[1.8, 1.8, 1.8, -0.9, -0.9, -0.9, -0.9, -0.9, -0.9]),
    )
}

/// A graphene sheet, periodic in two directions.
pub fn graphene8() -> System {
    build(
        &[6; 8],
        &["C"; 8],
        &[
            [2.465, 0.001, 0.0],
            [4.923, 1.423, 0.0],
            [3.697, 2.134, 0.0],
            [6.152, 3.557, 0.0],
            [1.237, 2.135, 0.0],
            [3.693, 3.556, 0.0],
            [0.003, 0.002, 0.0],
            [2.464, 1.426, 0.0],
        ],
        &[
            (0, 1), (1, 2), (1, 3), (3, 6), (4, 0), (2, 6), (2, 4), (7, 0), (7, 3), (5, 6), (5,
        4), (5, 7),
        ],
        &[[4.922, 0.0, 0.0], [2.462, 4.262, 0.0]],
        None,
    )
}

/// A polyethylene chain, periodic in one direction.
pub fn polyethylene4() -> System {
    build(
        &[6, 6, 6, 6, 1, 1, 1, 1, 1, 1, 1, 1],
        &["C", "C", "C", "C", "H", "H", "H", "H", "H", "H", "H", "H"],
        &[
            [4.4665, -0.2419, 0.0939],
            [3.1498, 0.5401, 0.0859],
            [1.9114, -0.3549, 0.0216],
            [0.632, 0.4677, 0.0288],
            [4.4927, -0.8901, 0.9785],
            [4.4935, -0.9016, -0.7825],
            [3.1442, 1.2221, -0.7735],
            [3.1012, 1.1657, 0.9858],
            [1.9051, -1.0408, 0.8766],
            [1.9429, -0.9675, -0.8867],
            [0.5566, 1.0682, 0.941],
            [0.5949, 1.1431, -0.8319],
        ],
        &[
            (3, 2), (10, 3), (11, 3), (1, 0), (2, 1), (4, 0), (5, 0), (6, 1), (7, 1), (8, 2),
            (9, 2), (3, 0),
        ],
        &[[5.075, 0.187, 0.055]],
        None,
    )
}

/// Conventional rock-salt cell of sodium chloride (lattice constant 5.64 angstrom).
pub fn nacl_cubic() -> System {
    let a = 5.64;
    let h = a / 2.0;
    build(
        &[11, 11, 11, 11, 17, 17, 17, 17],
        &["Na", "Na", "Na", "Na", "Cl", "Cl", "Cl", "Cl"],
        &[
            [0.0, 0.0, 0.0],
            [0.0, h, h],
            [h, 0.0, h],
            [h, h, 0.0],
            [h, 0.0, 0.0],
            [0.0, h, 0.0],
            [0.0, 0.0, h],
            [h, h, h],
        ],
        &[],
        &[[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]],
        Some(&[1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]),
    )
}
