//! Conversion factors from common units to the atomic units used internally.
//!
//! Multiply a value expressed in the named unit by the constant to obtain atomic units,
//! divide to convert back.

/// One angstrom in bohr.
pub const ANGSTROM: f64 = 1.0 / 0.529_177_210_903;

/// One nanometer in bohr.
pub const NANOMETER: f64 = 10.0 * ANGSTROM;

/// One kcal/mol in hartree.
pub const KCALMOL: f64 = 1.0 / 627.509_474_277_194_1;

/// One kJ/mol in hartree.
pub const KJMOL: f64 = KCALMOL / 4.184;

/// One electronvolt in hartree.
pub const ELECTRONVOLT: f64 = 1.0 / 27.211_386_245_988;
