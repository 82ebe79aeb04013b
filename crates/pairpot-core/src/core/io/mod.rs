//! Reading particle systems from disk.

pub mod system_file;
