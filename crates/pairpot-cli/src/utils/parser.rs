use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid supercell '{0}'. Expected three positive integers such as '2x2x1'.")]
    InvalidSupercell(String),

    #[error("Invalid period '{0}'. Expected 'index=value' with a positive value (e.g., '0=6.283185').")]
    InvalidPeriod(String),
}

pub fn parse_supercell(s: &str) -> Result<[usize; 3], ParseError> {
    let invalid = || ParseError::InvalidSupercell(s.to_string());
    let reps = s
        .split(['x', 'X', ','])
        .map(|part| part.trim().parse::<usize>().ok().filter(|&n| n > 0))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;
    reps.try_into().map_err(|_| invalid())
}

pub fn parse_period(s: &str) -> Result<(usize, f64), ParseError> {
    let invalid = || ParseError::InvalidPeriod(s.to_string());
    let (index, value) = s.split_once('=').ok_or_else(invalid)?;
    let index = index.trim().parse::<usize>().map_err(|_| invalid())?;
    let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
    if value.is_nan() || value <= 0.0 {
        return Err(invalid());
    }
    Ok((index, value))
}
