use thiserror::Error;

use crate::parse::ParseError;
use crate::ConfigurationError;

/// Unified error type covering parsing, validation, and I/O.
///
/// Returned by convenience methods like
/// [`Definitions::from_dsl()`](crate::Definitions::from_dsl) and
/// [`Definitions::from_file()`](crate::Definitions::from_file).
#[derive(Debug, Error)]
pub enum RulegridError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigurationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
