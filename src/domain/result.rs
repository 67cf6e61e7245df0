//! Crate-wide result alias

use super::errors::AbacusError;

/// Result type used throughout Abacus
pub type Result<T> = std::result::Result<T, AbacusError>;
