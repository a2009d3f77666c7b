//! Error types for `idmp-core`.

use thiserror::Error;

/// A persona record that violates the rules this loader enforces.
///
/// Every variant is a caller input error; none are transient. A record
/// is checked in full before any output is produced, so a failed build
/// never leaves a partial element behind.
#[derive(Debug, Error)]
pub enum Error {
  #[error("at least one of givenName or familyName must be non-empty")]
  MissingName,

  #[error(
    "at least an email address, phone number, or street address should be \
     included"
  )]
  NoContactMethod,

  #[error(
    "at least one email address, one phone number, or one street address \
     must be included"
  )]
  EmptyContactMethod,

  #[error("{field} exceeds {max} characters: {value:?}")]
  TooLong {
    field: &'static str,
    max:   usize,
    value: String,
  },

  #[error("sourceSystem is required when idAtSource is given: {id_at_source:?}")]
  MissingSourceSystem { id_at_source: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
