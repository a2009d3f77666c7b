//! Core domain types and validation for the IDM Personas loader.
//!
//! This crate is deliberately free of XML and I/O dependencies. It knows
//! what a persona record is and which attribute combinations are
//! acceptable; rendering lives in `idmp-xml`.

pub mod error;
pub mod persona;
pub mod validate;

pub use error::{Error, Result};
