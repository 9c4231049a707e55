//! Domain layer for Clausewise
//!
//! Contains the analysis result model, analysis modes, risk classifications,
//! the decoded audio buffer, and domain errors.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
