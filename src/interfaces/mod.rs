//! Adapters between external file formats and the domain.

pub mod csv;
