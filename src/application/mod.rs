//! Use cases: loading sources, building invoice requests, laying out
//! documents and converting exports.

pub mod converter;
pub mod invoice;
pub mod layout;
pub mod loader;
pub mod settings;
