//! Domain types: activity records, money, rates, aggregates and the
//! draw-instruction model of an invoice document.

pub mod activity;
pub mod adjustment;
pub mod aggregate;
pub mod document;
pub mod money;
pub mod month;
pub mod party;
pub mod ports;
pub mod rates;
pub mod summary;
