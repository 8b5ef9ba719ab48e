//! Rail yard model.
//!
//! Stations, routes, trains and carriages, with operations to compose
//! trains, put them on routes, move them between stations, and fill
//! carriages with passengers or cargo.

pub mod console;
pub mod domain;
pub mod yard;
