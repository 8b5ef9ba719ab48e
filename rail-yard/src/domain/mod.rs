//! Domain types for the rail yard.
//!
//! Carriages, trains, routes and stations, with the rules that govern
//! them. All types enforce their invariants at construction time and on
//! every mutation; a failed operation leaves the value untouched.

mod carriage;
mod error;
mod identifier;
mod kind;
mod route;
mod station;
mod train;

pub use carriage::{Carriage, Load};
pub use error::{ErrorKind, YardError};
pub use identifier::{
    CarriageNumber, DEFAULT_MAX_NAME_LEN, InvalidIdentifier, MAX_NUMBER_LEN, MIN_NUMBER_LEN,
    RouteNumber, StationName, TrainNumber,
};
pub use kind::Kind;
pub use route::Route;
pub use station::{Presence, Station};
pub use train::{Direction, Train, TrainState};
