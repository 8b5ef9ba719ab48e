//! Rolling stock kind.

use std::fmt;

/// Whether a train or carriage carries goods or people.
///
/// A train only ever couples carriages of its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Cargo,
    Passenger,
}

impl Kind {
    /// Both kinds, in display order.
    pub const ALL: [Kind; 2] = [Kind::Cargo, Kind::Passenger];

    /// Lowercase label used in listings and generated identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Cargo => "cargo",
            Kind::Passenger => "passenger",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
