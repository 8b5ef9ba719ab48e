//! Carriages and their capacity ledger.

use super::{CarriageNumber, Kind, YardError};

/// What a carriage holds and how much of it is taken.
///
/// `taken` never exceeds the capacity, and never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Load {
    /// Volume-based ledger for goods.
    Cargo { max_volume: u32, taken_volume: u32 },
    /// Seat-based ledger for people.
    Passenger { total_seats: u32, taken_seats: u32 },
}

impl Load {
    pub fn kind(&self) -> Kind {
        match self {
            Load::Cargo { .. } => Kind::Cargo,
            Load::Passenger { .. } => Kind::Passenger,
        }
    }

    /// Unit name used in messages and listings.
    pub fn unit(&self) -> &'static str {
        match self {
            Load::Cargo { .. } => "volume",
            Load::Passenger { .. } => "seats",
        }
    }
}

/// A single carriage: identity plus a capacity ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carriage {
    number: CarriageNumber,
    load: Load,
}

impl Carriage {
    /// Create an empty cargo carriage.
    ///
    /// Fails if the number is malformed or `max_volume` is zero.
    pub fn cargo(number: &str, max_volume: u32) -> Result<Self, YardError> {
        let number = CarriageNumber::parse(number)?;
        if max_volume == 0 {
            return Err(YardError::Validation(
                "maximum volume must be positive".to_string(),
            ));
        }
        Ok(Self {
            number,
            load: Load::Cargo {
                max_volume,
                taken_volume: 0,
            },
        })
    }

    /// Create an empty passenger carriage.
    ///
    /// Fails if the number is malformed or `total_seats` is zero.
    pub fn passenger(number: &str, total_seats: u32) -> Result<Self, YardError> {
        let number = CarriageNumber::parse(number)?;
        if total_seats == 0 {
            return Err(YardError::Validation(
                "number of seats must be positive".to_string(),
            ));
        }
        Ok(Self {
            number,
            load: Load::Passenger {
                total_seats,
                taken_seats: 0,
            },
        })
    }

    pub fn number(&self) -> &CarriageNumber {
        &self.number
    }

    pub fn kind(&self) -> Kind {
        self.load.kind()
    }

    pub fn load(&self) -> &Load {
        &self.load
    }

    /// Total capacity: maximum volume or number of seats.
    pub fn capacity(&self) -> u32 {
        match self.load {
            Load::Cargo { max_volume, .. } => max_volume,
            Load::Passenger { total_seats, .. } => total_seats,
        }
    }

    /// Capacity already taken.
    pub fn occupied(&self) -> u32 {
        match self.load {
            Load::Cargo { taken_volume, .. } => taken_volume,
            Load::Passenger { taken_seats, .. } => taken_seats,
        }
    }

    /// Capacity still available.
    pub fn free(&self) -> u32 {
        self.capacity() - self.occupied()
    }

    /// Load `volume` units of cargo.
    ///
    /// Fails with a capacity error if the load would overflow the carriage,
    /// leaving the ledger unchanged.
    pub fn place_cargo(&mut self, volume: u32) -> Result<(), YardError> {
        if self.kind() != Kind::Cargo {
            return Err(self.kind_mismatch(Kind::Cargo));
        }
        let free = self.free();
        if volume > free {
            return Err(YardError::Capacity {
                carriage: self.number.to_string(),
                unit: "volume",
                requested: volume,
                free,
            });
        }
        if let Load::Cargo { taken_volume, .. } = &mut self.load {
            *taken_volume += volume;
        }
        Ok(())
    }

    /// Take exactly one seat.
    pub fn take_seat(&mut self) -> Result<(), YardError> {
        if self.kind() != Kind::Passenger {
            return Err(self.kind_mismatch(Kind::Passenger));
        }
        let free = self.free();
        if free == 0 {
            return Err(YardError::Capacity {
                carriage: self.number.to_string(),
                unit: "seats",
                requested: 1,
                free,
            });
        }
        if let Load::Passenger { taken_seats, .. } = &mut self.load {
            *taken_seats += 1;
        }
        Ok(())
    }

    fn kind_mismatch(&self, wanted: Kind) -> YardError {
        YardError::KindMismatch {
            subject: format!("carriage {}", self.number),
            expected: self.kind(),
            found: wanted,
        }
    }
}
