//! Trains: composition, speed, and route-following state.

use std::fmt;

use super::{Carriage, CarriageNumber, Kind, Route, RouteNumber, StationName, TrainNumber, YardError};

/// Direction of travel along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the last station.
    Forward,
    /// Towards the first station.
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}

/// Whether the train's composition may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainState {
    /// Speed is zero: carriages may be coupled and uncoupled.
    Idle,
    /// Speed is positive: composition is frozen.
    Moving,
}

/// A train's binding to a route: which route, and which stop it is at.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteBinding {
    route: RouteNumber,
    position: usize,
}

/// A train of one [`Kind`].
///
/// The train records the numbers of its carriages in coupling order and the
/// number of the route it follows. The carriages and route themselves are
/// owned by the yard and handed in when an operation needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    number: TrainNumber,
    kind: Kind,
    carriages: Vec<CarriageNumber>,
    speed: u32,
    binding: Option<RouteBinding>,
}

impl Train {
    /// Create an empty, stationary train with no route.
    pub fn new(number: &str, kind: Kind) -> Result<Self, YardError> {
        Ok(Self {
            number: TrainNumber::parse(number)?,
            kind,
            carriages: Vec::new(),
            speed: 0,
            binding: None,
        })
    }

    pub fn cargo(number: &str) -> Result<Self, YardError> {
        Self::new(number, Kind::Cargo)
    }

    pub fn passenger(number: &str) -> Result<Self, YardError> {
        Self::new(number, Kind::Passenger)
    }

    pub fn number(&self) -> &TrainNumber {
        &self.number
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Carriage numbers in coupling order.
    pub fn carriages(&self) -> &[CarriageNumber] {
        &self.carriages
    }

    pub fn carriage_count(&self) -> usize {
        self.carriages.len()
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn state(&self) -> TrainState {
        if self.speed == 0 {
            TrainState::Idle
        } else {
            TrainState::Moving
        }
    }

    pub fn increase_speed_by(&mut self, delta: u32) {
        self.speed = self.speed.saturating_add(delta);
    }

    /// Slow down; speed never drops below zero.
    pub fn decrease_speed_by(&mut self, delta: u32) {
        self.speed = self.speed.saturating_sub(delta);
    }

    pub fn stop(&mut self) {
        self.speed = 0;
    }

    /// Couple a carriage at the end of the train.
    pub fn add_carriage(&mut self, carriage: &Carriage) -> Result<(), YardError> {
        self.ensure_idle("add carriages")?;
        if carriage.kind() != self.kind {
            return Err(YardError::KindMismatch {
                subject: format!("train {}", self.number),
                expected: self.kind,
                found: carriage.kind(),
            });
        }
        self.carriages.push(carriage.number().clone());
        Ok(())
    }

    /// Uncouple a carriage by number, keeping the others in order.
    pub fn remove_carriage(&mut self, number: &str) -> Result<CarriageNumber, YardError> {
        self.ensure_idle("remove carriages")?;
        let index = self
            .carriages
            .iter()
            .position(|c| c.as_str() == number)
            .ok_or_else(|| {
                YardError::not_found("carriage on train", format!("{number} on {}", self.number))
            })?;
        Ok(self.carriages.remove(index))
    }

    /// Bind the train to `route`, placing it at the first station.
    ///
    /// Replaces any previous binding, whatever the current speed.
    pub fn define_route(&mut self, route: &Route) {
        self.binding = Some(RouteBinding {
            route: route.number().clone(),
            position: 0,
        });
    }

    /// Number of the route the train follows, if any.
    pub fn route(&self) -> Option<&RouteNumber> {
        self.binding.as_ref().map(|b| &b.route)
    }

    /// Index of the current stop on the bound route, if any.
    pub fn position(&self) -> Option<usize> {
        self.binding.as_ref().map(|b| b.position)
    }

    /// Position on `route`, which must be the route the train is bound to.
    fn position_on(&self, route: &Route) -> Result<usize, YardError> {
        let binding = self
            .binding
            .as_ref()
            .ok_or_else(|| YardError::state(format!("train {} has no route", self.number)))?;
        if &binding.route != route.number() {
            return Err(YardError::state(format!(
                "train {} follows route {}, not {}",
                self.number,
                binding.route,
                route.number()
            )));
        }
        Ok(binding.position)
    }

    /// Where one step in `direction` would take the train, without moving it.
    pub fn next_position(&self, route: &Route, direction: Direction) -> Result<usize, YardError> {
        let position = self.position_on(route)?;
        let next = match direction {
            Direction::Forward => position.checked_add(1).filter(|&p| p < route.len()),
            Direction::Backward => position.checked_sub(1),
        };
        next.ok_or_else(|| YardError::Boundary {
            train: self.number.to_string(),
            direction,
            station: route
                .station_at(position)
                .map(|s| s.to_string())
                .unwrap_or_default(),
        })
    }

    /// Move one stop along the route.
    ///
    /// Station membership is not touched here; the yard detaches the train
    /// from its old station and attaches it to the new one.
    pub fn advance(&mut self, route: &Route, direction: Direction) -> Result<(), YardError> {
        let next = self.next_position(route, direction)?;
        if let Some(binding) = self.binding.as_mut() {
            binding.position = next;
        }
        Ok(())
    }

    /// Name of the station the train is at.
    pub fn current_station_name<'r>(&self, route: &'r Route) -> Result<&'r StationName, YardError> {
        let position = self.position_on(route)?;
        route.station_at(position).ok_or_else(|| {
            YardError::state(format!(
                "train {} is past the end of route {}",
                self.number,
                route.number()
            ))
        })
    }

    /// The next stop forward, or `None` at the last station.
    pub fn next_station_name<'r>(
        &self,
        route: &'r Route,
    ) -> Result<Option<&'r StationName>, YardError> {
        let position = self.position_on(route)?;
        Ok(route.station_at(position + 1))
    }

    /// The previous stop, or `None` at the first station.
    pub fn previous_station_name<'r>(
        &self,
        route: &'r Route,
    ) -> Result<Option<&'r StationName>, YardError> {
        let position = self.position_on(route)?;
        Ok(position.checked_sub(1).and_then(|p| route.station_at(p)))
    }

    /// Keep the train at the same station after one was inserted at `at`.
    pub(crate) fn station_inserted(&mut self, at: usize) {
        if let Some(binding) = self.binding.as_mut() {
            if binding.position >= at {
                binding.position += 1;
            }
        }
    }

    /// Keep the train at the same station after the one at `at` was removed.
    ///
    /// The caller guarantees the train was not standing at `at`.
    pub(crate) fn station_removed(&mut self, at: usize) {
        if let Some(binding) = self.binding.as_mut() {
            if binding.position > at {
                binding.position -= 1;
            }
        }
    }

    fn ensure_idle(&self, action: &str) -> Result<(), YardError> {
        match self.state() {
            TrainState::Idle => Ok(()),
            TrainState::Moving => Err(YardError::state(format!(
                "cannot {action} while train {} is moving at {}",
                self.number, self.speed
            ))),
        }
    }
}
