//! Routes: ordered station sequences with fixed endpoints.

use super::{RouteNumber, StationName, YardError};

/// An ordered sequence of station names a train follows.
///
/// A route always has at least two stations. The first and last are fixed
/// when the route is created; interior stations can be added and removed.
/// The same station may appear more than once among the interior stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    number: RouteNumber,
    stations: Vec<StationName>,
}

impl Route {
    /// Create a route running from `first` to `last`.
    pub fn new(number: RouteNumber, first: StationName, last: StationName) -> Self {
        Self {
            number,
            stations: vec![first, last],
        }
    }

    /// Create a route from a full station sequence.
    ///
    /// Fails if fewer than two stations are given.
    pub fn with_stations(
        number: RouteNumber,
        stations: Vec<StationName>,
    ) -> Result<Self, YardError> {
        if stations.len() < 2 {
            return Err(YardError::Validation(format!(
                "route {number} needs at least two stations, got {}",
                stations.len()
            )));
        }
        Ok(Self { number, stations })
    }

    pub fn number(&self) -> &RouteNumber {
        &self.number
    }

    /// All stations in travel order.
    pub fn stations(&self) -> &[StationName] {
        &self.stations
    }

    pub fn first(&self) -> &StationName {
        &self.stations[0]
    }

    pub fn last(&self) -> &StationName {
        &self.stations[self.stations.len() - 1]
    }

    /// Number of stations, endpoints included. Always at least 2.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Never true: a route has at least two stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn station_at(&self, index: usize) -> Option<&StationName> {
        self.stations.get(index)
    }

    /// Does the route call at this station anywhere?
    pub fn calls_at(&self, name: &str) -> bool {
        self.stations.iter().any(|s| s.as_str() == name)
    }

    /// Insert `name` immediately before the last station.
    ///
    /// Returns the index the station was inserted at.
    pub fn add_interior_station(&mut self, name: StationName) -> usize {
        let at = self.stations.len() - 1;
        self.stations.insert(at, name);
        at
    }

    /// Index of the first interior occurrence of `name`.
    ///
    /// A name matching the first or last station is always refused with
    /// [`YardError::ProtectedEndpoint`], even when it also appears in between.
    pub fn interior_index_of(&self, name: &str) -> Result<usize, YardError> {
        if self.first().as_str() == name || self.last().as_str() == name {
            return Err(YardError::ProtectedEndpoint {
                route: self.number.to_string(),
                station: name.to_string(),
            });
        }
        let interior = 1..self.stations.len() - 1;
        self.stations[interior.clone()]
            .iter()
            .position(|s| s.as_str() == name)
            .map(|offset| interior.start + offset)
            .ok_or_else(|| YardError::not_found("station on route", name))
    }

    /// Remove the first interior occurrence of `name`.
    ///
    /// Returns the index the station was removed from.
    pub fn remove_interior_station(&mut self, name: &str) -> Result<usize, YardError> {
        let at = self.interior_index_of(name)?;
        self.stations.remove(at);
        Ok(at)
    }
}
