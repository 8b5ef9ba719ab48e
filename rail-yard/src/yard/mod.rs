//! The yard: owner of every station, route, train and carriage.
//!
//! The yard resolves identifiers into entities and runs the multi-entity
//! protocols: placing a train on a route, moving it between stations
//! (detach, advance, attach), coupling carriages, and editing routes that
//! trains are already following. Each operation checks everything it
//! needs before mutating, so a failed call changes nothing.

mod config;
mod ids;
mod report;


use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::domain::{
    Carriage, CarriageNumber, Direction, Kind, Route, RouteNumber, Station, StationName, Train,
    TrainNumber, YardError,
};

pub use config::YardConfig;
pub use ids::{IdGenerator, IdKind, RandomIds, SequentialIds};
pub use report::{CarriageReport, RouteReport, StationReport, TrainReport, YardReport};

/// In-memory registry of the whole yard.
pub struct Yard {
    config: YardConfig,
    ids: Box<dyn IdGenerator>,
    stations: BTreeMap<StationName, Station>,
    routes: BTreeMap<RouteNumber, Route>,
    trains: BTreeMap<TrainNumber, Train>,
    carriages: BTreeMap<CarriageNumber, Carriage>,
    /// Which train each coupled carriage belongs to.
    couplings: HashMap<CarriageNumber, TrainNumber>,
}

impl Yard {
    /// Create an empty yard generating random identifiers.
    pub fn new(config: YardConfig) -> Self {
        let ids = match config.seed {
            Some(seed) => RandomIds::seeded(seed, config.id_suffix_len),
            None => RandomIds::new(config.id_suffix_len),
        };
        Self::with_id_generator(config, Box::new(ids))
    }

    /// Create an empty yard with a caller-supplied identifier source.
    pub fn with_id_generator(config: YardConfig, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            config,
            ids,
            stations: BTreeMap::new(),
            routes: BTreeMap::new(),
            trains: BTreeMap::new(),
            carriages: BTreeMap::new(),
            couplings: HashMap::new(),
        }
    }

    pub fn config(&self) -> &YardConfig {
        &self.config
    }

    // ---- creation ----

    /// Register a new station.
    pub fn new_station(&mut self, name: &str) -> Result<&Station, YardError> {
        let name = StationName::parse_with_limit(name, self.config.max_name_len)?;
        if self.stations.contains_key(&name) {
            return Err(duplicate("station", &name));
        }
        info!(station = %name, "station created");
        Ok(self
            .stations
            .entry(name.clone())
            .or_insert_with(|| Station::new(name)))
    }

    /// Register a new route between two existing stations.
    ///
    /// A number is generated when `number` is `None` or empty.
    pub fn new_route(
        &mut self,
        first: &str,
        last: &str,
        number: Option<&str>,
    ) -> Result<&Route, YardError> {
        let first = self.station(first)?.name().clone();
        let last = self.station(last)?.name().clone();
        let number = match number.filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None => fresh_id(
                self.ids.as_mut(),
                self.config.max_id_attempts,
                IdKind::Route,
                |id| self.routes.contains_key(id),
            )?,
        };
        let number = RouteNumber::parse_with_limit(&number, self.config.max_name_len)?;
        if self.routes.contains_key(&number) {
            return Err(duplicate("route", &number));
        }
        info!(route = %number, from = %first, to = %last, "route created");
        Ok(self
            .routes
            .entry(number.clone())
            .or_insert_with(|| Route::new(number, first, last)))
    }

    pub fn new_cargo_train(&mut self, number: Option<&str>) -> Result<&Train, YardError> {
        self.new_train(Kind::Cargo, number)
    }

    pub fn new_passenger_train(&mut self, number: Option<&str>) -> Result<&Train, YardError> {
        self.new_train(Kind::Passenger, number)
    }

    fn new_train(&mut self, kind: Kind, number: Option<&str>) -> Result<&Train, YardError> {
        let number = match number {
            Some(n) => n.to_string(),
            None => fresh_id(
                self.ids.as_mut(),
                self.config.max_id_attempts,
                IdKind::Train(kind),
                |id| self.trains.contains_key(id),
            )?,
        };
        let train = Train::new(&number, kind)?;
        if self.trains.contains_key(train.number()) {
            return Err(duplicate("train", train.number()));
        }
        info!(train = %train.number(), %kind, "train created");
        Ok(self.trains.entry(train.number().clone()).or_insert(train))
    }

    pub fn new_cargo_carriage(
        &mut self,
        number: Option<&str>,
        max_volume: u32,
    ) -> Result<&Carriage, YardError> {
        let number = self.carriage_number(Kind::Cargo, number)?;
        self.register_carriage(Carriage::cargo(&number, max_volume)?)
    }

    pub fn new_passenger_carriage(
        &mut self,
        number: Option<&str>,
        seats: u32,
    ) -> Result<&Carriage, YardError> {
        let number = self.carriage_number(Kind::Passenger, number)?;
        self.register_carriage(Carriage::passenger(&number, seats)?)
    }

    fn carriage_number(&mut self, kind: Kind, number: Option<&str>) -> Result<String, YardError> {
        match number {
            Some(n) => Ok(n.to_string()),
            None => fresh_id(
                self.ids.as_mut(),
                self.config.max_id_attempts,
                IdKind::Carriage(kind),
                |id| self.carriages.contains_key(id),
            ),
        }
    }

    fn register_carriage(&mut self, carriage: Carriage) -> Result<&Carriage, YardError> {
        if self.carriages.contains_key(carriage.number()) {
            return Err(duplicate("carriage", carriage.number()));
        }
        info!(
            carriage = %carriage.number(),
            kind = %carriage.kind(),
            capacity = carriage.capacity(),
            "carriage created"
        );
        Ok(self
            .carriages
            .entry(carriage.number().clone())
            .or_insert(carriage))
    }

    // ---- route editing ----

    /// Add an existing station to a route, just before its last station.
    ///
    /// Trains already on the route keep standing at the same station.
    pub fn add_station_to_route(&mut self, route: &str, station: &str) -> Result<(), YardError> {
        let name = self.station(station)?.name().clone();
        let route = self
            .routes
            .get_mut(route)
            .ok_or_else(|| YardError::not_found("route", route))?;
        let at = route.add_interior_station(name);
        for train in self
            .trains
            .values_mut()
            .filter(|t| t.route() == Some(route.number()))
        {
            train.station_inserted(at);
        }
        debug!(route = %route.number(), station, at, "station added to route");
        Ok(())
    }

    /// Remove an interior station from a route.
    ///
    /// Refused while a train on that route is standing at that stop.
    pub fn remove_station_from_route(
        &mut self,
        route: &str,
        station: &str,
    ) -> Result<(), YardError> {
        self.station(station)?;
        let route = self
            .routes
            .get_mut(route)
            .ok_or_else(|| YardError::not_found("route", route))?;
        if !route.calls_at(station) {
            return Err(YardError::not_found(
                "station on route",
                format!("{station} on {}", route.number()),
            ));
        }
        let at = route.interior_index_of(station)?;
        if let Some(blocking) = self
            .trains
            .values()
            .find(|t| t.route() == Some(route.number()) && t.position() == Some(at))
        {
            return Err(YardError::state(format!(
                "train {} is standing at {station} on route {}",
                blocking.number(),
                route.number()
            )));
        }
        route.remove_interior_station(station)?;
        for train in self
            .trains
            .values_mut()
            .filter(|t| t.route() == Some(route.number()))
        {
            train.station_removed(at);
        }
        debug!(route = %route.number(), station, at, "station removed from route");
        Ok(())
    }

    // ---- trains on routes ----

    /// Put a train on a route at its first station.
    ///
    /// A train already on a route leaves its current station first.
    pub fn assign_route(&mut self, train: &str, route: &str) -> Result<(), YardError> {
        let route = self
            .routes
            .get(route)
            .ok_or_else(|| YardError::not_found("route", route))?;
        let train = self
            .trains
            .get_mut(train)
            .ok_or_else(|| YardError::not_found("train", train))?;
        if !self.stations.contains_key(route.first()) {
            return Err(YardError::not_found("station", route.first().as_str()));
        }

        let departed = match train.route() {
            Some(old) => {
                let old = self
                    .routes
                    .get(old)
                    .ok_or_else(|| YardError::not_found("route", old.as_str()))?;
                let from = train.current_station_name(old)?;
                let station = self
                    .stations
                    .get_mut(from)
                    .ok_or_else(|| YardError::not_found("station", from.as_str()))?;
                station.send_train(train.number().as_str())?;
                Some(from.clone())
            }
            None => None,
        };

        train.define_route(route);
        if let Some(station) = self.stations.get_mut(route.first()) {
            station.train_arrived(train);
        }
        info!(
            train = %train.number(),
            route = %route.number(),
            station = %route.first(),
            departed = ?departed.as_ref().map(|s| s.as_str()),
            "train assigned to route"
        );
        Ok(())
    }

    /// Move a train one stop along its route.
    ///
    /// Runs the detach, advance, attach protocol and returns the station
    /// the train arrived at.
    pub fn move_train(
        &mut self,
        train: &str,
        direction: Direction,
    ) -> Result<&StationName, YardError> {
        let train = self
            .trains
            .get_mut(train)
            .ok_or_else(|| YardError::not_found("train", train))?;
        let route = train
            .route()
            .ok_or_else(|| YardError::state(format!("train {} has no route", train.number())))?;
        let route = self
            .routes
            .get(route)
            .ok_or_else(|| YardError::not_found("route", route.as_str()))?;

        let from = train.current_station_name(route)?;
        let to_index = train.next_position(route, direction)?;
        let to = route
            .station_at(to_index)
            .ok_or_else(|| YardError::state(format!("route {} changed mid-move", route.number())))?;
        if !self.stations.contains_key(to) {
            return Err(YardError::not_found("station", to.as_str()));
        }

        self.stations
            .get_mut(from)
            .ok_or_else(|| YardError::not_found("station", from.as_str()))?
            .send_train(train.number().as_str())?;
        train.advance(route, direction)?;
        if let Some(station) = self.stations.get_mut(to) {
            station.train_arrived(train);
        }
        info!(train = %train.number(), %direction, %from, %to, "train moved");
        Ok(to)
    }

    // ---- composition and speed ----

    /// Couple a carriage from the yard to the end of a train.
    pub fn attach_carriage(&mut self, train: &str, carriage: &str) -> Result<(), YardError> {
        let carriage = self
            .carriages
            .get(carriage)
            .ok_or_else(|| YardError::not_found("carriage", carriage))?;
        let train = self
            .trains
            .get_mut(train)
            .ok_or_else(|| YardError::not_found("train", train))?;
        if let Some(owner) = self.couplings.get(carriage.number()) {
            return Err(YardError::state(format!(
                "carriage {} is already coupled to train {owner}",
                carriage.number()
            )));
        }
        train.add_carriage(carriage)?;
        self.couplings
            .insert(carriage.number().clone(), train.number().clone());
        debug!(train = %train.number(), carriage = %carriage.number(), "carriage attached");
        Ok(())
    }

    /// Uncouple a carriage; it stays in the yard, free to be coupled again.
    pub fn detach_carriage(&mut self, train: &str, carriage: &str) -> Result<(), YardError> {
        let train = self
            .trains
            .get_mut(train)
            .ok_or_else(|| YardError::not_found("train", train))?;
        let removed = train.remove_carriage(carriage)?;
        self.couplings.remove(&removed);
        debug!(train = %train.number(), carriage = %removed, "carriage detached");
        Ok(())
    }

    pub fn accelerate(&mut self, train: &str, by: u32) -> Result<u32, YardError> {
        let train = self.train_mut(train)?;
        train.increase_speed_by(by);
        debug!(train = %train.number(), speed = train.speed(), "speed increased");
        Ok(train.speed())
    }

    pub fn brake(&mut self, train: &str, by: u32) -> Result<u32, YardError> {
        let train = self.train_mut(train)?;
        train.decrease_speed_by(by);
        debug!(train = %train.number(), speed = train.speed(), "speed decreased");
        Ok(train.speed())
    }

    pub fn stop(&mut self, train: &str) -> Result<(), YardError> {
        let train = self.train_mut(train)?;
        train.stop();
        debug!(train = %train.number(), "train stopped");
        Ok(())
    }

    // ---- capacity ----

    pub fn take_seat(&mut self, carriage: &str) -> Result<&Carriage, YardError> {
        let carriage = self.carriage_mut(carriage)?;
        carriage.take_seat()?;
        debug!(carriage = %carriage.number(), taken = carriage.occupied(), "seat taken");
        Ok(carriage)
    }

    pub fn place_cargo(&mut self, carriage: &str, volume: u32) -> Result<&Carriage, YardError> {
        let carriage = self.carriage_mut(carriage)?;
        carriage.place_cargo(volume)?;
        debug!(
            carriage = %carriage.number(),
            volume,
            taken = carriage.occupied(),
            "cargo placed"
        );
        Ok(carriage)
    }

    // ---- queries ----

    pub fn station(&self, name: &str) -> Result<&Station, YardError> {
        self.stations
            .get(name)
            .ok_or_else(|| YardError::not_found("station", name))
    }

    pub fn route(&self, number: &str) -> Result<&Route, YardError> {
        self.routes
            .get(number)
            .ok_or_else(|| YardError::not_found("route", number))
    }

    pub fn train(&self, number: &str) -> Result<&Train, YardError> {
        self.trains
            .get(number)
            .ok_or_else(|| YardError::not_found("train", number))
    }

    pub fn carriage(&self, number: &str) -> Result<&Carriage, YardError> {
        self.carriages
            .get(number)
            .ok_or_else(|| YardError::not_found("carriage", number))
    }

    /// All stations, ordered by name.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// All routes, ordered by number.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    /// All trains, ordered by number.
    pub fn trains(&self) -> impl Iterator<Item = &Train> {
        self.trains.values()
    }

    /// All carriages, ordered by number.
    pub fn carriages(&self) -> impl Iterator<Item = &Carriage> {
        self.carriages.values()
    }

    pub fn trains_of_kind(&self, kind: Kind) -> impl Iterator<Item = &Train> {
        self.trains.values().filter(move |t| t.kind() == kind)
    }

    /// Trains standing at a station, in arrival order.
    pub fn trains_at(&self, station: &str) -> Result<Vec<&Train>, YardError> {
        self.station(station)?
            .trains()
            .iter()
            .map(|p| self.train(p.number.as_str()))
            .collect()
    }

    /// A train's carriages, in coupling order.
    pub fn carriages_of(&self, train: &str) -> Result<Vec<&Carriage>, YardError> {
        self.train(train)?
            .carriages()
            .iter()
            .map(|c| self.carriage(c.as_str()))
            .collect()
    }

    /// The train a carriage is coupled to, if any.
    pub fn coupled_to(&self, carriage: &str) -> Option<&TrainNumber> {
        self.couplings.get(carriage)
    }

    /// The station a train is standing at, or `None` if it has no route.
    pub fn current_station_of(&self, train: &str) -> Result<Option<&StationName>, YardError> {
        let train = self.train(train)?;
        match train.route() {
            Some(route) => {
                let route = self.route(route.as_str())?;
                train.current_station_name(route).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Serializable snapshot of everything in the yard.
    pub fn report(&self) -> YardReport {
        YardReport::from_yard(self)
    }

    fn train_mut(&mut self, number: &str) -> Result<&mut Train, YardError> {
        self.trains
            .get_mut(number)
            .ok_or_else(|| YardError::not_found("train", number))
    }

    fn carriage_mut(&mut self, number: &str) -> Result<&mut Carriage, YardError> {
        self.carriages
            .get_mut(number)
            .ok_or_else(|| YardError::not_found("carriage", number))
    }
}

fn duplicate(what: &str, id: impl std::fmt::Display) -> YardError {
    YardError::Validation(format!("{what} {id} already exists"))
}

/// Draw identifiers until one is not `in_use`.
fn fresh_id(
    ids: &mut dyn IdGenerator,
    attempts: usize,
    kind: IdKind,
    in_use: impl Fn(&str) -> bool,
) -> Result<String, YardError> {
    for _ in 0..attempts {
        let id = ids.next_id(kind);
        if !in_use(&id) {
            return Ok(id);
        }
        debug!(%id, "generated identifier already in use");
    }
    Err(YardError::Validation(format!(
        "could not generate a free {} identifier after {attempts} attempts",
        kind.prefix()
    )))
}
