//! Serializable snapshot of the yard, for display.

use serde::Serialize;

use crate::domain::{Carriage, Route, Station, Train, TrainState};

use super::Yard;

/// Everything in the yard at one moment.
#[derive(Debug, Serialize)]
pub struct YardReport {
    pub stations: Vec<StationReport>,
    pub routes: Vec<RouteReport>,
    pub trains: Vec<TrainReport>,
    pub carriages: Vec<CarriageReport>,
}

/// A station and the trains standing at it.
#[derive(Debug, Serialize)]
pub struct StationReport {
    pub name: String,

    /// Train numbers in arrival order
    pub trains: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub number: String,
    pub stations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TrainReport {
    pub number: String,

    /// "cargo" or "passenger"
    pub kind: String,

    pub speed: u32,

    /// Whether the train is moving
    pub moving: bool,

    /// Route number, if assigned
    pub route: Option<String>,

    /// Station the train is standing at, if on a route
    pub station: Option<String>,

    /// Carriage numbers in coupling order
    pub carriages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CarriageReport {
    pub number: String,
    pub kind: String,

    /// "volume" or "seats"
    pub unit: String,

    pub capacity: u32,
    pub occupied: u32,
    pub free: u32,

    /// Train the carriage is coupled to
    pub coupled_to: Option<String>,
}

impl YardReport {
    pub fn from_yard(yard: &Yard) -> Self {
        Self {
            stations: yard.stations().map(StationReport::from_station).collect(),
            routes: yard.routes().map(RouteReport::from_route).collect(),
            trains: yard
                .trains()
                .map(|t| TrainReport::from_train(t, yard))
                .collect(),
            carriages: yard
                .carriages()
                .map(|c| CarriageReport::from_carriage(c, yard))
                .collect(),
        }
    }
}

impl StationReport {
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name().to_string(),
            trains: station
                .trains()
                .iter()
                .map(|p| p.number.to_string())
                .collect(),
        }
    }
}

impl RouteReport {
    pub fn from_route(route: &Route) -> Self {
        Self {
            number: route.number().to_string(),
            stations: route.stations().iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TrainReport {
    pub fn from_train(train: &Train, yard: &Yard) -> Self {
        let station = yard
            .current_station_of(train.number().as_str())
            .ok()
            .flatten()
            .map(|s| s.to_string());
        Self {
            number: train.number().to_string(),
            kind: train.kind().to_string(),
            speed: train.speed(),
            moving: train.state() == TrainState::Moving,
            route: train.route().map(|r| r.to_string()),
            station,
            carriages: train.carriages().iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CarriageReport {
    pub fn from_carriage(carriage: &Carriage, yard: &Yard) -> Self {
        Self {
            number: carriage.number().to_string(),
            kind: carriage.kind().to_string(),
            unit: carriage.load().unit().to_string(),
            capacity: carriage.capacity(),
            occupied: carriage.occupied(),
            free: carriage.free(),
            coupled_to: yard
                .coupled_to(carriage.number().as_str())
                .map(|t| t.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::yard::{SequentialIds, YardConfig};

    fn yard() -> Yard {
        Yard::with_id_generator(YardConfig::default(), Box::new(SequentialIds::new(5)))
    }

    #[test]
    fn empty_yard_report() {
        let report = yard().report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "stations": [],
                "routes": [],
                "trains": [],
                "carriages": [],
            })
        );
    }

    #[test]
    fn report_reflects_state() {
        let mut y = yard();
        y.new_station("A").unwrap();
        y.new_station("B").unwrap();
        y.new_route("A", "B", Some("R1")).unwrap();
        y.new_cargo_train(Some("T-001")).unwrap();
        y.new_cargo_carriage(Some("C-001"), 10).unwrap();
        y.attach_carriage("T-001", "C-001").unwrap();
        y.place_cargo("C-001", 4).unwrap();
        y.assign_route("T-001", "R1").unwrap();
        y.move_train("T-001", Direction::Forward).unwrap();

        let json = serde_json::to_value(y.report()).unwrap();
        assert_eq!(json["stations"][0]["name"], "A");
        assert_eq!(json["stations"][0]["trains"], serde_json::json!([]));
        assert_eq!(json["stations"][1]["trains"], serde_json::json!(["T-001"]));
        assert_eq!(json["routes"][0]["stations"], serde_json::json!(["A", "B"]));
        assert_eq!(
            json["trains"][0],
            serde_json::json!({
                "number": "T-001",
                "kind": "cargo",
                "speed": 0,
                "moving": false,
                "route": "R1",
                "station": "B",
                "carriages": ["C-001"],
            })
        );
        assert_eq!(
            json["carriages"][0],
            serde_json::json!({
                "number": "C-001",
                "kind": "cargo",
                "unit": "volume",
                "capacity": 10,
                "occupied": 4,
                "free": 6,
                "coupled_to": "T-001",
            })
        );
    }
}
