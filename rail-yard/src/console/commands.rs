//! The console's command table.
//!
//! Every command the console understands is listed in [`COMMANDS`] with
//! its arguments and handler. Arguments are whitespace-separated, so names
//! containing spaces cannot be typed at the console.

use std::fmt::Write as _;

use crate::domain::{Direction, Kind, Load};
use crate::yard::Yard;

use super::CommandError;

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and read the next command.
    Text(String),
    /// Leave the loop.
    Quit,
}

type Handler = fn(&mut Yard, &[&str]) -> Result<Reply, CommandError>;

/// One entry of the command table.
pub struct CommandSpec {
    pub name: &'static str,
    /// Argument names; the last `optional` of them may be omitted.
    pub args: &'static [&'static str],
    pub optional: usize,
    pub summary: &'static str,
    pub handler: Handler,
}

impl CommandSpec {
    /// Usage line, e.g. `create-route <first> <last> [number]`.
    pub fn usage(&self) -> String {
        let required = self.args.len() - self.optional;
        let mut usage = self.name.to_string();
        for (i, arg) in self.args.iter().enumerate() {
            if i < required {
                let _ = write!(usage, " <{arg}>");
            } else {
                let _ = write!(usage, " [{arg}]");
            }
        }
        usage
    }

    fn accepts(&self, count: usize) -> bool {
        (self.args.len() - self.optional..=self.args.len()).contains(&count)
    }
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        args: &[],
        optional: 0,
        summary: "list commands",
        handler: help,
    },
    CommandSpec {
        name: "create-station",
        args: &["name"],
        optional: 0,
        summary: "create a station",
        handler: create_station,
    },
    CommandSpec {
        name: "stations",
        args: &[],
        optional: 0,
        summary: "list stations",
        handler: list_stations,
    },
    CommandSpec {
        name: "create-route",
        args: &["first", "last", "number"],
        optional: 1,
        summary: "create a route between two stations",
        handler: create_route,
    },
    CommandSpec {
        name: "route",
        args: &["route"],
        optional: 0,
        summary: "show a route's stations",
        handler: show_route,
    },
    CommandSpec {
        name: "add-route-station",
        args: &["route", "station"],
        optional: 0,
        summary: "add a station before the route's last one",
        handler: add_route_station,
    },
    CommandSpec {
        name: "remove-route-station",
        args: &["route", "station"],
        optional: 0,
        summary: "remove an interior station from a route",
        handler: remove_route_station,
    },
    CommandSpec {
        name: "create-cargo-train",
        args: &["number"],
        optional: 1,
        summary: "create a cargo train",
        handler: create_cargo_train,
    },
    CommandSpec {
        name: "create-passenger-train",
        args: &["number"],
        optional: 1,
        summary: "create a passenger train",
        handler: create_passenger_train,
    },
    CommandSpec {
        name: "trains",
        args: &[],
        optional: 0,
        summary: "list trains and their carriages",
        handler: list_trains,
    },
    CommandSpec {
        name: "train",
        args: &["train"],
        optional: 0,
        summary: "show a train's speed and where it stands on its route",
        handler: show_train,
    },
    CommandSpec {
        name: "assign-route",
        args: &["train", "route"],
        optional: 0,
        summary: "put a train at the start of a route",
        handler: assign_route,
    },
    CommandSpec {
        name: "create-cargo-carriage",
        args: &["max_volume", "number"],
        optional: 1,
        summary: "create a cargo carriage",
        handler: create_cargo_carriage,
    },
    CommandSpec {
        name: "create-passenger-carriage",
        args: &["seats", "number"],
        optional: 1,
        summary: "create a passenger carriage",
        handler: create_passenger_carriage,
    },
    CommandSpec {
        name: "attach-carriage",
        args: &["train", "carriage"],
        optional: 0,
        summary: "couple a carriage to a train",
        handler: attach_carriage,
    },
    CommandSpec {
        name: "detach-carriage",
        args: &["train", "carriage"],
        optional: 0,
        summary: "uncouple a carriage from a train",
        handler: detach_carriage,
    },
    CommandSpec {
        name: "move-forward",
        args: &["train"],
        optional: 0,
        summary: "move a train to the next station",
        handler: move_forward,
    },
    CommandSpec {
        name: "move-backward",
        args: &["train"],
        optional: 0,
        summary: "move a train to the previous station",
        handler: move_backward,
    },
    CommandSpec {
        name: "accelerate",
        args: &["train", "by"],
        optional: 0,
        summary: "increase a train's speed",
        handler: accelerate,
    },
    CommandSpec {
        name: "brake",
        args: &["train", "by"],
        optional: 0,
        summary: "decrease a train's speed",
        handler: brake,
    },
    CommandSpec {
        name: "stop",
        args: &["train"],
        optional: 0,
        summary: "stop a train",
        handler: stop,
    },
    CommandSpec {
        name: "station-trains",
        args: &["station"],
        optional: 0,
        summary: "show trains at a station",
        handler: station_trains,
    },
    CommandSpec {
        name: "train-carriages",
        args: &["train"],
        optional: 0,
        summary: "show a train's carriages",
        handler: train_carriages,
    },
    CommandSpec {
        name: "take-seat",
        args: &["carriage"],
        optional: 0,
        summary: "take one seat in a passenger carriage",
        handler: take_seat,
    },
    CommandSpec {
        name: "place-cargo",
        args: &["carriage", "volume"],
        optional: 0,
        summary: "load cargo into a cargo carriage",
        handler: place_cargo,
    },
    CommandSpec {
        name: "report",
        args: &[],
        optional: 0,
        summary: "print the whole yard as JSON",
        handler: report,
    },
    CommandSpec {
        name: "quit",
        args: &[],
        optional: 0,
        summary: "leave",
        handler: quit,
    },
];

/// Look up and run one command line.
///
/// Blank lines and lines starting with `#` produce an empty reply.
pub fn dispatch(yard: &mut Yard, line: &str) -> Result<Reply, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(Reply::Text(String::new()));
    };
    if name.starts_with('#') {
        return Ok(Reply::Text(String::new()));
    }
    let args: Vec<&str> = words.collect();
    let spec = COMMANDS
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| CommandError::Unknown(name.to_string()))?;
    if !spec.accepts(args.len()) {
        return Err(CommandError::Usage {
            usage: spec.usage(),
        });
    }
    (spec.handler)(yard, &args)
}

fn text(s: impl Into<String>) -> Result<Reply, CommandError> {
    Ok(Reply::Text(s.into()))
}

fn number(name: &'static str, value: &str) -> Result<u32, CommandError> {
    value.parse().map_err(|_| CommandError::BadNumber {
        name,
        value: value.to_string(),
    })
}

fn help(_: &mut Yard, _: &[&str]) -> Result<Reply, CommandError> {
    let width = COMMANDS
        .iter()
        .map(|c| c.usage().len())
        .max()
        .unwrap_or(0);
    let lines: Vec<String> = COMMANDS
        .iter()
        .map(|c| format!("{:width$}  {}", c.usage(), c.summary))
        .collect();
    text(lines.join("\n"))
}

fn create_station(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let station = yard.new_station(args[0])?;
    text(format!("Created station: {}", station.name()))
}

fn list_stations(yard: &mut Yard, _: &[&str]) -> Result<Reply, CommandError> {
    let names: Vec<String> = yard.stations().map(|s| s.name().to_string()).collect();
    if names.is_empty() {
        text("There are no stations.")
    } else {
        text(format!("Stations: {}", names.join(", ")))
    }
}

fn create_route(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let route = yard.new_route(args[0], args[1], args.get(2).copied())?;
    text(format!("Route '{}' created", route.number()))
}

fn show_route(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let route = yard.route(args[0])?;
    let names: Vec<&str> = route.stations().iter().map(|s| s.as_str()).collect();
    text(format!("Route '{}': {}", route.number(), names.join(" -> ")))
}

fn add_route_station(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    yard.add_station_to_route(args[0], args[1])?;
    text(format!("Station '{}' added to route '{}'", args[1], args[0]))
}

fn remove_route_station(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    yard.remove_station_from_route(args[0], args[1])?;
    text(format!("Station '{}' removed from route '{}'", args[1], args[0]))
}

fn create_cargo_train(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let train = yard.new_cargo_train(args.first().copied())?;
    text(format!("New cargo train created. Its number is: {}", train.number()))
}

fn create_passenger_train(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let train = yard.new_passenger_train(args.first().copied())?;
    text(format!(
        "New passenger train created. Its number is: {}",
        train.number()
    ))
}

fn list_trains(yard: &mut Yard, _: &[&str]) -> Result<Reply, CommandError> {
    if yard.trains().next().is_none() {
        return text("There are no trains.");
    }
    let lines: Vec<String> = Kind::ALL
        .iter()
        .map(|&kind| {
            let trains: Vec<String> = yard
                .trains_of_kind(kind)
                .map(|t| {
                    let carriages: Vec<&str> = t.carriages().iter().map(|c| c.as_str()).collect();
                    format!("{}({})", t.number(), carriages.join(","))
                })
                .collect();
            format!("{kind} trains: {}", trains.join(", "))
        })
        .collect();
    text(lines.join("\n"))
}

fn show_train(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let train = yard.train(args[0])?;
    let mut out = format!(
        "Train '{}': {}, speed {}",
        train.number(),
        train.kind(),
        train.speed()
    );
    let Some(number) = train.route() else {
        out.push_str(", no route");
        return text(out);
    };
    let route = yard.route(number.as_str())?;
    let _ = write!(
        out,
        ", route '{}', at {}",
        route.number(),
        train.current_station_name(route)?
    );
    if let Some(previous) = train.previous_station_name(route)? {
        let _ = write!(out, ", previous {previous}");
    }
    if let Some(next) = train.next_station_name(route)? {
        let _ = write!(out, ", next {next}");
    }
    text(out)
}

fn assign_route(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    yard.assign_route(args[0], args[1])?;
    let station = yard
        .current_station_of(args[0])?
        .map(|s| s.to_string())
        .unwrap_or_default();
    text(format!(
        "Train '{}' is following route '{}' now, standing at {station}",
        args[0], args[1]
    ))
}

fn create_cargo_carriage(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let volume = number("max_volume", args[0])?;
    let carriage = yard.new_cargo_carriage(args.get(1).copied(), volume)?;
    text(format!("Cargo carriage '{}' created", carriage.number()))
}

fn create_passenger_carriage(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let seats = number("seats", args[0])?;
    let carriage = yard.new_passenger_carriage(args.get(1).copied(), seats)?;
    text(format!("Passenger carriage '{}' created", carriage.number()))
}

fn attach_carriage(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    yard.attach_carriage(args[0], args[1])?;
    text(format!("'{}' was added to train '{}'", args[1], args[0]))
}

fn detach_carriage(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    yard.detach_carriage(args[0], args[1])?;
    text(format!("'{}' was removed from train '{}'", args[1], args[0]))
}

fn move_forward(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let station = yard.move_train(args[0], Direction::Forward)?;
    text(format!("Train arrived at next station: {station}"))
}

fn move_backward(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let station = yard.move_train(args[0], Direction::Backward)?;
    text(format!("Train arrived at previous station: {station}"))
}

fn accelerate(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let by = number("speed", args[1])?;
    let speed = yard.accelerate(args[0], by)?;
    text(format!("Train '{}' speed is now {speed}", args[0]))
}

fn brake(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let by = number("speed", args[1])?;
    let speed = yard.brake(args[0], by)?;
    text(format!("Train '{}' speed is now {speed}", args[0]))
}

fn stop(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    yard.stop(args[0])?;
    text(format!("Train '{}' stopped", args[0]))
}

fn station_trains(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let trains = yard.trains_at(args[0])?;
    let mut out = format!("Trains at station '{}':", args[0]);
    for t in trains {
        let _ = write!(
            out,
            "\nNumber: {}, Type: {}, Carriages: {}",
            t.number(),
            t.kind(),
            t.carriage_count()
        );
    }
    text(out)
}

fn train_carriages(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let carriages = yard.carriages_of(args[0])?;
    let mut out = format!("Carriages of train '{}':", args[0]);
    for c in carriages {
        let _ = match c.load() {
            Load::Cargo { .. } => write!(
                out,
                "\nNumber: {}, Type: cargo, Empty cargo: {}, Occupied cargo: {}",
                c.number(),
                c.free(),
                c.occupied()
            ),
            Load::Passenger { .. } => write!(
                out,
                "\nNumber: {}, Type: passenger, Free seats: {}, Taken seats: {}",
                c.number(),
                c.free(),
                c.occupied()
            ),
        };
    }
    text(out)
}

fn take_seat(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let carriage = yard.take_seat(args[0])?;
    text(format!(
        "One more seat taken in carriage {} ({} free)",
        carriage.number(),
        carriage.free()
    ))
}

fn place_cargo(yard: &mut Yard, args: &[&str]) -> Result<Reply, CommandError> {
    let volume = number("volume", args[1])?;
    let carriage = yard.place_cargo(args[0], volume)?;
    text(format!(
        "Cargo ({volume}) placed in carriage {} ({} free)",
        carriage.number(),
        carriage.free()
    ))
}

fn report(yard: &mut Yard, _: &[&str]) -> Result<Reply, CommandError> {
    text(serde_json::to_string_pretty(&yard.report())?)
}

fn quit(_: &mut Yard, _: &[&str]) -> Result<Reply, CommandError> {
    Ok(Reply::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yard::{SequentialIds, YardConfig};

    fn yard() -> Yard {
        Yard::with_id_generator(YardConfig::default(), Box::new(SequentialIds::new(5)))
    }

    fn run(yard: &mut Yard, line: &str) -> String {
        match dispatch(yard, line).unwrap() {
            Reply::Text(s) => s,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn command_names_are_unique() {
        let mut names: Vec<_> = COMMANDS.iter().map(|c| c.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), COMMANDS.len());
    }

    #[test]
    fn usage_lines() {
        let spec = COMMANDS.iter().find(|c| c.name == "create-route").unwrap();
        assert_eq!(spec.usage(), "create-route <first> <last> [number]");
        assert!(spec.accepts(2));
        assert!(spec.accepts(3));
        assert!(!spec.accepts(1));
        assert!(!spec.accepts(4));
    }

    #[test]
    fn blank_and_comment_lines() {
        let mut y = yard();
        assert_eq!(run(&mut y, "   "), "");
        assert_eq!(run(&mut y, "# a comment"), "");
    }

    #[test]
    fn unknown_command() {
        let mut y = yard();
        assert!(matches!(
            dispatch(&mut y, "fly T-001"),
            Err(CommandError::Unknown(name)) if name == "fly"
        ));
    }

    #[test]
    fn wrong_argument_count() {
        let mut y = yard();
        let err = dispatch(&mut y, "create-station").unwrap_err();
        assert_eq!(err.to_string(), "usage: create-station <name>");
    }

    #[test]
    fn bad_number_argument() {
        let mut y = yard();
        let err = dispatch(&mut y, "create-passenger-carriage lots").unwrap_err();
        assert!(matches!(err, CommandError::BadNumber { name: "seats", .. }));
        assert_eq!(y.carriages().count(), 0);
    }

    #[test]
    fn quit_command() {
        let mut y = yard();
        assert_eq!(dispatch(&mut y, "quit").unwrap(), Reply::Quit);
    }

    #[test]
    fn help_lists_every_command() {
        let mut y = yard();
        let help = run(&mut y, "help");
        for spec in COMMANDS {
            assert!(help.contains(spec.name), "help is missing {}", spec.name);
        }
    }

    #[test]
    fn build_and_run_a_line() {
        let mut y = yard();
        assert_eq!(run(&mut y, "stations"), "There are no stations.");
        assert_eq!(run(&mut y, "create-station A"), "Created station: A");
        run(&mut y, "create-station B");
        run(&mut y, "create-station C");
        assert_eq!(run(&mut y, "stations"), "Stations: A, B, C");
        assert_eq!(run(&mut y, "create-route A C R1"), "Route 'R1' created");
        run(&mut y, "add-route-station R1 B");
        assert_eq!(run(&mut y, "route R1"), "Route 'R1': A -> B -> C");

        assert_eq!(
            run(&mut y, "create-cargo-train"),
            "New cargo train created. Its number is: CT_00001"
        );
        assert_eq!(
            run(&mut y, "create-cargo-carriage 10 C-001"),
            "Cargo carriage 'C-001' created"
        );
        run(&mut y, "attach-carriage CT_00001 C-001");
        assert_eq!(
            run(&mut y, "trains"),
            "cargo trains: CT_00001(C-001)\npassenger trains: "
        );

        assert_eq!(
            run(&mut y, "assign-route CT_00001 R1"),
            "Train 'CT_00001' is following route 'R1' now, standing at A"
        );
        assert_eq!(
            run(&mut y, "move-forward CT_00001"),
            "Train arrived at next station: B"
        );
        assert_eq!(
            run(&mut y, "station-trains B"),
            "Trains at station 'B':\nNumber: CT_00001, Type: cargo, Carriages: 1"
        );

        assert_eq!(
            run(&mut y, "place-cargo C-001 7"),
            "Cargo (7) placed in carriage C-001 (3 free)"
        );
        assert_eq!(
            run(&mut y, "train-carriages CT_00001"),
            "Carriages of train 'CT_00001':\nNumber: C-001, Type: cargo, Empty cargo: 3, Occupied cargo: 7"
        );
        assert!(matches!(
            dispatch(&mut y, "place-cargo C-001 4"),
            Err(CommandError::Yard(_))
        ));
    }

    #[test]
    fn train_status() {
        let mut y = yard();
        for s in ["A", "B", "C"] {
            run(&mut y, &format!("create-station {s}"));
        }
        run(&mut y, "create-route A C R1");
        run(&mut y, "add-route-station R1 B");
        run(&mut y, "create-passenger-train P-100");
        assert_eq!(
            run(&mut y, "train P-100"),
            "Train 'P-100': passenger, speed 0, no route"
        );

        run(&mut y, "assign-route P-100 R1");
        assert_eq!(
            run(&mut y, "train P-100"),
            "Train 'P-100': passenger, speed 0, route 'R1', at A, next B"
        );
        run(&mut y, "move-forward P-100");
        assert_eq!(
            run(&mut y, "train P-100"),
            "Train 'P-100': passenger, speed 0, route 'R1', at B, previous A, next C"
        );
        run(&mut y, "move-forward P-100");
        run(&mut y, "accelerate P-100 30");
        assert_eq!(
            run(&mut y, "train P-100"),
            "Train 'P-100': passenger, speed 30, route 'R1', at C, previous B"
        );
        assert!(matches!(
            dispatch(&mut y, "train NOPE-1"),
            Err(CommandError::Yard(_))
        ));
    }

    #[test]
    fn speed_commands() {
        let mut y = yard();
        run(&mut y, "create-passenger-train P-100");
        assert_eq!(run(&mut y, "accelerate P-100 40"), "Train 'P-100' speed is now 40");
        assert_eq!(run(&mut y, "brake P-100 15"), "Train 'P-100' speed is now 25");
        run(&mut y, "create-passenger-carriage 2 P-CAR-1");
        assert!(dispatch(&mut y, "attach-carriage P-100 P-CAR-1").is_err());
        assert_eq!(run(&mut y, "stop P-100"), "Train 'P-100' stopped");
        run(&mut y, "attach-carriage P-100 P-CAR-1");
        assert_eq!(
            run(&mut y, "take-seat P-CAR-1"),
            "One more seat taken in carriage P-CAR-1 (1 free)"
        );
    }

    #[test]
    fn report_is_json() {
        let mut y = yard();
        run(&mut y, "create-station A");
        let out = run(&mut y, "report");
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["stations"][0]["name"], "A");
    }
}
