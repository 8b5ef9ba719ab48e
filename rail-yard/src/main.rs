use std::io;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rail_yard::console::Console;
use rail_yard::yard::{Yard, YardConfig};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = YardConfig::default();
    if let Ok(value) = std::env::var("RAIL_YARD_MAX_NAME_LEN") {
        match value.parse() {
            Ok(len) => config.max_name_len = len,
            Err(_) => warn!(%value, "ignoring invalid RAIL_YARD_MAX_NAME_LEN"),
        }
    }
    if let Ok(value) = std::env::var("RAIL_YARD_SEED") {
        match value.parse() {
            Ok(seed) => config.seed = Some(seed),
            Err(_) => warn!(%value, "ignoring invalid RAIL_YARD_SEED"),
        }
    }

    info!(?config, "rail yard ready; type 'help' for commands");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(Yard::new(config));
    console.run(stdin.lock(), stdout.lock())
}
