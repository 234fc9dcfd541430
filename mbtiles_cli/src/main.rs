mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use mbtiles_container::OpenOptions;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
	name = "mbtiles",
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// maximum number of pooled SQLite connections per container
	#[arg(long, global = true, default_value_t = 10, value_name = "COUNT")]
	max_connections: u32,

	/// how long SQLite waits on a locked database, in milliseconds
	#[arg(long, global = true, default_value_t = 5000, value_name = "MS")]
	busy_timeout_ms: u64,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Find all *.mbtiles containers below a directory
	List(tools::list::Subcommand),

	/// Show format, tile size and timestamp of a container
	Probe(tools::probe::Subcommand),

	/// Print the decoded metadata of a container as JSON
	Meta(tools::meta::Subcommand),

	/// Extract the raw payload of a single tile
	Tile(tools::tile::Subcommand),
}

impl Cli {
	fn open_options(&self) -> OpenOptions {
		OpenOptions::default()
			.max_connections(self.max_connections)
			.busy_timeout(Duration::from_millis(self.busy_timeout_ms))
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
	let options = cli.open_options();
	match &cli.command {
		Commands::List(arguments) => tools::list::run(arguments),
		Commands::Probe(arguments) => tools::probe::run(arguments, &options),
		Commands::Meta(arguments) => tools::meta::run(arguments, &options),
		Commands::Tile(arguments) => tools::tile::run(arguments, &options),
	}
}
