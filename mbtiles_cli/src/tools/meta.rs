use anyhow::{Context, Result};
use clap::Args;
use mbtiles_container::{MBTilesStore, OpenOptions};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// MBTiles container to read
	#[arg(required = true)]
	filename: PathBuf,

	/// print compact JSON on a single line
	#[arg(long, short)]
	compact: bool,
}

pub fn run(arguments: &Subcommand, options: &OpenOptions) -> Result<()> {
	log::info!("read metadata of {:?}", arguments.filename);

	let store = MBTilesStore::open_with(&arguments.filename, options)
		.with_context(|| format!("failed to open {:?}", arguments.filename))?;
	let metadata = store
		.read_metadata()
		.with_context(|| format!("failed to read metadata of {:?}", arguments.filename))?;

	let json = if arguments.compact {
		serde_json::to_string(&metadata)?
	} else {
		serde_json::to_string_pretty(&metadata)?
	};
	println!("{json}");

	Ok(())
}
