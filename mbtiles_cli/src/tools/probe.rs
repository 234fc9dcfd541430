use anyhow::{Context, Result};
use clap::Args;
use mbtiles_container::{MBTilesStore, OpenOptions};
use std::{path::PathBuf, time::SystemTime};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// MBTiles container to inspect
	#[arg(required = true)]
	filename: PathBuf,
}

pub fn run(arguments: &Subcommand, options: &OpenOptions) -> Result<()> {
	log::info!("probe {:?}", arguments.filename);

	let mut store = MBTilesStore::open_with(&arguments.filename, options)
		.with_context(|| format!("failed to open {:?}", arguments.filename))?;

	println!("filename:    {}", store.filename().display());
	println!("format:      {}", store.tile_format());
	println!("compression: {}", store.tile_compression());
	println!("tile size:   {}", store.tile_size());
	println!("modified:    {}", format_timestamp(store.timestamp())?);

	store.close();
	Ok(())
}

fn format_timestamp(timestamp: SystemTime) -> Result<String> {
	OffsetDateTime::from(timestamp)
		.format(&Rfc3339)
		.context("failed to format timestamp")
}
