use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// directory to search recursively
	#[arg(required = true)]
	dir: PathBuf,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	log::info!("list containers below {:?}", arguments.dir);

	let paths = mbtiles_container::locate(&arguments.dir)
		.with_context(|| format!("failed to search {:?}", arguments.dir))?;

	for path in paths {
		println!("{}", path.display());
	}

	Ok(())
}
