use anyhow::{Context, Result, bail};
use clap::Args;
use mbtiles_container::{MBTilesStore, OpenOptions};
use mbtiles_core::TileCoord;
use std::{fs, io::Write, path::PathBuf};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// MBTiles container to read
	#[arg(required = true)]
	filename: PathBuf,

	/// zoom level
	z: u8,

	/// tile column
	x: u32,

	/// tile row, in the container's TMS order
	y: u32,

	/// write the payload to this file instead of stdout
	#[arg(long, short)]
	output: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand, options: &OpenOptions) -> Result<()> {
	let coord = TileCoord::new(arguments.z, arguments.x, arguments.y);
	log::info!("read tile {coord} from {:?}", arguments.filename);

	let store = MBTilesStore::open_with(&arguments.filename, options)
		.with_context(|| format!("failed to open {:?}", arguments.filename))?;

	let Some(blob) = store
		.read_tile(&coord)
		.with_context(|| format!("failed to read tile {coord}"))?
	else {
		bail!("tile {coord} not found");
	};

	log::debug!("tile {coord}: {} bytes of {}", blob.len(), store.tile_format());

	match &arguments.output {
		Some(path) => fs::write(path, blob.as_slice()).with_context(|| format!("failed to write {path:?}"))?,
		None => {
			let mut stdout = std::io::stdout().lock();
			stdout.write_all(blob.as_slice())?;
			stdout.flush()?;
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;
	use assert_fs::TempDir;
	use mbtiles_container::testing::{MBTilesFixture, TINY_PNG};
	use std::fs;

	fn fixture(dir: &TempDir) -> String {
		let path = dir.path().join("tile.mbtiles");
		MBTilesFixture::new().tile(3, 2, 5, TINY_PNG).write(&path).unwrap();
		path.to_str().unwrap().to_owned()
	}

	#[test]
	fn writes_tile_to_file() {
		let dir = TempDir::new().unwrap();
		let input = fixture(&dir);
		let output = dir.path().join("tile.png");

		run_command(vec!["mbtiles", "tile", &input, "3", "2", "5", "-o", output.to_str().unwrap()]).unwrap();
		assert_eq!(fs::read(&output).unwrap(), TINY_PNG);
	}

	#[test]
	fn missing_tile_fails() {
		let dir = TempDir::new().unwrap();
		let input = fixture(&dir);

		let err = run_command(vec!["mbtiles", "tile", &input, "3", "2", "4"]).unwrap_err();
		assert_eq!(err.to_string(), "tile 3/2/4 not found");
	}
}
