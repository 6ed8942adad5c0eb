use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "jumpbar-demo")]
#[command(about = "Drive a jump bar over a small catalog from stdin")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to <config dir>/jumpbar/config.toml when present)
	#[arg(short, long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Override the configured debounce delay
	#[arg(long, value_name = "MS")]
	pub debounce_ms: Option<u64>,

	/// Simulated provider latency per query
	#[arg(long, value_name = "MS", default_value_t = 0)]
	pub latency_ms: u64,

	/// Serve suggestions from a push provider instead of a pull provider
	#[arg(long)]
	pub push: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	/// Config path to load, if any.
	///
	/// An explicit `--config` is always returned; the default location only
	/// when the file exists.
	pub fn config_path(&self) -> Option<PathBuf> {
		if let Some(path) = &self.config {
			return Some(path.clone());
		}
		dirs::config_dir()
			.map(|dir| dir.join("jumpbar").join("config.toml"))
			.filter(|path| path.is_file())
	}
}
