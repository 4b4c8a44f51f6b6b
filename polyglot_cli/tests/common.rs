#![allow(dead_code)]

use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;

pub fn polyglot_cmd() -> Command {
	let mut cmd =
		Command::cargo_bin("polyglot").unwrap_or_else(|e| panic!("binary not built: {e}"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

/// Create `input` and `output` directories inside `root` and return their
/// paths.
pub fn create_roots(root: &Path) -> std::io::Result<(PathBuf, PathBuf)> {
	let input = root.join("input");
	let output = root.join("output");
	std::fs::create_dir_all(&input)?;
	std::fs::create_dir_all(&output)?;
	Ok((input, output))
}

/// Write a config file to `root/polyglot.json` and return its path.
pub fn write_config(
	root: &Path,
	input: &Path,
	output: &Path,
	extensions: serde_json::Value,
) -> std::io::Result<PathBuf> {
	let config = serde_json::json!({
		"inputDir": input,
		"outputDir": output,
		"extensions": extensions,
	});
	let path = root.join("polyglot.json");
	std::fs::write(&path, config.to_string())?;
	Ok(path)
}

pub fn write_file(path: &Path, content: impl AsRef<[u8]>) -> std::io::Result<()> {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}
