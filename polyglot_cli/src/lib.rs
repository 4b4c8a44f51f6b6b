use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use polyglot_core::DEFAULT_LOG_FILE;

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about = "Rewrite embedded dialect sections across a directory tree.",
	long_about = "polyglot mirrors an input directory into an output directory. Files whose \
	              extension is configured have the sections between each lexicon's start and \
	              stop delimiters replaced by the output of that lexicon's dialect; every other \
	              file is copied unchanged.\n\nThe json config names the two directories and \
	              maps extensions to ordered lists of lexicons:\n\n  {\n    \"inputDir\": \
	              \"./src\",\n    \"outputDir\": \"./dist\",\n    \"extensions\": {\n      \
	              \".html\": [{ \"dialect\": \"markdown\", \"start\": \"<!--md\", \"stop\": \
	              \"md-->\" }]\n    }\n  }\n\nA report with one entry per visited file is \
	              written once the walk completes."
)]
pub struct PolyglotCli {
	/// Path to the json configuration file.
	pub config: PathBuf,

	/// File the report is written to once the walk completes.
	#[arg(long, short, default_value = DEFAULT_LOG_FILE)]
	pub log: PathBuf,

	/// Format of the written report.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// A `File:` header per visited file followed by its diagnostics.
	Text,
	/// The full report as JSON for programmatic consumption.
	Json,
}
