use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use polyglot_cli::OutputFormat;
use polyglot_cli::PolyglotCli;
use polyglot_core::DialectRegistry;
use polyglot_core::PolyglotConfig;
use polyglot_core::PolyglotResult;
use polyglot_core::RunReport;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = PolyglotCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.wrap_lines(false)
				.build(),
		)
	}))
	.ok();

	if let Err(e) = run(&args) {
		let report: miette::Report = e.into();
		eprintln!("{report:?}");
		process::exit(1);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init();
}

/// Load and validate the config, then process the whole tree. Everything
/// returned as an error here is fatal. Per-file problems only end up in the
/// report.
fn run(args: &PolyglotCli) -> PolyglotResult<()> {
	let config = PolyglotConfig::load(&args.config)?;
	let registry = DialectRegistry::with_builtins(config.data.clone());
	config.validate(&registry)?;

	tracing::debug!(
		input = %config.input_dir.display(),
		output = %config.output_dir.display(),
		"processing",
	);

	let report = polyglot_core::run(&config, &registry)?;
	write_report(args, &report);
	println!("{}", summary(&report));

	Ok(())
}

fn write_report(args: &PolyglotCli, report: &RunReport) {
	let content = match args.format {
		OutputFormat::Text => report.render_text(),
		OutputFormat::Json => {
			match serde_json::to_string_pretty(report) {
				Ok(json) => json,
				Err(e) => {
					tracing::warn!("could not serialize report: {e}");
					return;
				}
			}
		}
	};

	if let Err(e) = std::fs::write(&args.log, content) {
		tracing::warn!(path = %args.log.display(), "could not write report: {e}");
	}
}

fn summary(report: &RunReport) -> String {
	let failures = report.failure_count();
	let notes = report.note_count();

	let failures = if failures == 0 {
		colored!(format!("{failures} failures"), green)
	} else {
		colored!(format!("{failures} failures"), red)
	};
	let notes = if notes == 0 {
		format!("{notes} notes")
	} else {
		colored!(format!("{notes} notes"), yellow)
	};

	format!(
		"Processed {} files: {} transformed, {} copied, {} not written ({failures}, {notes})",
		report.files.len(),
		report.transformed(),
		report.copied(),
		report.failed(),
	)
}
