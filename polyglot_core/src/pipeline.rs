use std::path::Path;

use crate::Action;
use crate::Diagnostic;
use crate::DialectRegistry;
use crate::FileRecord;
use crate::FileReport;
use crate::FileStatus;
use crate::PolyglotResult;
use crate::ResolvedConfig;
use crate::RunReport;
use crate::Transformed;
use crate::Visit;
use crate::Walker;
use crate::copy_verbatim;
use crate::transform_source;
use crate::write_transformed;

/// Mirror the input tree into the output tree, rewriting dialect sections in
/// files whose extension is configured.
///
/// Files are processed strictly one after another. A failure on one file is
/// recorded in its [`FileReport`] and never affects another file. Only a
/// failure to walk the input tree is returned as an error.
pub fn run(config: &ResolvedConfig, registry: &DialectRegistry) -> PolyglotResult<RunReport> {
	let mut report = RunReport::default();
	let walker = Walker::new(
		&config.input_dir,
		config.extensions.keys().cloned(),
		nested_output(&config.input_dir, &config.output_dir),
	);

	for visit in walker {
		let file_report = match visit? {
			Visit::Dispatch {
				record,
				action: Action::Copy,
			} => copy_file(config, &record),
			Visit::Dispatch {
				record,
				action: Action::Transform,
			} => transform_file(config, registry, &record),
			Visit::Rejected(diagnostic) => rejected_report(diagnostic),
		};

		report.push(file_report);
	}

	Ok(report)
}

/// The output root when it lives inside the input root, so the walk doesn't
/// pick up its own output.
fn nested_output<'a>(input_dir: &Path, output_dir: &'a Path) -> Option<&'a Path> {
	(output_dir != input_dir && output_dir.starts_with(input_dir)).then_some(output_dir)
}

/// Report for a file the walker couldn't place below the input root. Nothing
/// is written for it.
pub(crate) fn rejected_report(diagnostic: Diagnostic) -> FileReport {
	tracing::warn!(file = %diagnostic.file.display(), "{}", diagnostic.message);
	FileReport {
		file: diagnostic.file.clone(),
		relative: None,
		status: FileStatus::Failed,
		diagnostics: vec![diagnostic],
	}
}

fn copy_file(config: &ResolvedConfig, record: &FileRecord) -> FileReport {
	tracing::debug!(file = %record.relative.display(), "copying");

	match copy_verbatim(&record.path, &config.output_dir, &record.relative) {
		Ok(_) => file_report(record, FileStatus::Copied, Vec::new()),
		Err(e) => {
			tracing::warn!(file = %record.path.display(), "{e}");
			file_report(
				record,
				FileStatus::Failed,
				vec![Diagnostic::failure(&record.path, e.to_string())],
			)
		}
	}
}

fn transform_file(
	config: &ResolvedConfig,
	registry: &DialectRegistry,
	record: &FileRecord,
) -> FileReport {
	tracing::debug!(file = %record.relative.display(), "transforming");

	let source = match std::fs::read_to_string(&record.path) {
		Ok(source) => source,
		Err(e) => {
			tracing::warn!(file = %record.path.display(), "could not read input: {e}");
			return file_report(
				record,
				FileStatus::Failed,
				vec![Diagnostic::failure(
					&record.path,
					format!("input file could not be read: {e}"),
				)],
			);
		}
	};

	let lexicons = record
		.extension
		.as_deref()
		.and_then(|extension| config.lexicons_for(extension))
		.unwrap_or_default();
	let Transformed {
		text,
		mut diagnostics,
	} = transform_source(&record.path, &source, lexicons, registry);

	match write_transformed(&config.output_dir, &record.relative, text.as_bytes()) {
		Ok(_) => file_report(record, FileStatus::Transformed, diagnostics),
		Err(e) => {
			tracing::warn!(file = %record.path.display(), "{e}");
			diagnostics.push(Diagnostic::failure(&record.path, e.to_string()));
			file_report(record, FileStatus::Failed, diagnostics)
		}
	}
}

fn file_report(record: &FileRecord, status: FileStatus, diagnostics: Vec<Diagnostic>) -> FileReport {
	FileReport {
		file: record.path.clone(),
		relative: Some(record.relative.clone()),
		status,
		diagnostics,
	}
}
