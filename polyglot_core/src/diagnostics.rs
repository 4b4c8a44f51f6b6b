use std::fmt;
use std::fmt::Write as _;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

/// How serious a diagnostic is. Neither severity affects the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Note,
	Failure,
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Note => f.write_str("note"),
			Self::Failure => f.write_str("failure"),
		}
	}
}

/// A per-file or per-lexicon outcome worth reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	/// Input file the diagnostic is about.
	pub file: PathBuf,
	/// Dialect of the lexicon involved, if any.
	pub dialect: Option<String>,
	pub message: String,
	pub severity: Severity,
}

impl Diagnostic {
	pub fn failure(file: &Path, message: impl Into<String>) -> Self {
		Self {
			file: file.to_path_buf(),
			dialect: None,
			message: message.into(),
			severity: Severity::Failure,
		}
	}

	pub fn note(file: &Path, message: impl Into<String>) -> Self {
		Self {
			file: file.to_path_buf(),
			dialect: None,
			message: message.into(),
			severity: Severity::Note,
		}
	}

	#[must_use]
	pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
		self.dialect = Some(dialect.into());
		self
	}

	pub fn is_failure(&self) -> bool {
		self.severity == Severity::Failure
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.dialect {
			Some(dialect) => write!(f, "{} ({dialect}): {}", self.severity, self.message),
			None => write!(f, "{}: {}", self.severity, self.message),
		}
	}
}

/// What happened to a visited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
	/// Dialect sections were rewritten (possibly none) and the result written.
	Transformed,
	/// Bytes were copied unchanged.
	Copied,
	/// Nothing was written for this file.
	Failed,
}

impl fmt::Display for FileStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Transformed => f.write_str("transformed"),
			Self::Copied => f.write_str("copied"),
			Self::Failed => f.write_str("failed"),
		}
	}
}

/// Everything reported for one visited file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
	pub file: PathBuf,
	/// Path relative to the input root, when it could be computed.
	pub relative: Option<PathBuf>,
	pub status: FileStatus,
	pub diagnostics: Vec<Diagnostic>,
}

/// Reports for every visited file, in traversal order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
	pub files: Vec<FileReport>,
}

impl RunReport {
	pub fn push(&mut self, report: FileReport) {
		self.files.push(report);
	}

	pub fn transformed(&self) -> usize {
		self.count_status(FileStatus::Transformed)
	}

	pub fn copied(&self) -> usize {
		self.count_status(FileStatus::Copied)
	}

	pub fn failed(&self) -> usize {
		self.count_status(FileStatus::Failed)
	}

	fn count_status(&self, status: FileStatus) -> usize {
		self.files.iter().filter(|file| file.status == status).count()
	}

	/// All diagnostics in traversal order.
	pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
		self.files.iter().flat_map(|file| file.diagnostics.iter())
	}

	pub fn failure_count(&self) -> usize {
		self.diagnostics().filter(|d| d.is_failure()).count()
	}

	pub fn note_count(&self) -> usize {
		self.diagnostics().filter(|d| !d.is_failure()).count()
	}

	/// Plain text report: a `File:` header per visited file followed by one
	/// indented line per diagnostic.
	pub fn render_text(&self) -> String {
		let mut out = String::new();

		for (index, file) in self.files.iter().enumerate() {
			if index > 0 {
				out.push('\n');
			}

			let _ = writeln!(out, "File: {} ({})", file.file.display(), file.status);
			for diagnostic in &file.diagnostics {
				let _ = writeln!(out, "  {diagnostic}");
			}
		}

		out
	}
}
