use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::Walk;
use ignore::WalkBuilder;
use serde::Serialize;

use crate::Diagnostic;
use crate::PolyglotError;
use crate::PolyglotResult;

/// What to do with a visited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
	/// Write the bytes to the mirrored path unchanged.
	Copy,
	/// Run the extension's lexicons over the text before writing it.
	Transform,
}

/// A visited file. Created once per entry and dropped after processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
	/// Absolute path of the file.
	pub path: PathBuf,
	/// File name including any extension.
	pub name: String,
	/// Directory containing the file.
	pub dir: PathBuf,
	/// Suffix of the name starting at its last `.`, e.g. `.html`.
	pub extension: Option<String>,
	/// Path relative to the input root.
	pub relative: PathBuf,
}

impl FileRecord {
	pub fn is_hidden(&self) -> bool {
		self.name.starts_with('.')
	}
}

/// One step of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
	/// A file and the action chosen for it.
	Dispatch { record: FileRecord, action: Action },
	/// A file that can't be processed at all. Nothing is written for it.
	Rejected(Diagnostic),
}

/// Visits every file below a root, in file name order, one at a time.
///
/// Hidden files, files in hidden directories, and files matched by ignore
/// files are all visited. Directories are never yielded.
pub struct Walker {
	root: PathBuf,
	extensions: BTreeSet<String>,
	inner: Walk,
}

impl Walker {
	/// Walk `root`, treating files whose extension is in `extensions` as
	/// candidates for transformation. Entries at or below `skip` (usually an
	/// output root nested inside `root`) are not visited.
	pub fn new<I, S>(root: &Path, extensions: I, skip: Option<&Path>) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut builder = WalkBuilder::new(root);
		builder
			.standard_filters(false)
			.follow_links(false)
			.sort_by_file_name(|a, b| a.cmp(b));

		if let Some(skip) = skip {
			let skip = skip.to_path_buf();
			builder.filter_entry(move |entry| entry.path() != skip);
		}

		Self {
			root: root.to_path_buf(),
			extensions: extensions.into_iter().map(Into::into).collect(),
			inner: builder.build(),
		}
	}
}

impl Iterator for Walker {
	type Item = PolyglotResult<Visit>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let entry = match self.inner.next()? {
				Ok(entry) => entry,
				Err(e) => return Some(Err(PolyglotError::Walk(e.to_string()))),
			};

			if entry.file_type().is_some_and(|kind| kind.is_dir()) {
				continue;
			}

			return Some(Ok(visit_path(&self.root, &self.extensions, entry.into_path())));
		}
	}
}

/// Build the record for `path` and pick its action. A path that isn't below
/// `root` is rejected with a failure diagnostic.
pub(crate) fn visit_path(root: &Path, extensions: &BTreeSet<String>, path: PathBuf) -> Visit {
	let relative = match path.strip_prefix(root) {
		Ok(relative) => relative.to_path_buf(),
		Err(e) => {
			return Visit::Rejected(Diagnostic::failure(
				&path,
				format!("file not processed due to relative path error: {e}"),
			));
		}
	};

	let name = path
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default();
	let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
	let extension = extension_of(&name).map(str::to_string);

	let record = FileRecord {
		path,
		name,
		dir,
		extension,
		relative,
	};
	let action = classify(&record, extensions);

	Visit::Dispatch { record, action }
}

/// Choose an action for `record`. The first matching rule wins:
///
/// 1. no extension: copy
/// 2. extension not configured: copy
/// 3. hidden file: copy, even when the extension is configured
/// 4. otherwise: transform
pub fn classify(record: &FileRecord, extensions: &BTreeSet<String>) -> Action {
	let Some(extension) = &record.extension else {
		return Action::Copy;
	};

	if !extensions.contains(extension) || record.is_hidden() {
		return Action::Copy;
	}

	Action::Transform
}

/// The suffix of `name` from its last `.` (inclusive), if it has one.
pub fn extension_of(name: &str) -> Option<&str> {
	name.rfind('.').map(|index| &name[index..])
}
