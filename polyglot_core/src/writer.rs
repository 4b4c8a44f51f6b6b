use std::fs;
use std::fs::File;
use std::io;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

/// A per-file output failure. Never stops the walk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteError {
	#[error("output file `{}` could not be written: {source}", .path.display())]
	Write { path: PathBuf, source: io::Error },

	#[error("input file `{}` could not be opened: {source}", .path.display())]
	Open { path: PathBuf, source: io::Error },

	#[error("output file `{}` could not be created: {source}", .path.display())]
	Create { path: PathBuf, source: io::Error },

	#[error("output file `{}` could not be filled: {source}", .path.display())]
	Stream { path: PathBuf, source: io::Error },
}

/// Write transformed `bytes` to `relative` below `output_root`.
///
/// When the destination can't be created the missing parent directories are
/// created and the create is retried once. A file that existed before is only
/// removed when this call opened it and writing then failed. Returns the
/// destination path.
pub fn write_transformed(
	output_root: &Path,
	relative: &Path,
	bytes: &[u8],
) -> Result<PathBuf, WriteError> {
	let destination = output_root.join(relative);
	let mut target = create_with_retry(&destination).map_err(|source| {
		WriteError::Write {
			path: destination.clone(),
			source,
		}
	})?;

	if let Err(source) = target.write_all(bytes) {
		drop(target);
		let _ = fs::remove_file(&destination);
		return Err(WriteError::Write {
			path: destination,
			source,
		});
	}

	Ok(destination)
}

/// Stream the bytes of `input` unchanged to `relative` below `output_root`.
///
/// Creating the destination follows the same single retry as
/// [`write_transformed`]. Created files get default permissions rather than
/// those of `input`.
pub fn copy_verbatim(
	input: &Path,
	output_root: &Path,
	relative: &Path,
) -> Result<PathBuf, WriteError> {
	let mut reader = File::open(input).map_err(|source| {
		WriteError::Open {
			path: input.to_path_buf(),
			source,
		}
	})?;

	let destination = output_root.join(relative);
	let mut target = create_with_retry(&destination).map_err(|source| {
		WriteError::Create {
			path: destination.clone(),
			source,
		}
	})?;

	if let Err(source) = io::copy(&mut reader, &mut target) {
		drop(target);
		let _ = fs::remove_file(&destination);
		return Err(WriteError::Stream {
			path: destination,
			source,
		});
	}

	Ok(destination)
}

/// Create (or truncate) `destination`, creating its parent directories and
/// trying once more when the first attempt fails.
fn create_with_retry(destination: &Path) -> io::Result<File> {
	match File::create(destination) {
		Ok(file) => Ok(file),
		Err(first) => {
			tracing::debug!(path = %destination.display(), "create failed ({first}), creating parent directories");
			create_parents(destination);
			File::create(destination)
		}
	}
}

fn create_parents(destination: &Path) {
	let Some(parent) = destination.parent() else {
		return;
	};

	if let Err(e) = fs::create_dir_all(parent) {
		tracing::debug!(path = %parent.display(), "could not create directories: {e}");
	}
}
