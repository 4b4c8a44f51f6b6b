use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::DialectRegistry;
use crate::PolyglotError;
use crate::PolyglotResult;

/// Default name of the report written once the walk completes.
pub const DEFAULT_LOG_FILE: &str = "polyglot-log.txt";

/// A rule pairing a dialect with the delimiters that mark its sections.
///
/// ```json
/// { "dialect": "markdown", "start": "<!--md", "stop": "md-->" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Eq, PartialEq)]
pub struct Lexicon {
	/// Name the dialect is registered under.
	pub dialect: String,
	/// Literal text opening a section.
	pub start: String,
	/// Literal text closing a section.
	pub stop: String,
}

impl Lexicon {
	pub fn new(
		dialect: impl Into<String>,
		start: impl Into<String>,
		stop: impl Into<String>,
	) -> Self {
		Self {
			dialect: dialect.into(),
			start: start.into(),
			stop: stop.into(),
		}
	}
}

/// Configuration as written in the json config file.
///
/// ```json
/// {
///   "inputDir": "./src",
///   "outputDir": "./dist",
///   "extensions": {
///     ".html": [
///       { "dialect": "markdown", "start": "<!--md", "stop": "md-->" },
///       { "dialect": "jinja", "start": "{{{", "stop": "}}}" }
///     ]
///   },
///   "data": { "site": { "title": "Polyglot" } }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolyglotConfig {
	/// Root of the tree to read.
	pub input_dir: PathBuf,
	/// Root of the mirrored tree to write. Must already exist.
	pub output_dir: PathBuf,
	/// Map of extension (with its leading `.`) to the lexicons applied, in
	/// order, to files carrying it.
	pub extensions: BTreeMap<String, Vec<Lexicon>>,
	/// Values available to the `jinja` dialect.
	#[serde(default)]
	pub data: serde_json::Map<String, serde_json::Value>,
}

impl PolyglotConfig {
	/// Read, parse, and resolve the config file at `path`.
	pub fn load(path: &Path) -> PolyglotResult<ResolvedConfig> {
		let content = std::fs::read_to_string(path).map_err(|e| {
			PolyglotError::ConfigRead {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		Self::from_json(path, &content)?.resolve(path)
	}

	/// Parse config text. `path` is only used for error messages.
	pub fn from_json(path: &Path, content: &str) -> PolyglotResult<Self> {
		serde_json::from_str(content).map_err(|e| {
			PolyglotError::ConfigParse {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})
	}

	/// Turn the configured roots into absolute, cleaned paths and make sure
	/// both exist. Relative roots resolve against the working directory.
	pub fn resolve(self, config_path: &Path) -> PolyglotResult<ResolvedConfig> {
		let input_dir = resolve_directory("input", &self.input_dir)?;
		let output_dir = resolve_directory("output", &self.output_dir)?;

		Ok(ResolvedConfig {
			config_path: config_path.to_path_buf(),
			input_dir,
			output_dir,
			extensions: self.extensions,
			data: self.data,
		})
	}
}

fn resolve_directory(kind: &'static str, dir: &Path) -> PolyglotResult<PathBuf> {
	let missing = || {
		PolyglotError::MissingDirectory {
			kind,
			path: dir.display().to_string(),
		}
	};

	let resolved = dir.canonicalize().map_err(|_| missing())?;
	if !resolved.is_dir() {
		return Err(missing());
	}

	Ok(resolved)
}

/// A loaded configuration whose roots are known to exist.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub config_path: PathBuf,
	pub input_dir: PathBuf,
	pub output_dir: PathBuf,
	pub extensions: BTreeMap<String, Vec<Lexicon>>,
	pub data: serde_json::Map<String, serde_json::Value>,
}

impl ResolvedConfig {
	/// Lexicons configured for `extension`, in application order.
	pub fn lexicons_for(&self, extension: &str) -> Option<&[Lexicon]> {
		self.extensions.get(extension).map(Vec::as_slice)
	}

	/// Reject configuration problems that would otherwise only surface midway
	/// through the walk. Must be called before any file is processed.
	pub fn validate(&self, registry: &DialectRegistry) -> PolyglotResult<()> {
		for (extension, lexicons) in &self.extensions {
			if !extension.starts_with('.') {
				return Err(PolyglotError::InvalidExtension(extension.clone()));
			}

			for lexicon in lexicons {
				if !registry.contains(&lexicon.dialect) {
					return Err(PolyglotError::UnknownDialect {
						extension: extension.clone(),
						dialect: lexicon.dialect.clone(),
						available: registry.names().join(", "),
					});
				}

				let empty = if lexicon.start.is_empty() {
					Some("start")
				} else if lexicon.stop.is_empty() {
					Some("stop")
				} else {
					None
				};

				if let Some(which) = empty {
					return Err(PolyglotError::EmptyDelimiter {
						extension: extension.clone(),
						dialect: lexicon.dialect.clone(),
						which,
					});
				}
			}
		}

		Ok(())
	}
}
