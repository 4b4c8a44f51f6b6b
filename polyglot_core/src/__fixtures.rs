use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::DialectError;
use crate::DialectOutput;
use crate::DialectRegistry;
use crate::DialectResult;
use crate::Lexicon;
use crate::PolyglotConfig;
use crate::ResolvedConfig;

pub(crate) fn upper_lexicon() -> Lexicon {
	Lexicon::new("upper", "<<", ">>")
}

/// Built-ins plus a few dialects with predictable behavior.
pub(crate) fn test_registry() -> DialectRegistry {
	let mut registry = DialectRegistry::with_builtins(serde_json::Map::new());
	registry
		.register("fail", || {
			|_: &str| -> DialectResult<DialectOutput> {
				Err(DialectError::Syntax("unexpected token".into()))
			}
		})
		.register("brackets", || {
			|source: &str| -> DialectResult<DialectOutput> {
				Ok(DialectOutput::new(format!("[[{source}]]")))
			}
		})
		.register("noisy", || {
			|source: &str| -> DialectResult<DialectOutput> {
				Ok(DialectOutput::new(source).with_note(format!("saw `{source}`")))
			}
		})
		.register("reject_x", || {
			|source: &str| -> DialectResult<DialectOutput> {
				if source.contains('x') {
					Err(DialectError::Render(format!("cannot render `{source}`")))
				} else {
					Ok(DialectOutput::new(source).with_note("accepted"))
				}
			}
		})
		.register("count", || {
			let mut calls = 0;
			move |_: &str| -> DialectResult<DialectOutput> {
				calls += 1;
				Ok(DialectOutput::new(calls.to_string()))
			}
		});
	registry
}

/// A temporary input and output root with a resolved config pointing at them.
pub(crate) struct TestTree {
	pub tmp: TempDir,
	pub config: ResolvedConfig,
}

impl TestTree {
	pub fn new(extensions: Vec<(&str, Vec<Lexicon>)>) -> Self {
		let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
		let input_dir = tmp.path().join("input");
		let output_dir = tmp.path().join("output");
		Self::with_roots(tmp, &input_dir, &output_dir, extensions)
	}

	pub fn with_roots(
		tmp: TempDir,
		input_dir: &Path,
		output_dir: &Path,
		extensions: Vec<(&str, Vec<Lexicon>)>,
	) -> Self {
		std::fs::create_dir_all(input_dir).unwrap_or_else(|e| panic!("input dir: {e}"));
		std::fs::create_dir_all(output_dir).unwrap_or_else(|e| panic!("output dir: {e}"));

		let extensions: BTreeMap<String, Vec<Lexicon>> = extensions
			.into_iter()
			.map(|(extension, lexicons)| (extension.to_string(), lexicons))
			.collect();
		let config = PolyglotConfig {
			input_dir: input_dir.to_path_buf(),
			output_dir: output_dir.to_path_buf(),
			extensions,
			data: serde_json::Map::new(),
		}
		.resolve(&tmp.path().join("polyglot.json"))
		.unwrap_or_else(|e| panic!("resolve: {e}"));

		Self { tmp, config }
	}

	pub fn input(&self, relative: &str) -> PathBuf {
		self.config.input_dir.join(relative)
	}

	pub fn output(&self, relative: &str) -> PathBuf {
		self.config.output_dir.join(relative)
	}

	pub fn write_input(&self, relative: &str, content: impl AsRef<[u8]>) {
		let path = self.input(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
		}
		std::fs::write(&path, content).unwrap_or_else(|e| panic!("write input: {e}"));
	}

	pub fn read_output(&self, relative: &str) -> Vec<u8> {
		std::fs::read(self.output(relative)).unwrap_or_else(|e| panic!("read output: {e}"))
	}
}
