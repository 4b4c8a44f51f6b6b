use std::path::Path;

use thiserror::Error;

use crate::Diagnostic;
use crate::DialectError;
use crate::DialectRegistry;
use crate::Lexicon;

/// Result of running one lexicon over the working text of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconOutcome {
	/// Every section was rewritten.
	Applied { text: String, notes: Vec<String> },
	/// The start delimiter does not occur, so the text is unchanged.
	Skipped,
	/// The pass was abandoned and none of its replacements apply.
	Aborted(AbortReason),
}

/// Why a lexicon pass was abandoned for a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AbortReason {
	#[error(
		"the start delimiter `{start}` has no stop delimiter or an extra stop delimiter `{stop}`"
	)]
	UnbalancedDelimiters { start: String, stop: String },

	#[error(transparent)]
	Dialect(#[from] DialectError),

	#[error("dialect `{0}` is not registered")]
	UnknownDialect(String),

	#[error("lexicon delimiters must not be empty")]
	EmptyDelimiter,
}

/// Text of a file after all of its lexicons ran, plus what happened on the
/// way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
	pub text: String,
	pub diagnostics: Vec<Diagnostic>,
}

/// Apply `lexicons` to `source` in order, each one seeing the output of the
/// one before it.
///
/// A lexicon that aborts leaves the text it received untouched and is
/// reported as a failure naming `file` and the dialect; the remaining
/// lexicons still run. No filesystem access happens here.
pub fn transform_source(
	file: &Path,
	source: &str,
	lexicons: &[Lexicon],
	registry: &DialectRegistry,
) -> Transformed {
	let mut text = source.to_string();
	let mut diagnostics = Vec::new();

	for lexicon in lexicons {
		match apply_lexicon(&text, lexicon, registry) {
			LexiconOutcome::Applied { text: next, notes } => {
				tracing::debug!(file = %file.display(), dialect = %lexicon.dialect, "lexicon applied");
				diagnostics.extend(
					notes
						.into_iter()
						.map(|note| Diagnostic::note(file, note).with_dialect(&lexicon.dialect)),
				);
				text = next;
			}
			LexiconOutcome::Skipped => {
				tracing::debug!(file = %file.display(), dialect = %lexicon.dialect, "no sections found");
			}
			LexiconOutcome::Aborted(reason) => {
				tracing::warn!(file = %file.display(), dialect = %lexicon.dialect, "{reason}");
				diagnostics.push(
					Diagnostic::failure(file, format!("incomplete parsing: {reason}"))
						.with_dialect(&lexicon.dialect),
				);
			}
		}
	}

	Transformed { text, diagnostics }
}

/// Rewrite every section `lexicon` delimits in `source`, or none of them.
///
/// Matching is literal: the text is split on each start delimiter and every
/// piece after the first must contain the stop delimiter exactly once.
/// Sections don't nest, so a second start delimiter before the stop leaves
/// the first section without one and aborts the pass. The delimiters
/// themselves are dropped from the output.
pub fn apply_lexicon(
	source: &str,
	lexicon: &Lexicon,
	registry: &DialectRegistry,
) -> LexiconOutcome {
	if lexicon.start.is_empty() || lexicon.stop.is_empty() {
		return LexiconOutcome::Aborted(AbortReason::EmptyDelimiter);
	}

	let mut pieces = source.split(lexicon.start.as_str());
	let head = pieces.next().unwrap_or_default();
	let sections: Vec<&str> = pieces.collect();

	if sections.is_empty() {
		return LexiconOutcome::Skipped;
	}

	let Some(mut dialect) = registry.create(&lexicon.dialect) else {
		return LexiconOutcome::Aborted(AbortReason::UnknownDialect(lexicon.dialect.clone()));
	};

	let mut text = String::with_capacity(source.len());
	let mut notes = Vec::new();
	text.push_str(head);

	for piece in sections {
		let Some((inner, remainder)) = split_section(piece, &lexicon.stop) else {
			return LexiconOutcome::Aborted(AbortReason::UnbalancedDelimiters {
				start: lexicon.start.clone(),
				stop: lexicon.stop.clone(),
			});
		};

		let output = match dialect.parse(inner) {
			Ok(output) => output,
			Err(e) => return LexiconOutcome::Aborted(e.into()),
		};

		text.push_str(&output.text);
		text.push_str(remainder);
		notes.extend(output.notes);
	}

	LexiconOutcome::Applied { text, notes }
}

/// Split a piece following a start delimiter into the section body and the
/// text after its stop delimiter. `None` unless `stop` occurs exactly once.
fn split_section<'a>(piece: &'a str, stop: &str) -> Option<(&'a str, &'a str)> {
	let (inner, remainder) = piece.split_once(stop)?;
	if remainder.contains(stop) {
		return None;
	}

	Some((inner, remainder))
}
