use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::builtin;

/// A pluggable parser that turns the raw text of one section into its
/// replacement.
///
/// The registry hands out a fresh instance for every (file, lexicon) pair, so
/// state kept on `self` is shared between the sections of one file for one
/// lexicon and never across files.
pub trait Dialect {
	fn parse(&mut self, source: &str) -> DialectResult<DialectOutput>;
}

impl<F> Dialect for F
where
	F: FnMut(&str) -> DialectResult<DialectOutput>,
{
	fn parse(&mut self, source: &str) -> DialectResult<DialectOutput> {
		self(source)
	}
}

/// Replacement text for a section together with informational notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialectOutput {
	pub text: String,
	/// Reported as note diagnostics when the whole lexicon pass succeeds.
	pub notes: Vec<String>,
}

impl DialectOutput {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			notes: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}
}

impl From<String> for DialectOutput {
	fn from(text: String) -> Self {
		Self::new(text)
	}
}

/// Why a dialect rejected a section.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DialectError {
	#[error("syntax error: {0}")]
	Syntax(String),

	#[error("render failed: {0}")]
	Render(String),
}

pub type DialectResult<T> = Result<T, DialectError>;

type DialectFactory = Box<dyn Fn() -> Box<dyn Dialect>>;

/// Dialects available to lexicons, keyed by name.
#[derive(Default)]
pub struct DialectRegistry {
	factories: BTreeMap<String, DialectFactory>,
}

impl DialectRegistry {
	/// An empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry holding every built-in dialect. `data` is the context the
	/// `jinja` dialect renders against.
	pub fn with_builtins(data: serde_json::Map<String, serde_json::Value>) -> Self {
		let mut registry = Self::new();
		builtin::register_builtins(&mut registry, data);
		registry
	}

	/// Register `factory` under `name`, replacing any previous registration.
	pub fn register<F, D>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
	where
		F: Fn() -> D + 'static,
		D: Dialect + 'static,
	{
		self.factories.insert(
			name.into(),
			Box::new(move || -> Box<dyn Dialect> { Box::new(factory()) }),
		);
		self
	}

	/// Create a fresh parser for `name`.
	pub fn create(&self, name: &str) -> Option<Box<dyn Dialect>> {
		self.factories.get(name).map(|factory| factory())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.factories.contains_key(name)
	}

	/// Registered names in sorted order.
	pub fn names(&self) -> Vec<&str> {
		self.factories.keys().map(String::as_str).collect()
	}
}

impl fmt::Debug for DialectRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DialectRegistry")
			.field("dialects", &self.names())
			.finish()
	}
}
