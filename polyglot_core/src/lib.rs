//! `polyglot_core` is the engine behind [polyglot](https://github.com/adamjonr/polyglot). It mirrors a
//! directory tree into an output tree, and for files whose extension is
//! configured it rewrites the sections embedded between start and stop
//! delimiters using a pluggable dialect.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Input tree
//!   → Walker (visits files in name order, picks copy or transform)
//!   → Engine (applies each lexicon of the extension in turn, dialect per section)
//!   → Writer (mirrors the relative path under the output root)
//!   → RunReport (one FileReport with diagnostics per visited file)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Loading and validating the json config file.
//! - [`builtin`] — Dialects registered by [`DialectRegistry::with_builtins`].
//! - [`walker`] — Directory traversal and copy/transform classification.
//! - [`writer`] — Writing transformed text and copying files verbatim.
//!
//! ## Sections
//!
//! A lexicon `{ "dialect": "upper", "start": "<<", "stop": ">>" }` turns
//! `a<<hello>>b` into `aHELLOb`. Either every section of a file is rewritten
//! for a lexicon or none is: a start delimiter without exactly one following
//! stop delimiter, or a dialect failure, leaves the text untouched for that
//! lexicon and records a failure. Later lexicons see the output of earlier
//! ones.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polyglot_core::DialectRegistry;
//! use polyglot_core::PolyglotConfig;
//! use polyglot_core::run;
//! use std::path::Path;
//!
//! let config = PolyglotConfig::load(Path::new("polyglot.json")).unwrap();
//! let registry = DialectRegistry::with_builtins(config.data.clone());
//! config.validate(&registry).unwrap();
//!
//! let report = run(&config, &registry).unwrap();
//! print!("{}", report.render_text());
//! ```

pub use config::*;
pub use diagnostics::*;
pub use dialect::*;
pub use engine::*;
pub use error::*;
pub use pipeline::*;
pub use walker::*;
pub use writer::*;

pub mod builtin;
pub mod config;
mod diagnostics;
mod dialect;
mod engine;
#[allow(unused_assignments)]
mod error;
mod pipeline;
pub mod walker;
pub mod writer;

#[cfg(test)]
mod __fixtures;
