use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum PolyglotError {
	#[error("json config file `{path}` could not be read: {reason}")]
	#[diagnostic(
		code(polyglot::config_read),
		help("pass the path to an existing json config file as the first argument")
	)]
	ConfigRead { path: String, reason: String },

	#[error("json config file `{path}` could not be parsed: {reason}")]
	#[diagnostic(
		code(polyglot::config_parse),
		help("the config must be an object with `inputDir`, `outputDir`, and `extensions` keys")
	)]
	ConfigParse { path: String, reason: String },

	#[error("{kind} directory `{path}` does not exist")]
	#[diagnostic(
		code(polyglot::missing_directory),
		help("polyglot never creates the input or output root, create it first")
	)]
	MissingDirectory { kind: &'static str, path: String },

	#[error("extension `{0}` must start with `.`")]
	#[diagnostic(
		code(polyglot::invalid_extension),
		help("extension keys include their leading separator, e.g. `.html`")
	)]
	InvalidExtension(String),

	#[error("unknown dialect `{dialect}` configured for extension `{extension}`")]
	#[diagnostic(code(polyglot::unknown_dialect), help("registered dialects: {available}"))]
	UnknownDialect {
		extension: String,
		dialect: String,
		available: String,
	},

	#[error("lexicon `{dialect}` for extension `{extension}` has an empty {which} delimiter")]
	#[diagnostic(code(polyglot::empty_delimiter))]
	EmptyDelimiter {
		extension: String,
		dialect: String,
		which: &'static str,
	},

	#[error("failed to walk input directory: {0}")]
	#[diagnostic(code(polyglot::walk))]
	Walk(String),
}

pub type PolyglotResult<T> = Result<T, PolyglotError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
