//! Dialects shipped with polyglot.
//!
//! | name       | output                                                       |
//! | ---------- | ------------------------------------------------------------ |
//! | `upper`    | the section uppercased                                       |
//! | `lower`    | the section lowercased                                       |
//! | `trim`     | the section without surrounding whitespace                   |
//! | `markdown` | the section rendered from CommonMark (with GFM) to HTML      |
//! | `json`     | the section parsed as JSON and pretty printed                |
//! | `jinja`    | the section rendered as a minijinja template against `data`  |

use std::collections::HashSet;
use std::rc::Rc;

use minijinja::Environment;
use minijinja::UndefinedBehavior;

use crate::Dialect;
use crate::DialectError;
use crate::DialectOutput;
use crate::DialectRegistry;
use crate::DialectResult;

pub const UPPER: &str = "upper";
pub const LOWER: &str = "lower";
pub const TRIM: &str = "trim";
pub const MARKDOWN: &str = "markdown";
pub const JSON: &str = "json";
pub const JINJA: &str = "jinja";

pub(crate) fn register_builtins(
	registry: &mut DialectRegistry,
	data: serde_json::Map<String, serde_json::Value>,
) {
	let data = Rc::new(data);

	registry
		.register(UPPER, || UpperDialect)
		.register(LOWER, || LowerDialect)
		.register(TRIM, || TrimDialect)
		.register(MARKDOWN, || MarkdownDialect)
		.register(JSON, || JsonDialect)
		.register(JINJA, move || JinjaDialect::new(Rc::clone(&data)));
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpperDialect;

impl Dialect for UpperDialect {
	fn parse(&mut self, source: &str) -> DialectResult<DialectOutput> {
		Ok(DialectOutput::new(source.to_uppercase()))
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LowerDialect;

impl Dialect for LowerDialect {
	fn parse(&mut self, source: &str) -> DialectResult<DialectOutput> {
		Ok(DialectOutput::new(source.to_lowercase()))
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrimDialect;

impl Dialect for TrimDialect {
	fn parse(&mut self, source: &str) -> DialectResult<DialectOutput> {
		Ok(DialectOutput::new(source.trim()))
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownDialect;

impl Dialect for MarkdownDialect {
	fn parse(&mut self, source: &str) -> DialectResult<DialectOutput> {
		markdown::to_html_with_options(source, &markdown::Options::gfm())
			.map(DialectOutput::new)
			.map_err(|e| DialectError::Render(e.to_string()))
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDialect;

impl Dialect for JsonDialect {
	fn parse(&mut self, source: &str) -> DialectResult<DialectOutput> {
		let value: serde_json::Value =
			serde_json::from_str(source).map_err(|e| DialectError::Syntax(e.to_string()))?;

		serde_json::to_string_pretty(&value)
			.map(DialectOutput::new)
			.map_err(|e| DialectError::Render(e.to_string()))
	}
}

/// Renders sections through minijinja. Undefined variables render as empty
/// and are reported as notes rather than failing the section.
#[derive(Debug, Clone)]
pub struct JinjaDialect {
	data: Rc<serde_json::Map<String, serde_json::Value>>,
}

impl JinjaDialect {
	pub fn new(data: Rc<serde_json::Map<String, serde_json::Value>>) -> Self {
		Self { data }
	}

	fn undefined_variables(&self, undeclared: HashSet<String>) -> Vec<String> {
		let mut undefined: Vec<String> = undeclared
			.into_iter()
			.filter(|var| {
				let top_level = var.split('.').next().unwrap_or(var);
				!self.data.contains_key(top_level) && !is_builtin_variable(top_level)
			})
			.collect();

		undefined.sort();
		undefined
	}
}

impl Dialect for JinjaDialect {
	fn parse(&mut self, source: &str) -> DialectResult<DialectOutput> {
		let mut env = Environment::new();
		env.set_keep_trailing_newline(true);
		env.set_undefined_behavior(UndefinedBehavior::Chainable);
		env.add_template("section", source)
			.map_err(|e| DialectError::Syntax(e.to_string()))?;

		let template = env
			.get_template("section")
			.map_err(|e| DialectError::Syntax(e.to_string()))?;

		let ctx = minijinja::Value::from_serialize(&*self.data);
		let text = template
			.render(ctx)
			.map_err(|e| DialectError::Render(e.to_string()))?;

		let mut output = DialectOutput::new(text);
		for name in self.undefined_variables(template.undeclared_variables(true)) {
			output = output.with_note(format!("undefined template variable `{name}`"));
		}

		Ok(output)
	}
}

fn is_builtin_variable(name: &str) -> bool {
	matches!(
		name,
		"loop" | "self" | "super" | "true" | "false" | "none" | "namespace" | "range" | "dict"
	)
}
