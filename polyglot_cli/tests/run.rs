mod common;

use polyglot_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use serde_json::Value;
use serde_json::json;
use similar_asserts::assert_eq;

#[test]
fn transforms_configured_files_and_copies_the_rest() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (input, output) = common::create_roots(tmp.path())?;
	common::write_file(&input.join("index.html"), "a<<hello>>b")?;
	common::write_file(&input.join("nested/deep/page.html"), "<<x>>-<<y>>")?;
	common::write_file(&input.join(".hidden.html"), "<<keep>>")?;
	common::write_file(&input.join("style.css"), "body {}")?;
	let config = common::write_config(
		tmp.path(),
		&input,
		&output,
		json!({ ".html": [{ "dialect": "upper", "start": "<<", "stop": ">>" }] }),
	)?;

	common::polyglot_cmd()
		.current_dir(tmp.path())
		.arg(&config)
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Processed 4 files: 2 transformed, 2 copied, 0 not written",
		));

	assert_eq!(std::fs::read_to_string(output.join("index.html"))?, "aHELLOb");
	assert_eq!(
		std::fs::read_to_string(output.join("nested/deep/page.html"))?,
		"X-Y"
	);
	assert_eq!(
		std::fs::read_to_string(output.join(".hidden.html"))?,
		"<<keep>>"
	);
	assert_eq!(std::fs::read_to_string(output.join("style.css"))?, "body {}");

	let log = std::fs::read_to_string(tmp.path().join("polyglot-log.txt"))?;
	assert!(log.contains("index.html (transformed)"));
	assert!(log.contains("style.css (copied)"));

	Ok(())
}

#[test]
fn per_file_failures_are_reported_but_do_not_fail_the_run() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (input, output) = common::create_roots(tmp.path())?;
	common::write_file(&input.join("broken.html"), "a<<hello")?;
	common::write_file(&input.join("fine.html"), "<<ok>>")?;
	let config = common::write_config(
		tmp.path(),
		&input,
		&output,
		json!({ ".html": [{ "dialect": "upper", "start": "<<", "stop": ">>" }] }),
	)?;

	common::polyglot_cmd()
		.current_dir(tmp.path())
		.arg(&config)
		.assert()
		.success()
		.stdout(predicates::str::contains("1 failures"));

	assert_eq!(
		std::fs::read_to_string(output.join("broken.html"))?,
		"a<<hello"
	);
	assert_eq!(std::fs::read_to_string(output.join("fine.html"))?, "OK");

	let log = std::fs::read_to_string(tmp.path().join("polyglot-log.txt"))?;
	assert!(log.contains("broken.html (transformed)\n  failure (upper): incomplete parsing"));

	Ok(())
}

#[test]
fn lexicons_apply_in_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (input, output) = common::create_roots(tmp.path())?;
	common::write_file(&input.join("post.html"), "<main><!--md# Hello\nmd--></main>")?;
	let config = common::write_config(
		tmp.path(),
		&input,
		&output,
		json!({
			".html": [
				{ "dialect": "markdown", "start": "<!--md", "stop": "md-->" },
				{ "dialect": "upper", "start": "<h1>", "stop": "</h1>" }
			]
		}),
	)?;

	common::polyglot_cmd()
		.current_dir(tmp.path())
		.arg(&config)
		.assert()
		.success();

	let html = std::fs::read_to_string(output.join("post.html"))?;
	assert!(html.starts_with("<main>HELLO"), "unexpected output: {html}");
	assert!(html.ends_with("</main>"));

	Ok(())
}

#[test]
fn jinja_dialect_reads_config_data() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (input, output) = common::create_roots(tmp.path())?;
	common::write_file(&input.join("about.txt"), "Welcome to <?j{{ site.name }}?>!")?;
	let config = json!({
		"inputDir": input,
		"outputDir": output,
		"extensions": { ".txt": [{ "dialect": "jinja", "start": "<?j", "stop": "?>" }] },
		"data": { "site": { "name": "Polyglot" } }
	});
	let config_path = tmp.path().join("polyglot.json");
	std::fs::write(&config_path, config.to_string())?;

	common::polyglot_cmd()
		.current_dir(tmp.path())
		.arg(&config_path)
		.assert()
		.success();

	let text = std::fs::read_to_string(output.join("about.txt"))?;
	assert_eq!(text, "Welcome to Polyglot!");

	Ok(())
}

#[test]
fn json_report_lists_every_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (input, output) = common::create_roots(tmp.path())?;
	common::write_file(&input.join("data.html"), "<<x>>")?;
	common::write_file(&input.join("README"), "readme")?;
	let config = common::write_config(
		tmp.path(),
		&input,
		&output,
		json!({ ".html": [{ "dialect": "lower", "start": "<<", "stop": ">>" }] }),
	)?;
	let log = tmp.path().join("report.json");

	common::polyglot_cmd()
		.current_dir(tmp.path())
		.arg(&config)
		.arg("--format")
		.arg("json")
		.arg("--log")
		.arg(&log)
		.assert()
		.success();

	let report: Value = serde_json::from_str(&std::fs::read_to_string(&log)?)?;
	let files = report["files"].as_array().cloned().unwrap_or_default();
	let statuses: Vec<&str> = files
		.iter()
		.filter_map(|file| file["status"].as_str())
		.collect();
	assert_eq!(statuses, vec!["copied", "transformed"]);
	assert!(!tmp.path().join("polyglot-log.txt").exists());

	Ok(())
}

#[test]
fn copying_twice_produces_identical_bytes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (input, output) = common::create_roots(tmp.path())?;
	let bytes = [0x89_u8, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00];
	common::write_file(&input.join("img/logo.png"), bytes)?;
	let config = common::write_config(tmp.path(), &input, &output, json!({}))?;

	common::polyglot_cmd()
		.current_dir(tmp.path())
		.arg(&config)
		.assert()
		.success();
	let first = std::fs::read(output.join("img/logo.png"))?;

	common::polyglot_cmd()
		.current_dir(tmp.path())
		.arg(&config)
		.assert()
		.success();
	let second = std::fs::read(output.join("img/logo.png"))?;

	assert_eq!(first, bytes);
	assert_eq!(first, second);

	Ok(())
}

#[test]
fn verbose_logs_to_stderr() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let (input, output) = common::create_roots(tmp.path())?;
	common::write_file(&input.join("page.html"), "<<x>>")?;
	let config = common::write_config(
		tmp.path(),
		&input,
		&output,
		json!({ ".html": [{ "dialect": "upper", "start": "<<", "stop": ">>" }] }),
	)?;

	common::polyglot_cmd()
		.current_dir(tmp.path())
		.arg(&config)
		.arg("--verbose")
		.assert()
		.success()
		.stderr(
			predicates::str::contains("transforming")
				.and(predicates::str::contains("lexicon applied")),
		);

	Ok(())
}
