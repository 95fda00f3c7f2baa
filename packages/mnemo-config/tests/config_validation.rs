use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn with_generation_field(field: &str, value: Value) -> String {
	let mut root_value = sample_value();
	let root = root_value.as_table_mut().expect("Template config must be a table.");
	let providers = root
		.get_mut("providers")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [providers].");
	let generation = providers
		.get_mut("generation")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [providers.generation].");

	generation.insert(field.to_string(), value);

	toml::to_string(&root_value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("mnemo_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_expecting_error(payload: String) -> String {
	let path = write_temp_config(payload);
	let result = mnemo_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result.expect_err("Expected a validation error.").to_string()
}

#[test]
fn template_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = mnemo_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Template config must load.");

	assert_eq!(cfg.search.max_matches, 5);
	assert_eq!(cfg.providers.generation.top_k, 40);
}

#[test]
fn rejects_empty_api_key() {
	let message = load_expecting_error(with_generation_field("api_key", Value::String(" ".into())));

	assert!(
		message.contains("providers.generation.api_key must be non-empty."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn rejects_out_of_range_top_p() {
	let message = load_expecting_error(with_generation_field("top_p", Value::Float(1.5)));

	assert!(
		message.contains("providers.generation.top_p must be in the range 0.0-1.0."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn rejects_zero_max_output_tokens() {
	let message =
		load_expecting_error(with_generation_field("max_output_tokens", Value::Integer(0)));

	assert!(
		message.contains("providers.generation.max_output_tokens must be greater than zero."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn rejects_zero_max_matches() {
	let mut root_value = sample_value();
	let root = root_value.as_table_mut().expect("Template config must be a table.");
	let search = root
		.get_mut("search")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [search].");

	search.insert("max_matches".to_string(), Value::Integer(0));

	let message =
		load_expecting_error(toml::to_string(&root_value).expect("Failed to render config."));

	assert!(
		message.contains("search.max_matches must be greater than zero."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn normalizes_api_base_trailing_slash() {
	let payload =
		with_generation_field("api_base", Value::String("https://api.openai.com/".into()));
	let path = write_temp_config(payload);
	let result = mnemo_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Config with trailing slash must load.");

	assert_eq!(cfg.providers.generation.api_base, "https://api.openai.com");
}

#[test]
fn search_section_defaults_when_absent() {
	let mut root_value = sample_value();
	let root = root_value.as_table_mut().expect("Template config must be a table.");

	root.remove("search");

	let payload = toml::to_string(&root_value).expect("Failed to render config.");
	let path = write_temp_config(payload);
	let result = mnemo_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Config without [search] must load.");

	assert_eq!(cfg.search.max_matches, 5);
}
