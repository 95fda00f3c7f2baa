mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, GenerationProviderConfig, Postgres, Providers, Search, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	let generation = &cfg.providers.generation;

	if generation.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.generation.api_key must be non-empty.".to_string(),
		});
	}
	if generation.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.generation.api_base must be non-empty.".to_string(),
		});
	}
	if generation.model.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.generation.model must be non-empty.".to_string(),
		});
	}
	if !generation.temperature.is_finite() || generation.temperature < 0.0 {
		return Err(Error::Validation {
			message: "providers.generation.temperature must be a finite number of zero or greater."
				.to_string(),
		});
	}
	if !generation.top_p.is_finite() || !(0.0..=1.0).contains(&generation.top_p) {
		return Err(Error::Validation {
			message: "providers.generation.top_p must be in the range 0.0-1.0.".to_string(),
		});
	}
	if generation.max_output_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.generation.max_output_tokens must be greater than zero.".to_string(),
		});
	}
	if generation.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.generation.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_matches == 0 {
		return Err(Error::Validation {
			message: "search.max_matches must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let generation = &mut cfg.providers.generation;

	// Tolerate a trailing slash so api_base + path concatenation stays predictable.
	while generation.api_base.ends_with('/') {
		generation.api_base.pop();
	}

	if !generation.path.starts_with('/') && !generation.path.is_empty() {
		generation.path.insert(0, '/');
	}
}
