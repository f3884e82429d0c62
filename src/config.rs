use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml;

use crate::factory::BuildFlags;
use crate::schema::Catalog;

/// Default build flags applied when a command builds through the factory.
#[derive(Deserialize, Serialize, Default, Clone, Copy, Debug)]
pub(crate) struct BuildDefaults {
    #[serde(default)]
    pub sync: bool,
    #[serde(default)]
    pub to_db: bool,
}

impl From<BuildDefaults> for BuildFlags {
    fn from(value: BuildDefaults) -> Self {
        BuildFlags {
            sync: value.sync,
            to_db: value.to_db,
        }
    }
}

#[derive(Deserialize, Serialize, Default, Debug)]
pub(crate) struct Config {
    #[serde(default)]
    pub build: BuildDefaults,
    #[serde(default)]
    pub catalog: Catalog,
}

fn get_config_path() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);

        const USER_PATHS: [&str; 2] = [".config/modelkit/config.toml", ".modelkit.toml"];

        for &path in USER_PATHS.iter() {
            let fullpath = home.join(path);

            if fullpath.exists() {
                return Some(fullpath);
            }
        }
    }

    let system_config = PathBuf::from("/etc/modelkit.toml");

    if system_config.exists() {
        Some(system_config)
    } else {
        None
    }
}

fn parse_config_or_die<S: serde::de::DeserializeOwned>(config: &str) -> S {
    match toml::de::from_str(config) {
        Ok(s) => s,
        Err(err) => die::die!("failed to parse config: {}", err),
    }
}

fn warn_on_extra_keys<'a>(
    path: &mut Vec<&'a str>,
    user_table: &'a toml::Table,
    known_table: &'a toml::Table,
) {
    for (key, user_value) in user_table {
        path.push(key);

        match known_table.get(key) {
            Some(toml::Value::Table(known)) => {
                if let toml::Value::Table(user) = user_value {
                    warn_on_extra_keys(path, user, known);
                }
            }
            Some(_) => {}
            None => {
                eprintln!(
                    "warning: config contains extraneous key \"{}\", ignoring",
                    path.join(".")
                );
            }
        }

        path.pop();
    }
}

fn warn_on_extra_fields(config: &Config, raw_config: &str) {
    let user_table: toml::Table = parse_config_or_die(raw_config);

    // Round trip the parsed config so the key set reflects what was
    // actually understood.
    let known_table: toml::Table = {
        let serialized = toml::ser::to_string(config).expect("failed to reserialize config");

        parse_config_or_die(&serialized)
    };

    let mut path = Vec::new();

    warn_on_extra_keys(&mut path, &user_table, &known_table);
}

pub(crate) fn read_config(config: Option<PathBuf>) -> Config {
    let config_path = config.or_else(get_config_path);

    if let Some(path) = config_path {
        let raw_config = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => die::die!("failed to read config {}: {}", path.display(), err),
        };

        let config: Config = parse_config_or_die(&raw_config);

        warn_on_extra_fields(&config, &raw_config);

        config
    } else {
        Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::de::from_str("").unwrap();

        assert!(!config.build.sync);
        assert!(!config.build.to_db);
        assert!(config.catalog.models().is_empty());
    }

    #[test]
    fn build_defaults_convert_to_flags() {
        let config: Config = toml::de::from_str(
            r#"
[build]
sync = true
"#,
        )
        .unwrap();

        let flags: BuildFlags = config.build.into();

        assert!(flags.sync);
        assert!(!flags.to_db);
    }

    #[test]
    fn full_config_parses_catalog_sections() {
        let config: Config = toml::de::from_str(
            r#"
[build]
to_db = true

[[catalog.chat]]
name = "gpt-4"
provider = "openai"
max_output = 4096
context_size = 8192
cost_prompt_token = 3e-5
cost_completion_token = 6e-5

[[catalog.rerank]]
name = "rerank-lite-1"
provider = "voyage"
"#,
        )
        .unwrap();

        assert!(config.build.to_db);
        assert_eq!(config.catalog.chat.len(), 1);
        assert_eq!(config.catalog.rerank.len(), 1);
        assert_eq!(config.catalog.rerank[0].cost_search, 0.0);
    }
}
