use crate::api;
use crate::debugger;
use crate::error::Error;
use crate::muted_error;
use log::error;
use serde::Deserialize;
use std::fs::read_to_string;

/// Snapshot settings, used when a client does not provide its own.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Load limits for function arguments.
    pub load_args: api::LoadConfig,
    /// Load limits for local variables.
    pub load_locals: api::LoadConfig,
    /// Include floating point and vector registers into register lists.
    pub include_fp_registers: bool,
}

/// Bundled settings, every field is required.
#[derive(Deserialize)]
struct Preset {
    load_args: api::LoadConfig,
    load_locals: api::LoadConfig,
    include_fp_registers: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        let default_config = include_str!("preset/snapshot.toml");
        let preset: Preset = toml::de::from_str(default_config).expect("should de");
        Self {
            load_args: preset.load_args,
            load_locals: preset.load_locals,
            include_fp_registers: preset.include_fp_registers,
        }
    }
}

impl SnapshotConfig {
    const DEFAULT_PATH: &'static str = ".config/bs/snapshot.toml";

    /// Parse config from a TOML document, missing fields are set to defaults.
    pub fn from_toml(data: &str) -> Result<Self, Error> {
        toml::de::from_str(data).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load config from file. Return [`None`] on errors.
    /// If path is not set, config is read from `~/.config/bs/snapshot.toml`.
    pub fn from_file(path: Option<&str>) -> Option<Self> {
        let data = match path {
            None => {
                let path = home::home_dir()?;
                let path = path.join(Self::DEFAULT_PATH);
                muted_error!(read_to_string(path))?
            }
            Some(path) => match read_to_string(path) {
                Ok(data) => data,
                Err(err) => {
                    error!("Error while load snapshot config file: {err}");
                    return None;
                }
            },
        };

        match Self::from_toml(&data) {
            Ok(config) => Some(config),
            Err(err) => {
                error!("{err}");
                None
            }
        }
    }

    /// Load limits for function arguments in an engine representation.
    pub fn engine_load_args(&self) -> debugger::LoadConfig {
        (&self.load_args).into()
    }

    /// Load limits for local variables in an engine representation.
    pub fn engine_load_locals(&self) -> debugger::LoadConfig {
        (&self.load_locals).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_from_toml() {
        let config = SnapshotConfig::from_toml(
            r#"
            include_fp_registers = true

            [load_locals]
            follow_pointers = false
            max_variable_recurse = 3
            max_string_len = 128
            "#,
        )
        .unwrap();

        assert!(config.include_fp_registers);
        assert_eq!(config.load_args, SnapshotConfig::default().load_args);
        assert!(!config.load_locals.follow_pointers);
        assert_eq!(config.load_locals.max_variable_recurse, 3);
        assert_eq!(config.load_locals.max_string_len, 128);
        assert_eq!(config.load_locals.max_array_values, 0);

        let engine_cfg = config.engine_load_locals();
        assert_eq!(engine_cfg.max_string_len, 128);
        assert_eq!(engine_cfg.max_map_buckets, 0);
    }

    #[test]
    fn test_default_config_from_preset() {
        let config = SnapshotConfig::default();
        let expect = api::LoadConfig {
            follow_pointers: true,
            max_variable_recurse: 1,
            max_string_len: 64,
            max_array_values: 64,
            max_struct_fields: -1,
        };
        assert_eq!(config.load_args, expect);
        assert_eq!(config.load_locals, expect);
        assert!(!config.include_fp_registers);
    }

    #[test]
    fn test_config_empty_document() {
        assert_eq!(
            SnapshotConfig::from_toml("").unwrap(),
            SnapshotConfig::default()
        );
        assert_eq!(SnapshotConfig::default().engine_load_args().max_struct_fields, -1);
    }

    #[test]
    fn test_config_invalid_document() {
        let err = SnapshotConfig::from_toml("include_fp_registers = 1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_from_file() {
        let path = std::env::temp_dir().join(format!("snapshot-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"[load_args]\nmax_array_values = 5\n").unwrap();

        let config = SnapshotConfig::from_file(path.to_str()).unwrap();
        assert_eq!(config.load_args.max_array_values, 5);
        std::fs::remove_file(&path).unwrap();

        assert!(SnapshotConfig::from_file(Some("/not/exists/snapshot.toml")).is_none());
    }
}
