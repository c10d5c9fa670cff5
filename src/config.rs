use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::calc::CalcPolicy;
use crate::domain::TariffConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Missing sections and keys keep their built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tariff used until the user saves their own settings.
    pub tariff: TariffConfig,
    pub policy: CalcPolicy,
    pub storage: StorageConfig,
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub directory: PathBuf,
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from("data"), key_prefix: "nceec_".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig { pub pass_mark: u8 }

impl Default for TrainingConfig {
    fn default() -> Self {
        Self { pass_mark: crate::training::DEFAULT_PASS_MARK }
    }
}

impl Config {
    /// `config/default.toml`, then `EAA__` environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let figment = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("EAA__").split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load_from("missing.toml").expect("defaults load");
            assert_eq!(cfg.tariff.rate_per_kwh, 95.0);
            assert_eq!(cfg.policy.days_per_month, 30.0);
            assert_eq!(cfg.storage.key_prefix, "nceec_");
            assert_eq!(cfg.training.pass_mark, 70);
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "audit.toml",
                r#"
                [tariff]
                rate_per_kwh = 68.0
                vat_enabled = true
                vat_percent = 7.5
                "#,
            )?;
            jail.set_env("EAA__POLICY__CO2_KG_PER_KWH", "0.5");

            let cfg = Config::load_from("audit.toml").expect("config load");
            assert_eq!(cfg.tariff.rate_per_kwh, 68.0);
            assert!(cfg.tariff.vat_enabled);
            assert_eq!(cfg.tariff.vat_percent, 7.5);
            assert_eq!(cfg.policy.co2_kg_per_kwh, 0.5);
            // untouched keys keep their defaults
            assert_eq!(cfg.policy.kg_co2_per_tree, 21.0);
            assert_eq!(cfg.storage.key_prefix, "nceec_");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_tariff_rate() {
        Jail::expect_with(|jail| {
            jail.set_env("EAA__TARIFF__RATE_PER_KWH", "209.5");
            jail.set_env("EAA__TRAINING__PASS_MARK", "80");

            let cfg = Config::load_from("missing.toml").expect("config load");
            assert_eq!(cfg.tariff.rate_per_kwh, 209.5);
            assert!(!cfg.tariff.vat_enabled);
            assert_eq!(cfg.training.pass_mark, 80);
            Ok(())
        });
    }

    #[test]
    fn test_shipped_default_file_matches_builtin_defaults() {
        Jail::expect_with(|_jail| {
            let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
            let cfg = Config::load_from(path).expect("shipped config");
            assert_eq!(cfg.tariff, TariffConfig::default());
            assert_eq!(cfg.policy, CalcPolicy::default());
            assert_eq!(cfg.storage.directory, PathBuf::from("data"));
            assert_eq!(cfg.training.pass_mark, 70);
            Ok(())
        });
    }
}
