use anyhow::Context;
use factory_kpi::GeneratorConfig;
use serde::Deserialize;
use std::{fs, io, path::Path};

pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "dashboard-config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind_addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub dataset: GeneratorConfig,
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    /// Loads the config named by `DASHBOARD_CONFIG`, or `dashboard-config.toml`.
    ///
    /// A missing default file falls back to built-in defaults; a path set
    /// through the environment must exist.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => match Self::from_file(DEFAULT_CONFIG_PATH) {
                Err(e) if is_not_found(&e) => {
                    tracing::info!(
                        path = DEFAULT_CONFIG_PATH,
                        "config file not found, using defaults"
                    );
                    Ok(Self::default())
                }
                other => other,
            },
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        cfg.dataset.validate()?;
        Ok(cfg)
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|c| c.downcast_ref::<io::Error>())
        .any(|io| io.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factory_kpi::KpiError;
    use time::macros::date;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.http.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.dataset, GeneratorConfig::default());
        assert!(cfg.metrics.is_none());
    }

    #[test]
    fn parses_full_config() {
        let cfg = AppConfig::from_toml(
            r#"
            [http]
            bind_addr = "0.0.0.0:9000"

            [dataset]
            start_date = "2023-07-01"
            days = 90
            lines = ["North", "South"]
            seed = 42

            [dataset.ranges]
            defects = { start = 10, end = 20 }

            [metrics]
            bind_addr = "0.0.0.0:9100"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.http.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.dataset.start_date, date!(2023 - 07 - 01));
        assert_eq!(cfg.dataset.days, 90);
        assert_eq!(cfg.dataset.lines, vec!["North".to_string(), "South".to_string()]);
        assert_eq!(cfg.dataset.seed, 42);
        assert_eq!(cfg.dataset.ranges.defects, 10..20);
        assert_eq!(cfg.dataset.ranges.total_production, 10_000..18_000);
        assert_eq!(cfg.metrics.unwrap().bind_addr, "0.0.0.0:9100");
    }

    #[test]
    fn rejects_invalid_dataset() {
        let err = AppConfig::from_toml("[dataset]\nlines = []\n").unwrap_err();
        assert_eq!(err.downcast_ref::<KpiError>(), Some(&KpiError::NoLines));
    }

    #[test]
    fn rejects_non_finite_range_bound() {
        let err = AppConfig::from_toml(
            r#"
            [dataset]
            days = 2

            [dataset.ranges]
            downtime_hours = { start = 0.2, end = inf }
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KpiError>(),
            Some(KpiError::NonFiniteBound {
                field: "downtime_hours",
                ..
            })
        ));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = AppConfig::from_file("/nonexistent/dashboard-config.toml").unwrap_err();
        assert!(is_not_found(&err));
    }
}
