use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Seconds between two sensor drift ticks
    pub interval_seconds: u64,

    /// Chance that a given sensor gets a new reading on a tick
    pub update_probability: f64,

    pub min_value: f64,
    pub max_value: f64,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        TelemetrySettings {
            interval_seconds: 5,
            update_probability: 0.3,
            min_value: 20.0,
            max_value: 35.0,
        }
    }
}

impl TelemetrySettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }

    pub fn probability(&self) -> f64 {
        if self.update_probability.is_nan() {
            0.0
        } else {
            self.update_probability.clamp(0.0, 1.0)
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub struct FixtureSettings {
    /// JSON file to seed the store from instead of the built-in fixture
    pub path: Option<String>,
}

#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub fixtures: FixtureSettings,
}

pub fn read_settings() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("Settings").required(false))
        .add_source(
            config::Environment::with_prefix("HOME_DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_sources_fall_back_to_defaults() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[telemetry]\ninterval_seconds = 2\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<Settings>()
            .unwrap();

        assert_eq!(settings.telemetry.interval(), Duration::from_secs(2));
        assert_eq!(settings.telemetry.update_probability, 0.3);
        assert_eq!(settings.telemetry.min_value, 20.0);
        assert_eq!(settings.telemetry.max_value, 35.0);
        assert_eq!(settings.fixtures.path, None);
    }

    #[test]
    fn probability_is_clamped() {
        let settings = TelemetrySettings {
            update_probability: 1.5,
            ..Default::default()
        };
        assert_eq!(settings.probability(), 1.0);

        let settings = TelemetrySettings {
            update_probability: f64::NAN,
            ..Default::default()
        };
        assert_eq!(settings.probability(), 0.0);
    }

    #[test]
    fn zero_interval_is_raised_to_one_second() {
        let settings = TelemetrySettings {
            interval_seconds: 0,
            ..Default::default()
        };
        assert_eq!(settings.interval(), Duration::from_secs(1));
    }
}
