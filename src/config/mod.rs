//! Game configuration.
//!
//! All tunables live in [`GameConfig`]. Defaults reproduce the Hyde Park
//! game; a TOML file may override any subset of them. Validation reports
//! every violated constraint at once rather than stopping at the first.

use crate::geo::BoundingRectangle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::{ConfigError, ConfigViolation};

/// Process-wide, read-only game settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Distance in metres below which a guess wins
    pub tolerance: f64,

    /// Guesses granted at the start of each hunt
    pub attempts: u32,

    /// Half-width of the noise band applied to reported distances, in metres
    pub distance_error: f64,

    /// Where targets may be hidden
    pub bounds: BoundingRectangle,

    /// Enables the "where" escape that reveals the target
    pub debug: bool,

    /// Seconds to wait between polls
    pub poll_interval_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tolerance: 100.0,
            attempts: 10,
            distance_error: 25.0,
            bounds: BoundingRectangle::hyde_park(),
            debug: false,
            poll_interval_secs: 5,
        }
    }
}

/// Outcome of validating a config: success, or every violation found.
pub type ConfigValidation = Validation<(), NonEmptyVec<ConfigViolation>>;

fn require(ok: bool, violation: impl FnOnce() -> ConfigViolation) -> ConfigValidation {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

fn require_range(axis: &'static str, value: f64, limit: f64) -> ConfigValidation {
    require((-limit..=limit).contains(&value), || {
        ConfigViolation::OutOfRange { axis, value, limit }
    })
}

impl GameConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Parse and validate a TOML document; missing fields keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validated()
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check every constraint, accumulating all violations.
    pub fn validate(&self) -> ConfigValidation {
        let b = &self.bounds;
        let checks = vec![
            require(self.tolerance > 0.0, || {
                ConfigViolation::NonPositiveTolerance(self.tolerance)
            }),
            require(self.tolerance.is_finite(), || {
                ConfigViolation::NonFiniteTolerance(self.tolerance)
            }),
            require(self.attempts >= 1, || ConfigViolation::NoAttempts(self.attempts)),
            require(self.distance_error >= 0.0, || {
                ConfigViolation::NegativeDistanceError(self.distance_error)
            }),
            // The noise band spans 2 * distance_error and must stay representable.
            require((2.0 * self.distance_error).is_finite(), || {
                ConfigViolation::NonFiniteDistanceError(self.distance_error)
            }),
            require(self.poll_interval_secs > 0, || ConfigViolation::ZeroPollInterval),
            require(b.lat_min <= b.lat_max, || ConfigViolation::InvertedBounds {
                axis: "latitude",
                min: b.lat_min,
                max: b.lat_max,
            }),
            require(b.lon_min <= b.lon_max, || ConfigViolation::InvertedBounds {
                axis: "longitude",
                min: b.lon_min,
                max: b.lon_max,
            }),
            require_range("latitude", b.lat_min, 90.0),
            require_range("latitude", b.lat_max, 90.0),
            require_range("longitude", b.lon_min, 180.0),
            require_range("longitude", b.lon_max, 180.0),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Return `self` if valid, otherwise every violation as a [`ConfigError`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => Err(ConfigError::Invalid(
                errors.iter().map(|e| e.to_string()).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_success());
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.attempts, 10);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("tolerance = 50.0\ndebug = true\n").unwrap();
        assert_eq!(config.tolerance, 50.0);
        assert!(config.debug);
        assert_eq!(config.distance_error, 25.0);
        assert_eq!(config.bounds, BoundingRectangle::hyde_park());
    }

    #[test]
    fn bounds_table_overrides_rectangle() {
        let source = r#"
            attempts = 3

            [bounds]
            lat_min = 10.0
            lat_max = 11.0
            lon_min = 20.0
            lon_max = 21.0
        "#;
        let config = GameConfig::from_toml_str(source).unwrap();
        assert_eq!(config.attempts, 3);
        assert_eq!(config.bounds, BoundingRectangle::new(10.0, 11.0, 20.0, 21.0));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = GameConfig::from_toml_str("tolerance = \"far\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = GameConfig {
            tolerance: 0.0,
            attempts: 0,
            distance_error: -1.0,
            bounds: BoundingRectangle::new(95.0, 10.0, 0.0, 1.0),
            debug: false,
            poll_interval_secs: 0,
        };

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 6);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::NoAttempts(0))));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::InvertedBounds { axis: "latitude", .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::OutOfRange { value, .. } if *value == 95.0)));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn validated_lists_every_message() {
        let config = GameConfig {
            tolerance: -5.0,
            distance_error: -1.0,
            ..GameConfig::default()
        };

        match config.validated() {
            Err(ConfigError::Invalid(messages)) => {
                assert_eq!(messages.len(), 2);
                assert!(messages.iter().any(|m| m.contains("tolerance")));
                assert!(messages.iter().any(|m| m.contains("distance_error")));
            }
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn infinite_distance_error_is_rejected() {
        match GameConfig::from_toml_str("distance_error = inf\n") {
            Err(ConfigError::Invalid(messages)) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].contains("distance_error"));
            }
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn distance_error_whose_band_overflows_is_rejected() {
        let config = GameConfig {
            distance_error: 1e308,
            ..GameConfig::default()
        };

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::NonFiniteDistanceError(_))));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }

        let largest_usable = GameConfig {
            distance_error: 1e307,
            ..GameConfig::default()
        };
        assert!(largest_usable.validate().is_success());
    }

    #[test]
    fn infinite_tolerance_is_rejected() {
        let config = GameConfig {
            tolerance: f64::INFINITY,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(ConfigError::Invalid(messages)) if messages.len() == 1 && messages[0].contains("finite")
        ));
    }

    #[test]
    fn from_toml_str_rejects_inverted_bounds() {
        let source = r#"
            [bounds]
            lat_min = 11.0
            lat_max = 10.0
            lon_min = 20.0
            lon_max = 21.0
        "#;
        assert!(matches!(
            GameConfig::from_toml_str(source),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = GameConfig::load("/nonexistent/treasure-hunt.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
