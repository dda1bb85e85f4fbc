use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse propagator configuration")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid '{key}' setting {value}, {reason}")]
    Invalid {
        key: &'static str,
        value: f64,
        reason: &'static str,
    },
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PropagatorConfig {
    pub gravity_model: GravityModel,
    pub integrator: IntegratorConfig,
}

impl PropagatorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: PropagatorConfig = toml::from_str(s)?;
        cfg.integrator.validate()?;
        Ok(cfg)
    }
}

/// Earth constants used by the analytic model
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum GravityModel {
    /// WGS-72 with the truncated xke of the AFSPC reference code
    #[display(fmt = "wgs72old")]
    Wgs72Old,
    #[default]
    #[display(fmt = "wgs72")]
    Wgs72,
    #[display(fmt = "wgs84")]
    Wgs84,
}

/// Step control of the high-orbit integrator. The defaults reproduce the
/// long-standing reference results and should only be changed deliberately.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IntegratorConfig {
    /// Largest step, [days]
    pub max_step_days: f64,

    /// Smallest step, [days]. Bounds the number of steps of any integration.
    pub min_step_days: f64,

    /// Largest velocity change allowed per step and velocity component,
    /// [m/s per day of step]
    pub max_velocity_change: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            max_step_days: 1.0,
            min_step_days: 1e-5,
            max_velocity_change: 1e-3,
        }
    }
}

impl IntegratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written so that NaN fails every check
        if !(self.min_step_days > 0.0 && self.min_step_days.is_finite()) {
            return Err(ConfigError::Invalid {
                key: "min-step-days",
                value: self.min_step_days,
                reason: "must be positive and finite",
            });
        }
        if !(self.max_step_days >= self.min_step_days && self.max_step_days.is_finite()) {
            return Err(ConfigError::Invalid {
                key: "max-step-days",
                value: self.max_step_days,
                reason: "must be finite and no smaller than min-step-days",
            });
        }
        if !(self.max_velocity_change > 0.0) {
            return Err(ConfigError::Invalid {
                key: "max-velocity-change",
                value: self.max_velocity_change,
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use indoc::indoc;

    const FULL_CONFIG_TOML: &str = indoc! {r#"
        gravity-model = 'wgs84'

        [integrator]
        max-step-days = 0.5
        min-step-days = 1e-6
        max-velocity-change = 2e-3
    "#};

    #[test]
    fn full_config() {
        let cfg = PropagatorConfig::from_toml_str(FULL_CONFIG_TOML).unwrap();
        assert_eq!(cfg.gravity_model, GravityModel::Wgs84);
        assert_relative_eq!(cfg.integrator.max_step_days, 0.5);
        assert_relative_eq!(cfg.integrator.min_step_days, 1e-6);
        assert_relative_eq!(cfg.integrator.max_velocity_change, 2e-3);
    }

    #[test]
    fn empty_config_is_default() {
        let cfg = PropagatorConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, PropagatorConfig::default());
        assert_eq!(cfg.gravity_model, GravityModel::Wgs72);
        assert_eq!(cfg.integrator.max_step_days, 1.0);
        assert_eq!(cfg.integrator.min_step_days, 1e-5);
        assert_eq!(cfg.integrator.max_velocity_change, 1e-3);
    }

    #[test]
    fn partial_integrator_table() {
        let cfg = PropagatorConfig::from_toml_str(indoc! {r#"
            gravity-model = 'wgs72old'
            [integrator]
            min-step-days = 1e-4
        "#})
        .unwrap();
        assert_eq!(cfg.gravity_model, GravityModel::Wgs72Old);
        assert_eq!(cfg.integrator.min_step_days, 1e-4);
        assert_eq!(cfg.integrator.max_step_days, 1.0);
    }

    #[test]
    fn rejects_bad_settings() {
        assert!(matches!(
            PropagatorConfig::from_toml_str("gravity-model = 'egm96'"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            PropagatorConfig::from_toml_str("[integrator]\nmin-step-days = 0.0"),
            Err(ConfigError::Invalid {
                key: "min-step-days",
                ..
            })
        ));
        assert!(matches!(
            PropagatorConfig::from_toml_str("[integrator]\nmax-step-days = 1e-6"),
            Err(ConfigError::Invalid {
                key: "max-step-days",
                ..
            })
        ));
        assert!(matches!(
            PropagatorConfig::from_toml_str("[integrator]\nmax-velocity-change = -1.0"),
            Err(ConfigError::Invalid {
                key: "max-velocity-change",
                ..
            })
        ));
    }

    #[test]
    fn gravity_model_names() {
        assert_eq!(GravityModel::Wgs72Old.to_string(), "wgs72old");
        assert_eq!(GravityModel::default().to_string(), "wgs72");
    }
}
