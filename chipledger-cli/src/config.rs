use chipledger_domain::{Money, RoundingMode, SettlementContext, SettlementContextError};
use rust_decimal::Decimal;
use std::{env, str::FromStr};
use thiserror::Error;

const SCALE_VAR: &str = "CHIPLEDGER_SCALE";
const ROUNDING_VAR: &str = "CHIPLEDGER_ROUNDING";
const EPSILON_VAR: &str = "CHIPLEDGER_SETTLE_EPSILON";
const DEFAULT_START_VAR: &str = "CHIPLEDGER_DEFAULT_START";

const DEFAULT_START: i64 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}'")]
    InvalidValue { var: &'static str, value: String },
    #[error(transparent)]
    Context(#[from] SettlementContextError),
}

/// Application configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub context: SettlementContext,
    pub default_start: Money,
}

impl AppConfig {
    /// Loads `.env` if present, then reads `CHIPLEDGER_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SettlementContext::cents_default();

        let scale = match lookup(SCALE_VAR) {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid(SCALE_VAR, value))?,
            None => defaults.scale,
        };

        let rounding_mode = match lookup(ROUNDING_VAR) {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "half_even" | "bankers" => RoundingMode::HalfEven,
                "half_up" => RoundingMode::HalfUp,
                _ => return Err(invalid(ROUNDING_VAR, value)),
            },
            None => defaults.rounding_mode,
        };

        let settle_epsilon = match lookup(EPSILON_VAR) {
            Some(value) => parse_money(&value).ok_or_else(|| invalid(EPSILON_VAR, value))?,
            None => defaults.settle_epsilon,
        };

        let default_start = match lookup(DEFAULT_START_VAR) {
            Some(value) => parse_money(&value)
                .filter(|start| start.signum() > 0)
                .ok_or_else(|| invalid(DEFAULT_START_VAR, value))?,
            None => Money::from_i64(DEFAULT_START),
        };

        let context = SettlementContext::try_new(scale, rounding_mode, settle_epsilon)?;
        tracing::debug!(
            scale = context.scale,
            rounding_mode = ?context.rounding_mode,
            settle_epsilon = %context.settle_epsilon,
            default_start = %default_start,
            "Loaded configuration"
        );

        Ok(Self {
            context,
            default_start,
        })
    }
}

fn parse_money(value: &str) -> Option<Money> {
    Decimal::from_str(value.trim()).ok().map(Money::from_decimal)
}

fn invalid(var: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { var, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.context, SettlementContext::cents_default());
        assert_eq!(config.default_start, Money::from_i64(20));
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            (SCALE_VAR, "0"),
            (ROUNDING_VAR, "HALF_UP"),
            (EPSILON_VAR, "0.5"),
            (DEFAULT_START_VAR, "100"),
        ]))
        .expect("config");

        assert_eq!(config.context.scale, 0);
        assert_eq!(config.context.rounding_mode, RoundingMode::HalfUp);
        assert_eq!(config.context.settle_epsilon, Money::new(5, 1));
        assert_eq!(config.default_start, Money::from_i64(100));
    }

    #[rstest]
    #[case::bad_scale(SCALE_VAR, "two")]
    #[case::bad_rounding(ROUNDING_VAR, "down")]
    #[case::bad_epsilon(EPSILON_VAR, "tiny")]
    #[case::negative_start(DEFAULT_START_VAR, "-20")]
    fn rejects_invalid_values(#[case] var: &'static str, #[case] value: &str) {
        match AppConfig::from_lookup(lookup(&[(var, value)])) {
            Err(ConfigError::InvalidValue { var: reported, .. }) => assert_eq!(reported, var),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn zero_epsilon_is_rejected_by_context() {
        let result = AppConfig::from_lookup(lookup(&[(EPSILON_VAR, "0")]));
        assert!(matches!(
            result,
            Err(ConfigError::Context(SettlementContextError::NonPositiveEpsilon(_)))
        ));
    }
}
