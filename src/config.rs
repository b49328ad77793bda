use crate::error::{TfResult, TransForgeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// String-keyed parameter block attached to one operator or initialiser.
///
/// Keys and values mirror the configuration surface: everything arrives as a
/// string and is converted on access, with the offending key named in the
/// error when conversion fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get_str(&self, key: &str) -> TfResult<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| TransForgeError::Config(format!("missing parameter: {}", key)))
    }

    pub fn get_float(&self, key: &str) -> TfResult<f64> {
        let raw = self.get_str(key)?;
        raw.parse().map_err(|_| {
            TransForgeError::Config(format!("parameter {} is not a number: {}", key, raw))
        })
    }

    /// Like `get_float`, but a missing key yields `default` instead of an
    /// error. A present-but-unparsable value is still an error.
    pub fn get_float_or(&self, key: &str, default: f64) -> TfResult<f64> {
        match self.values.get(key) {
            None => Ok(default),
            Some(_) => self.get_float(key),
        }
    }
}

/// Decay parameters drive truncated geometric draws and must lie strictly
/// inside (0, 1).
pub fn validate_decay(value: f64, key: &str) -> TfResult<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(TransForgeError::Config(format!(
            "parameter {} must be in (0, 1), got {}",
            key, value
        )))
    }
}

/// Probabilities must lie in [0, 1].
pub fn validate_probability(value: f64, key: &str) -> TfResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(TransForgeError::Config(format!(
            "parameter {} must be in [0, 1], got {}",
            key, value
        )))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialiserConfig {
    pub method: String,
    #[serde(default)]
    pub params: Parameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationConfig {
    pub weight: f64,
    #[serde(rename = "type")]
    pub op_type: String,
    #[serde(default)]
    pub params: Parameters,
}

/// Loadable description of a full generator: the initialiser plus the
/// weighted operator set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub init: InitialiserConfig,
    pub operations: Vec<OperationConfig>,
}

impl GeneratorConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TransForgeError::Config(format!(
                "cannot read generator config {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            TransForgeError::FileFormat(format!(
                "malformed generator config {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_access_and_defaults() {
        let params = Parameters::new()
            .with("phrase-permutation-decay", 0.5)
            .with("file", "state.json");

        assert_eq!(params.get_float("phrase-permutation-decay").unwrap(), 0.5);
        assert_eq!(params.get_str("file").unwrap(), "state.json");
        assert_eq!(
            params.get_float_or("right-move-preference", 0.5).unwrap(),
            0.5
        );
        assert!(params.get_float("missing").is_err());
    }

    #[test]
    fn unparsable_value_names_the_key() {
        let params = Parameters::new().with("swap-distance-decay", "fast");
        let err = params.get_float("swap-distance-decay").unwrap_err();
        assert!(err.to_string().contains("swap-distance-decay"));
    }

    #[test]
    fn decay_bounds() {
        assert!(validate_decay(0.5, "d").is_ok());
        assert!(validate_decay(0.0, "d").is_err());
        assert!(validate_decay(1.0, "d").is_err());
        assert!(validate_decay(-0.1, "d").is_err());
    }

    #[test]
    fn generator_config_from_json() {
        let json = r#"{
            "init": { "method": "monotonic" },
            "operations": [
                { "weight": 1.0, "type": "change-phrase-translation" },
                {
                    "weight": 2.0,
                    "type": "permute-phrases",
                    "params": { "phrase-permutation-decay": "0.5" }
                }
            ]
        }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.init.method, "monotonic");
        assert_eq!(config.operations.len(), 2);
        assert_eq!(config.operations[1].op_type, "permute-phrases");
        assert_eq!(
            config.operations[1]
                .params
                .get_float("phrase-permutation-decay")
                .unwrap(),
            0.5
        );
    }
}
