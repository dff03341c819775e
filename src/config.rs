use std::fs;
use std::path::Path;
use serde::Deserialize;
use crate::error::LoadError;

/// Knobs for automaton construction. None of them changes the automaton
/// that gets built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
  /// Past this many states the automaton carries a
  /// [`StateLimitExceeded`](crate::Advisory::StateLimitExceeded) advisory.
  pub state_count_warning_threshold: usize,
  /// Give up once the automaton would need more states than this.
  pub max_states: Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      state_count_warning_threshold: 32,
      max_states: None,
    }
  }
}

impl Config {
  pub fn from_json(text: &str) -> Result<Self, LoadError> {
    Ok(serde_json::from_str(text)?)
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
      path: path.to_owned(),
      source,
    })?;
    Self::from_json(&text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn defaults() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    assert_eq!(Config::default().state_count_warning_threshold, 32);
  }

  #[test]
  fn camel_case_keys() {
    let config = Config::from_json(r#"{
      "stateCountWarningThreshold": 8,
      "maxStates": 100
    }"#).unwrap();

    assert_eq!(config, Config {
      state_count_warning_threshold: 8,
      max_states: Some(100),
    });
  }
}
