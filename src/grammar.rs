use std::fs;
use std::path::Path;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use crate::error::LoadError;

/// A grammar as handed over by a loader: plain names, nothing checked yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGrammar {
  pub initial: String,
  pub terminals: Vec<String>,
  pub non_terminals: Vec<String>,
  pub productions: Vec<RawProduction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProduction {
  pub left: String,
  #[serde(default)]
  pub right: Vec<String>,
}

pub fn prod(
  left: impl Into<String>,
  right: &[&str],
) -> RawProduction {
  RawProduction {
    left: left.into(),
    right: right.iter().map(|&s| s.to_owned()).collect(),
  }
}

pub fn grammar(
  terminals: &[&str],
  non_terminals: &[&str],
  initial: &str,
  productions: &[RawProduction],
) -> RawGrammar {
  RawGrammar {
    initial: initial.to_owned(),
    terminals: terminals.iter().map(|&s| s.to_owned()).collect(),
    non_terminals: non_terminals.iter().map(|&s| s.to_owned()).collect(),
    productions: productions.to_vec(),
  }
}

impl RawGrammar {
  pub fn from_json(text: &str) -> Result<Self, LoadError> {
    Ok(serde_json::from_str(text)?)
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    Self::from_json(&read(path.as_ref())?)
  }

  pub fn rules_from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    Self::parse_rules(&read(path.as_ref())?)
  }

  /// Reads rules written one per line as `A -> x y z`.
  ///
  /// The left side of the first rule is the start symbol. Every name that
  /// appears on a left side is a non-terminal, every other name is a
  /// terminal. Both are declared in order of first appearance. Blank lines
  /// and lines starting with `#` are skipped.
  pub fn parse_rules(text: &str) -> Result<Self, LoadError> {
    let mut productions = vec![];
    for (i, line) in text.lines().enumerate() {
      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }
      let (left, right) = line.split_once("->")
        .ok_or(LoadError::MissingArrow { line: i + 1 })?;
      let left = left.trim();
      if left.is_empty() || left.contains(char::is_whitespace) {
        return Err(LoadError::BadLeftSide { line: i + 1 });
      }
      productions.push(RawProduction {
        left: left.to_owned(),
        right: right.split_whitespace().map(str::to_owned).collect(),
      });
    }

    let non_terminals = productions.iter()
      .map(|p| p.left.clone())
      .collect::<IndexSet<_>>();
    let terminals = productions.iter()
      .flat_map(|p| &p.right)
      .filter(|s| !non_terminals.contains(*s))
      .cloned()
      .collect::<IndexSet<_>>();

    Ok(RawGrammar {
      initial: productions.first().map(|p| p.left.clone()).unwrap_or_default(),
      terminals: terminals.into_iter().collect(),
      non_terminals: non_terminals.into_iter().collect(),
      productions,
    })
  }
}

fn read(path: &Path) -> Result<String, LoadError> {
  fs::read_to_string(path).map_err(|source| LoadError::Io {
    path: path.to_owned(),
    source,
  })
}
