use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a raw grammar was rejected. Production indices refer to the position
/// of the production in the input, starting at 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
  #[error("start symbol `{symbol}` is not a declared non-terminal")]
  InvalidStart { symbol: String },
  #[error("symbol `{symbol}` is declared more than once")]
  DuplicateSymbol { symbol: String },
  #[error("production {production}: left side `{symbol}` is not a declared non-terminal")]
  InvalidLeftSide { symbol: String, production: usize },
  #[error("production {production}: symbol `{symbol}` is not declared")]
  UndeclaredSymbol { symbol: String, production: usize },
  #[error("no production has the start symbol `{symbol}` on its left side")]
  NoStartProduction { symbol: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarErrorKind {
  InvalidStart,
  DuplicateSymbol,
  InvalidLeftSide,
  UndeclaredSymbol,
  NoStartProduction,
}

impl GrammarError {
  pub fn kind(&self) -> GrammarErrorKind {
    match self {
      GrammarError::InvalidStart { .. } => GrammarErrorKind::InvalidStart,
      GrammarError::DuplicateSymbol { .. } => GrammarErrorKind::DuplicateSymbol,
      GrammarError::InvalidLeftSide { .. } => GrammarErrorKind::InvalidLeftSide,
      GrammarError::UndeclaredSymbol { .. } => GrammarErrorKind::UndeclaredSymbol,
      GrammarError::NoStartProduction { .. } => GrammarErrorKind::NoStartProduction,
    }
  }

  /// The offending symbol name.
  pub fn symbol(&self) -> &str {
    match self {
      GrammarError::InvalidStart { symbol }
      | GrammarError::DuplicateSymbol { symbol }
      | GrammarError::InvalidLeftSide { symbol, .. }
      | GrammarError::UndeclaredSymbol { symbol, .. }
      | GrammarError::NoStartProduction { symbol } => symbol,
    }
  }

  pub fn production(&self) -> Option<usize> {
    match self {
      GrammarError::InvalidLeftSide { production, .. }
      | GrammarError::UndeclaredSymbol { production, .. } => Some(*production),
      _ => None,
    }
  }
}

/// Input that never made it to a grammar.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("malformed grammar: {0}")]
  Malformed(#[from] serde_json::Error),
  #[error("line {line}: expected `->`")]
  MissingArrow { line: usize },
  #[error("line {line}: left side must be a single symbol")]
  BadLeftSide { line: usize },
  #[error("cannot read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
  #[error("automaton needs more than {limit} states")]
  StateBudgetExceeded { limit: usize },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Load(#[from] LoadError),
  #[error(transparent)]
  Grammar(#[from] GrammarError),
  #[error(transparent)]
  Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn messages_name_the_symbol() {
    let err = GrammarError::UndeclaredSymbol {
      symbol: "x".to_owned(),
      production: 2,
    };
    assert_eq!(err.to_string(), "production 2: symbol `x` is not declared");
    assert_eq!(err.kind(), GrammarErrorKind::UndeclaredSymbol);
    assert_eq!(err.symbol(), "x");
    assert_eq!(err.production(), Some(2));
  }
}
