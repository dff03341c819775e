//! Builds LR(0) automatons from context-free grammars.
//!
//! ```
//! use lr0::{Config, RawGrammar};
//!
//! let raw = RawGrammar::parse_rules("S -> a").unwrap();
//! let automaton = lr0::build(&raw, &Config::default()).unwrap();
//! assert_eq!(automaton.states().len(), 3);
//! ```

pub mod grammar;
pub mod bnf;
pub mod error;
pub mod config;
pub mod lr0;
pub mod report;
#[cfg(feature = "dot")]
pub mod graphviz;

pub use bnf::{Grammar, NontermId, ProdId, Symbol, TermId};
pub use config::Config;
pub use error::{BuildError, Error, GrammarError, GrammarErrorKind, LoadError};
pub use grammar::{RawGrammar, RawProduction};
pub use lr0::{Advisory, Automaton, Conflict, Edge, Item, ItemSet, State, StateId};

/// Validates, augments and builds in one go.
pub fn build(raw: &RawGrammar, config: &Config) -> Result<Automaton, Error> {
  let grammar = Grammar::validate(raw)?;
  Ok(Automaton::build(grammar, config)?)
}
