use std::fmt::{self, Display, Formatter};
use crate::bnf::*;
use super::item::ItemSet;
use super::state::{State, StateId};

/// An LR(0) ambiguity. Reported only; LR(0) has no lookahead to pick a side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
  /// A state completes a production and can also shift a terminal.
  ShiftReduce {
    state: StateId,
    productions: Vec<ProdId>,
    terminals: Vec<TermId>,
  },
  /// A state completes more than one production.
  ReduceReduce {
    state: StateId,
    productions: Vec<ProdId>,
  },
}

impl Conflict {
  pub fn state(&self) -> StateId {
    match self {
      Conflict::ShiftReduce { state, .. }
      | Conflict::ReduceReduce { state, .. } => *state,
    }
  }

  pub fn productions(&self) -> &[ProdId] {
    match self {
      Conflict::ShiftReduce { productions, .. }
      | Conflict::ReduceReduce { productions, .. } => productions,
    }
  }

  pub fn display<'a>(&'a self, grammar: &'a Grammar) -> DisplayConflict<'a> {
    DisplayConflict {
      grammar,
      conflict: self,
    }
  }
}

/// Productions completed by the items of a state, ascending.
pub fn completed(grammar: &Grammar, items: &ItemSet) -> Vec<ProdId> {
  let mut prods = items.completed(grammar).collect::<Vec<_>>();
  prods.dedup();
  prods
}

/// Looks for shift/reduce and reduce/reduce conflicts in every state.
///
/// The accept item `S' -> S .` counts as a reduction like any other.
pub fn analyze(states: &[State]) -> Vec<Conflict> {
  let mut conflicts = vec![];

  for state in states {
    let reductions = &state.completed;
    if reductions.is_empty() {
      continue;
    }

    if reductions.len() > 1 {
      conflicts.push(Conflict::ReduceReduce {
        state: state.id,
        productions: reductions.clone(),
      });
    }

    let terminals = state.transitions.keys()
      .filter_map(|sym| match *sym {
        Symbol::Term(id) => Some(id),
        Symbol::Nonterm(_) => None,
      })
      .collect::<Vec<_>>();
    if !terminals.is_empty() {
      conflicts.push(Conflict::ShiftReduce {
        state: state.id,
        productions: reductions.clone(),
        terminals,
      });
    }
  }

  conflicts
}

pub struct DisplayConflict<'a> {
  grammar: &'a Grammar,
  conflict: &'a Conflict,
}

impl Display for DisplayConflict<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let prods = self.conflict.productions().iter()
      .map(|p| p.0.to_string())
      .collect::<Vec<_>>()
      .join(", ");
    match self.conflict {
      Conflict::ShiftReduce { terminals, .. } => {
        let terminals = terminals.iter()
          .map(|&t| self.grammar.term_name(t))
          .collect::<Vec<_>>()
          .join(", ");
        write!(f, "shift/reduce: shift {}, reduce {}", terminals, prods)
      }
      Conflict::ReduceReduce { .. } => write!(f, "reduce/reduce: reduce {}", prods),
    }
  }
}
