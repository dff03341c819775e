//! What the automaton looks like from the outside: a serializable report
//! for renderers and a plain text listing.

use std::fmt::{self, Display, Formatter};
use serde::Serialize;
use crate::bnf::*;
use crate::lr0::{Advisory, Automaton, Conflict, StateId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
  pub start_id: StateId,
  pub productions: Vec<ProductionReport>,
  pub states: Vec<StateReport>,
  pub edges: Vec<EdgeReport>,
  pub conflicts: Vec<ConflictReport>,
  pub advisories: Vec<AdvisoryReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionReport {
  pub index: u32,
  pub left: String,
  pub right: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport {
  pub id: StateId,
  pub name: String,
  pub items: Vec<ItemReport>,
  pub is_acceptance: bool,
  pub completed_production_indices: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReport {
  pub production_index: u32,
  pub dot_position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeReport {
  pub source_id: StateId,
  pub target_id: StateId,
  pub symbol_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictKind {
  ShiftReduce,
  ReduceReduce,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
  pub state_id: StateId,
  pub kind: ConflictKind,
  pub production_indices: Vec<u32>,
  /// terminals that could be shifted instead, for shift/reduce
  pub terminals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AdvisoryReport {
  StateLimitExceeded { threshold: usize, states: usize },
}

impl Report {
  pub fn new(automaton: &Automaton) -> Report {
    let grammar = automaton.grammar();

    let productions = (0..grammar.prods().len() as u32)
      .map(|i| {
        let prod = grammar.prod(ProdId(i));
        ProductionReport {
          index: i,
          left: grammar.nonterm_name(prod.nonterm).to_owned(),
          right: prod.symbols.iter()
            .map(|&sym| grammar.symbol_name(sym).to_owned())
            .collect(),
        }
      })
      .collect();

    let states = automaton.states().iter()
      .map(|state| StateReport {
        id: state.id,
        name: state.name(),
        items: state.items.iter()
          .map(|item| ItemReport {
            production_index: item.prod.0,
            dot_position: item.dot,
          })
          .collect(),
        is_acceptance: state.is_accepting(),
        completed_production_indices: state.completed.iter().map(|p| p.0).collect(),
      })
      .collect();

    let edges = automaton.edges().iter()
      .map(|edge| EdgeReport {
        source_id: edge.source,
        target_id: edge.target,
        symbol_name: grammar.symbol_name(edge.symbol).to_owned(),
      })
      .collect();

    let conflicts = automaton.conflicts().iter()
      .map(|conflict| {
        let (kind, terminals) = match conflict {
          Conflict::ShiftReduce { terminals, .. } => (
            ConflictKind::ShiftReduce,
            terminals.iter().map(|&t| grammar.term_name(t).to_owned()).collect(),
          ),
          Conflict::ReduceReduce { .. } => (ConflictKind::ReduceReduce, vec![]),
        };
        ConflictReport {
          state_id: conflict.state(),
          kind,
          production_indices: conflict.productions().iter().map(|p| p.0).collect(),
          terminals,
        }
      })
      .collect();

    let advisories = automaton.advisories().iter()
      .map(|advisory| match *advisory {
        Advisory::StateLimitExceeded { threshold, states } =>
          AdvisoryReport::StateLimitExceeded { threshold, states },
      })
      .collect();

    Report {
      start_id: automaton.start(),
      productions,
      states,
      edges,
      conflicts,
      advisories,
    }
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}

impl From<&Automaton> for Report {
  fn from(automaton: &Automaton) -> Report {
    Report::new(automaton)
  }
}

/// Lists the productions, then every state with its items, transitions and
/// conflicts.
impl Display for Automaton {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let grammar = self.grammar();
    writeln!(f, "grammar (start {}):", grammar.nonterm_name(grammar.user_start()))?;
    for i in 0..grammar.prods().len() as u32 {
      writeln!(f, "  {}  {}", i, grammar.display_prod(ProdId(i)))?;
    }

    for state in self.states() {
      writeln!(f)?;
      write!(f, "{}:", state.name())?;
      let mut sep = " ";
      if state.completed.contains(&ProdId(0)) {
        write!(f, "{}accept", sep)?;
        sep = ", ";
      }
      let reductions = state.completed.iter()
        .filter(|&&p| p != ProdId(0))
        .map(|p| p.0.to_string())
        .collect::<Vec<_>>();
      if !reductions.is_empty() {
        write!(f, "{}reduce {}", sep, reductions.join(", "))?;
      }
      writeln!(f)?;

      for item in &state.items {
        writeln!(f, "  {}", item.display(grammar))?;
      }
      for (&symbol, &target) in &state.transitions {
        writeln!(f, "  on {} goto I{}", grammar.symbol_name(symbol), target)?;
      }
      for conflict in self.conflicts_in(state.id) {
        writeln!(f, "  conflict {}", conflict.display(grammar))?;
      }
    }

    if !self.advisories().is_empty() {
      writeln!(f)?;
    }
    for advisory in self.advisories() {
      writeln!(f, "warning: {}", advisory)?;
    }
    Ok(())
  }
}
