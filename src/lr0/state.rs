use std::fmt::{self, Display, Formatter};
use std::iter;
use indexmap::IndexMap;
use tracing::{debug, warn};
use crate::bnf::*;
use crate::config::Config;
use crate::error::BuildError;
use super::closure::closure;
use super::conflict::{self, Conflict};
use super::goto::goto;
use super::item::{Item, ItemSet};

/// Index of a state, in discovery order. `0` is the start state.
pub type StateId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
  pub id: StateId,
  pub items: ItemSet,
  /// symbol -> target state, in symbol order
  pub transitions: IndexMap<Symbol, StateId>,
  /// productions reduced here, ascending
  pub completed: Vec<ProdId>,
}

impl State {
  pub fn is_accepting(&self) -> bool {
    !self.completed.is_empty()
  }

  pub fn name(&self) -> String {
    format!("I{}", self.id)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
  pub source: StateId,
  pub symbol: Symbol,
  pub target: StateId,
}

/// Something the consumer of an automaton should know about that does not
/// make the automaton wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
  StateLimitExceeded { threshold: usize, states: usize },
}

impl Display for Advisory {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Advisory::StateLimitExceeded { threshold, states } => write!(f,
        "{} states exceed the warning threshold of {}", states, threshold),
    }
  }
}

/// The LR(0) automaton of an augmented grammar. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
  grammar: Grammar,
  states: Vec<State>,
  edges: Vec<Edge>,
  advisories: Vec<Advisory>,
  conflicts: Vec<Conflict>,
}

impl Automaton {
  /// Builds the automaton, augmenting `grammar` first if needed.
  pub fn build(grammar: Grammar, config: &Config) -> Result<Automaton, BuildError> {
    Builder::new(grammar, config).finish()
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn start(&self) -> StateId {
    0
  }

  pub fn states(&self) -> &[State] {
    &self.states
  }

  pub fn state(&self, id: StateId) -> Option<&State> {
    self.states.get(id as usize)
  }

  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  pub fn transition(&self, from: StateId, symbol: Symbol) -> Option<StateId> {
    self.state(from)?.transitions.get(&symbol).copied()
  }

  /// The state whose item set is exactly `items`.
  pub fn find_state(&self, items: &ItemSet) -> Option<StateId> {
    self.states.iter()
      .find(|state| state.items == *items)
      .map(|state| state.id)
  }

  pub fn advisories(&self) -> &[Advisory] {
    &self.advisories
  }

  pub fn conflicts(&self) -> &[Conflict] {
    &self.conflicts
  }

  pub fn conflicts_in(&self, id: StateId) -> impl Iterator<Item = &Conflict> + '_ {
    self.conflicts.iter().filter(move |c| c.state() == id)
  }

  pub fn is_lr0(&self) -> bool {
    self.conflicts.is_empty()
  }
}

/// Builds an automaton one state at a time.
///
/// States are explored in the order they were found. Each call to
/// [`step`](Builder::step) explores exactly one of them, so a caller can stop
/// between any two steps.
pub struct Builder<'c> {
  grammar: Grammar,
  config: &'c Config,
  /// item set -> transitions, indexed by state id
  states: IndexMap<ItemSet, IndexMap<Symbol, StateId>>,
  edges: Vec<Edge>,
  /// states before this one have been explored
  next: usize,
}

impl<'c> Builder<'c> {
  pub fn new(grammar: Grammar, config: &'c Config) -> Self {
    let grammar = grammar.augment();
    let start = closure(&grammar, iter::once(Item::start(ProdId(0))));
    debug!(items = start.len(), "start state");

    let mut states = IndexMap::new();
    states.insert(start, IndexMap::new());

    Builder {
      grammar,
      config,
      states,
      edges: vec![],
      next: 0,
    }
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  /// States found so far, explored or not.
  pub fn num_states(&self) -> usize {
    self.states.len()
  }

  pub fn is_done(&self) -> bool {
    self.next >= self.states.len()
  }

  pub fn edges(&self) -> &[Edge] {
    &self.edges
  }

  /// Explores the next state. Returns `false` when there was none left.
  pub fn step(&mut self) -> bool {
    let items = match self.states.get_index(self.next) {
      Some((items, _)) => items.clone(),
      None => return false,
    };
    let source = self.next as StateId;

    let mut transitions = IndexMap::new();
    for symbol in self.grammar.symbols() {
      let target_items = goto(&self.grammar, &items, symbol);
      if target_items.is_empty() {
        continue;
      }

      let target = match self.states.get_index_of(&target_items) {
        Some(target) => target as StateId,
        None => {
          let (target, _) = self.states.insert_full(target_items, IndexMap::new());
          debug!(
            state = target,
            from = source,
            on = self.grammar.symbol_name(symbol),
            "new state");
          target as StateId
        }
      };

      transitions.insert(symbol, target);
      self.edges.push(Edge { source, symbol, target });
    }

    if let Some((_, slot)) = self.states.get_index_mut(self.next) {
      *slot = transitions;
    }
    self.next += 1;
    true
  }

  /// Explores every remaining state and analyzes the result.
  ///
  /// Fails once more than `max_states` states have been found. The budget is
  /// checked after each step, so the builder never stops inside one.
  pub fn finish(mut self) -> Result<Automaton, BuildError> {
    while self.step() {
      if let Some(limit) = self.config.max_states {
        if self.states.len() > limit {
          return Err(BuildError::StateBudgetExceeded { limit });
        }
      }
    }

    let grammar = self.grammar;
    let states = self.states.into_iter()
      .enumerate()
      .map(|(id, (items, transitions))| {
        let completed = conflict::completed(&grammar, &items);
        State {
          id: id as StateId,
          items,
          transitions,
          completed,
        }
      })
      .collect::<Vec<_>>();

    let mut advisories = vec![];
    let threshold = self.config.state_count_warning_threshold;
    if states.len() > threshold {
      warn!(states = states.len(), threshold, "automaton is large");
      advisories.push(Advisory::StateLimitExceeded {
        threshold,
        states: states.len(),
      });
    }

    let conflicts = conflict::analyze(&states);
    if !conflicts.is_empty() {
      warn!(count = conflicts.len(), "grammar is not LR(0)");
    }
    debug!(states = states.len(), edges = self.edges.len(), "automaton built");

    Ok(Automaton {
      grammar,
      states,
      edges: self.edges,
      advisories,
      conflicts,
    })
  }
}
