use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use pretty_assertions::assert_eq;
use lr0::grammar::{grammar, prod};
use lr0::lr0::{closure, goto};
use lr0::{
  Automaton, Config, Conflict, Error, GrammarErrorKind, Item, LoadError, ProdId, RawGrammar,
  Symbol,
};

fn grammar_file(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("grammars")
    .join(name)
}

fn expr() -> Automaton {
  let raw = RawGrammar::from_path(grammar_file("expr.json")).unwrap();
  lr0::build(&raw, &Config::default()).unwrap()
}

fn lists() -> Automaton {
  let raw = RawGrammar::rules_from_path(grammar_file("lists.txt")).unwrap();
  lr0::build(&raw, &Config::default()).unwrap()
}

fn sym(a: &Automaton, name: &str) -> Symbol {
  a.grammar().lookup(name).unwrap()
}

#[test]
fn expression_grammar() {
  let a = expr();

  assert_eq!(a.states().len(), 12);
  assert_eq!(a.edges().len(), 22);

  // E' -> E . meets E -> E . + T, then E -> T . and E -> E + T . both
  // meet T -> T . * F
  let kinds = a.conflicts().iter()
    .map(|c| matches!(c, Conflict::ShiftReduce { .. }))
    .collect::<Vec<_>>();
  assert_eq!(kinds, vec![true, true, true]);
  let shifts = a.conflicts().iter()
    .map(|c| a.state(c.state()).unwrap().transitions.keys().copied().collect::<Vec<_>>())
    .collect::<Vec<_>>();
  assert_eq!(shifts, vec![vec![sym(&a, "+")], vec![sym(&a, "*")], vec![sym(&a, "*")]]);

  let after_e = a.transition(a.start(), sym(&a, "E")).unwrap();
  assert_eq!(a.conflicts()[0].state(), after_e);
  assert_eq!(a.conflicts()[0].productions(), &[ProdId(0)]);

  let after_t = a.transition(a.start(), sym(&a, "T")).unwrap();
  assert_eq!(a.state(after_t).unwrap().completed, vec![ProdId(2)]);
}

#[test]
fn deterministic() {
  assert_eq!(expr(), expr());
  assert_eq!(lists(), lists());
}

#[test]
fn goto_is_total() {
  for a in [expr(), lists()] {
    let g = a.grammar();
    for state in a.states() {
      for symbol in g.symbols() {
        let target = goto(g, &state.items, symbol);
        if target.is_empty() {
          assert_eq!(a.transition(state.id, symbol), None);
        } else {
          let id = a.find_state(&target);
          assert!(id.is_some(), "goto(I{}, {}) is not a state", state.id, g.symbol_name(symbol));
          assert_eq!(a.transition(state.id, symbol), id);
        }
      }
    }
  }
}

#[test]
fn every_state_is_reachable() {
  for a in [expr(), lists()] {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(a.start());
    queue.push_back(a.start());

    while let Some(id) = queue.pop_front() {
      for edge in a.edges().iter().filter(|e| e.source == id) {
        if seen.insert(edge.target) {
          queue.push_back(edge.target);
        }
      }
    }

    assert_eq!(seen.len(), a.states().len());
  }
}

#[test]
fn states_are_closed_and_distinct() {
  for a in [expr(), lists()] {
    let g = a.grammar();
    let mut sets = HashSet::new();
    for state in a.states() {
      assert_eq!(closure(g, state.items.iter().copied()), state.items);
      assert!(sets.insert(state.items.clone()));
    }
  }
}

#[test]
fn at_most_one_edge_per_symbol() {
  for a in [expr(), lists()] {
    let mut seen = HashSet::new();
    for edge in a.edges() {
      assert!(seen.insert((edge.source, edge.symbol)));
    }
  }
}

#[test]
fn acceptance_means_a_completed_item() {
  for a in [expr(), lists()] {
    let g = a.grammar();
    for state in a.states() {
      let complete = state.items.iter()
        .filter(|item| item.is_complete(g))
        .map(|item| item.prod)
        .collect::<Vec<_>>();
      assert_eq!(state.is_accepting(), !complete.is_empty());
      assert_eq!(state.completed, complete);
    }
  }
}

#[test]
fn single_terminal() {
  let raw = grammar(&["a"], &["S"], "S", &[prod("S", &["a"])]);
  let a = lr0::build(&raw, &Config::default()).unwrap();
  let g = a.grammar();

  assert_eq!(a.states().len(), 3);
  let start = a.state(a.start()).unwrap();
  assert_eq!(
    start.items.iter().map(|i| i.display(g).to_string()).collect::<Vec<_>>(),
    vec!["S' -> . S", "S -> . a"]);
  assert!(!start.is_accepting());

  let on_s = a.state(a.transition(a.start(), sym(&a, "S")).unwrap()).unwrap();
  assert_eq!(on_s.completed, vec![ProdId(0)]);

  let on_a = a.state(a.transition(a.start(), sym(&a, "a")).unwrap()).unwrap();
  assert_eq!(on_a.completed, vec![ProdId(1)]);
}

#[test]
fn epsilon_completes_without_input() {
  let a = lists();
  let g = a.grammar();
  let epsilon = (0..g.prods().len() as u32)
    .map(ProdId)
    .find(|&p| g.prod(p).symbols.is_empty())
    .unwrap();

  let start = a.state(a.start()).unwrap();
  assert!(start.items.contains(&Item::start(epsilon)));
  assert!(start.completed.contains(&epsilon));

  for state in a.states() {
    if state.items.contains(&Item::start(epsilon)) {
      assert!(state.completed.contains(&epsilon));
    }
  }
  // `I -> .` next to `I -> . x`
  assert!(!a.is_lr0());
}

#[test]
fn invalid_start_builds_nothing() {
  let raw = RawGrammar::from_path(grammar_file("bad_start.json")).unwrap();
  match lr0::build(&raw, &Config::default()) {
    Err(Error::Grammar(e)) => {
      assert_eq!(e.kind(), GrammarErrorKind::InvalidStart);
      assert_eq!(e.symbol(), "X");
    }
    other => panic!("expected InvalidStart, got {:?}", other),
  }
}

#[test]
fn missing_file() {
  let err = RawGrammar::from_path(grammar_file("nope.json")).unwrap_err();
  assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn duplicate_right_sides() {
  let raw = grammar(&["a"], &["S"], "S", &[
    prod("S", &["a"]),
    prod("S", &["a"]),
  ]);
  let a = lr0::build(&raw, &Config::default()).unwrap();

  let state = a.transition(a.start(), sym(&a, "a")).unwrap();
  assert_eq!(a.conflicts(), &[Conflict::ReduceReduce {
    state,
    productions: vec![ProdId(1), ProdId(2)],
  }]);
}
