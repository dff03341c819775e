use tracing::trace;
use crate::bnf::*;
use super::closure::closure;
use super::item::{Item, ItemSet};

/// Moves the dot over `symbol` in every item that allows it and closes the
/// result. An empty set means there is no transition on `symbol`.
pub fn goto(
  grammar: &Grammar,
  state: &ItemSet,
  symbol: Symbol,
) -> ItemSet {
  let kernel = state.iter()
    .filter(|item| item.next_symbol(grammar) == Some(symbol))
    .map(Item::advance)
    .collect::<Vec<_>>();

  if kernel.is_empty() {
    return ItemSet::new();
  }

  trace!(symbol = grammar.symbol_name(symbol), kernel = kernel.len(), "goto");
  closure(grammar, kernel)
}
