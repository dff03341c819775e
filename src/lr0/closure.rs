use indexmap::IndexSet;
use tracing::trace;
use crate::bnf::*;
use super::bitset::BitSet;
use super::item::{Item, ItemSet};

/// Adds `B -> . γ` for every item with `B` right after its dot, until
/// nothing more can be added.
pub fn closure(
  grammar: &Grammar,
  items: impl IntoIterator<Item = Item>,
) -> ItemSet {
  let mut set = items.into_iter().collect::<IndexSet<_>>();
  let kernel_len = set.len();
  // a non-terminal adds the same items every time, so expand each once
  let mut expanded = BitSet::new(grammar.num_nonterms());

  let mut i = 0;
  while i < set.len() {
    let item = set[i];
    i += 1;
    match item.next_symbol(grammar) {
      Some(Symbol::Nonterm(nonterm)) => {
        if expanded.insert(nonterm.0 as usize) {
          for &prod in grammar.prods_of(nonterm) {
            set.insert(Item::start(prod));
          }
        }
      }
      Some(Symbol::Term(_)) | None => {}
    }
  }

  trace!(kernel = kernel_len, closed = set.len(), "closure");
  set.into_iter().collect()
}
