use std::fmt::{self, Display, Formatter};
use crate::bnf::*;

/// A production with a dot in it. `dot` counts the symbols already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
  pub prod: ProdId,
  pub dot: u32,
}

impl Item {
  pub fn new(prod: ProdId, dot: u32) -> Self {
    Item { prod, dot }
  }

  pub fn start(prod: ProdId) -> Self {
    Item { prod, dot: 0 }
  }

  /// Symbol right after the dot, if any.
  pub fn next_symbol(&self, grammar: &Grammar) -> Option<Symbol> {
    grammar.prod(self.prod).symbols.get(self.dot as usize).copied()
  }

  pub fn is_complete(&self, grammar: &Grammar) -> bool {
    self.dot as usize == grammar.prod(self.prod).symbols.len()
  }

  pub fn advance(&self) -> Self {
    Item {
      prod: self.prod,
      dot: self.dot + 1,
    }
  }

  pub fn display<'a>(&self, grammar: &'a Grammar) -> impl Display + 'a {
    grammar.display_item(self.prod, self.dot as usize)
  }
}

/// Set of items kept sorted by production then dot, so that two sets with
/// the same items compare and hash the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemSet {
  items: Vec<Item>,
}

impl ItemSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn contains(&self, item: &Item) -> bool {
    self.items.binary_search(item).is_ok()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Item> {
    self.items.iter()
  }

  pub fn as_slice(&self) -> &[Item] {
    &self.items
  }

  /// Completed items, i.e. the productions that can be reduced here.
  pub fn completed<'a>(
    &'a self,
    grammar: &'a Grammar,
  ) -> impl Iterator<Item = ProdId> + 'a {
    self.items.iter()
      .filter(move |item| item.is_complete(grammar))
      .map(|item| item.prod)
  }
}

impl FromIterator<Item> for ItemSet {
  fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
    let mut items = iter.into_iter().collect::<Vec<_>>();
    items.sort_unstable();
    items.dedup();
    ItemSet { items }
  }
}

impl<'a> IntoIterator for &'a ItemSet {
  type Item = &'a Item;
  type IntoIter = std::slice::Iter<'a, Item>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}

impl Display for ItemSet {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.debug_set()
      .entries(self.items.iter().map(|item| (item.prod.0, item.dot)))
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::{grammar, prod, RawGrammar};
  use pretty_assertions::assert_eq;

  #[test]
  fn canonical_order() {
    let a = vec![Item::new(ProdId(2), 1), Item::new(ProdId(0), 0), Item::new(ProdId(2), 0)]
      .into_iter()
      .collect::<ItemSet>();
    let b = vec![Item::new(ProdId(2), 0), Item::new(ProdId(2), 1), Item::new(ProdId(0), 0),
      Item::new(ProdId(2), 1)]
      .into_iter()
      .collect::<ItemSet>();

    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
    assert_eq!(a.as_slice(), &[
      Item::new(ProdId(0), 0),
      Item::new(ProdId(2), 0),
      Item::new(ProdId(2), 1),
    ]);
    assert!(a.contains(&Item::new(ProdId(2), 0)));
    assert!(!a.contains(&Item::new(ProdId(1), 0)));
    assert_eq!(a.to_string(), "{(0, 0), (2, 0), (2, 1)}");
  }

  #[test]
  fn next_symbol_and_completion() {
    let raw = RawGrammar::parse_rules("S -> a S\nS ->").unwrap();
    let g = Grammar::validate(&raw).unwrap().augment();
    let a = g.lookup("a").unwrap();
    let s = g.lookup("S").unwrap();

    let item = Item::start(ProdId(1));
    assert_eq!(item.next_symbol(&g), Some(a));
    assert_eq!(item.advance().next_symbol(&g), Some(s));
    assert!(item.advance().advance().is_complete(&g));
    assert_eq!(item.advance().advance().next_symbol(&g), None);
    assert_eq!(item.advance().display(&g).to_string(), "S -> a . S");

    let eps = Item::start(ProdId(2));
    assert!(eps.is_complete(&g));
    assert_eq!(eps.display(&g).to_string(), "S -> .");
  }

  #[test]
  fn dot_past_u16() {
    let right = vec!["a"; 70_000];
    let raw = grammar(&["a"], &["S"], "S", &[prod("S", &right)]);
    let g = Grammar::validate(&raw).unwrap().augment();

    let item = Item::new(ProdId(1), 65_535).advance();
    assert_eq!(item.dot, 65_536);
    assert_eq!(item.next_symbol(&g), g.lookup("a"));
    assert!(Item::new(ProdId(1), 70_000).is_complete(&g));
  }
}
