use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use tracing::debug;
use crate::error::GrammarError;
use crate::grammar::RawGrammar;

/// A validated grammar. Symbols and productions are referred to by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
  terms: Vec<String>,
  nonterms: Vec<Nonterm>,
  prods: Vec<Production>,
  start: NontermId,
  augmented: Option<NontermId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
  Term(TermId),
  Nonterm(NontermId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NontermId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProdId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonterm {
  pub name: String,
  pub prods: Vec<ProdId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
  pub nonterm: NontermId,
  /// empty for an epsilon production
  pub symbols: Vec<Symbol>,
}

impl Grammar {
  /// Checks a raw grammar and resolves its names. Stops at the first
  /// problem found.
  pub fn validate(raw: &RawGrammar) -> Result<Grammar, GrammarError> {
    let start = match raw.non_terminals.iter().position(|nt| *nt == raw.initial) {
      Some(i) => NontermId(i as u32),
      None => return Err(GrammarError::InvalidStart {
        symbol: raw.initial.clone(),
      }),
    };

    let mut names = HashMap::new();
    for (i, name) in raw.terminals.iter().enumerate() {
      if names.insert(name.as_str(), Symbol::Term(TermId(i as u32))).is_some() {
        return Err(GrammarError::DuplicateSymbol { symbol: name.clone() });
      }
    }
    for (i, name) in raw.non_terminals.iter().enumerate() {
      if names.insert(name.as_str(), Symbol::Nonterm(NontermId(i as u32))).is_some() {
        return Err(GrammarError::DuplicateSymbol { symbol: name.clone() });
      }
    }

    let mut nonterms = raw.non_terminals.iter()
      .map(|name| Nonterm { name: name.clone(), prods: vec![] })
      .collect::<Vec<_>>();
    let mut prods = Vec::with_capacity(raw.productions.len());

    for (i, prod) in raw.productions.iter().enumerate() {
      let nonterm = match names.get(prod.left.as_str()) {
        Some(&Symbol::Nonterm(id)) => id,
        _ => return Err(GrammarError::InvalidLeftSide {
          symbol: prod.left.clone(),
          production: i,
        }),
      };
      let symbols = prod.right.iter()
        .map(|name| names.get(name.as_str()).copied()
          .ok_or_else(|| GrammarError::UndeclaredSymbol {
            symbol: name.clone(),
            production: i,
          }))
        .collect::<Result<Vec<_>, _>>()?;

      nonterms[nonterm.0 as usize].prods.push(ProdId(i as u32));
      prods.push(Production { nonterm, symbols });
    }

    if nonterms[start.0 as usize].prods.is_empty() {
      return Err(GrammarError::NoStartProduction { symbol: raw.initial.clone() });
    }

    Ok(Grammar {
      terms: raw.terminals.clone(),
      nonterms,
      prods,
      start,
      augmented: None,
    })
  }

  /// Adds `S' -> S` as production 0, shifting the other productions up by
  /// one. `S'` is appended after the declared non-terminals.
  pub fn augment(mut self) -> Grammar {
    if self.augmented.is_some() {
      return self;
    }

    let name = self.fresh_name(&self.nonterms[self.start.0 as usize].name);
    let id = NontermId(self.nonterms.len() as u32);
    debug!(start = %name, "augmenting grammar");

    for nonterm in &mut self.nonterms {
      for prod in &mut nonterm.prods {
        prod.0 += 1;
      }
    }
    self.nonterms.push(Nonterm { name, prods: vec![ProdId(0)] });
    self.prods.insert(0, Production {
      nonterm: id,
      symbols: vec![Symbol::Nonterm(self.start)],
    });
    self.augmented = Some(id);
    self
  }

  /// `name` followed by as many `'` as it takes to not clash with any
  /// declared symbol.
  fn fresh_name(&self, name: &str) -> String {
    let mut fresh = format!("{}'", name);
    while self.terms.contains(&fresh)
      || self.nonterms.iter().any(|nt| nt.name == fresh) {
      fresh.push('\'');
    }
    fresh
  }

  pub fn is_augmented(&self) -> bool {
    self.augmented.is_some()
  }

  /// Where parsing begins: `S'` once augmented, the declared start before.
  pub fn entry(&self) -> NontermId {
    self.augmented.unwrap_or(self.start)
  }

  /// The start symbol the grammar was declared with.
  pub fn user_start(&self) -> NontermId {
    self.start
  }

  pub fn terms(&self) -> impl Iterator<Item = TermId> + '_ {
    (0..self.terms.len() as u32).map(TermId)
  }

  pub fn nonterms(&self) -> impl Iterator<Item = NontermId> + '_ {
    (0..self.nonterms.len() as u32).map(NontermId)
  }

  /// Terminals then non-terminals, each in declaration order.
  pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
    self.terms().map(Symbol::Term)
      .chain(self.nonterms().map(Symbol::Nonterm))
  }

  pub fn num_terms(&self) -> usize {
    self.terms.len()
  }

  pub fn num_nonterms(&self) -> usize {
    self.nonterms.len()
  }

  pub fn prods(&self) -> &[Production] {
    &self.prods
  }

  pub fn prod(&self, id: ProdId) -> &Production {
    &self.prods[id.0 as usize]
  }

  pub fn prods_of(&self, nonterm: NontermId) -> &[ProdId] {
    &self.nonterms[nonterm.0 as usize].prods
  }

  pub fn term_name(&self, id: TermId) -> &str {
    &self.terms[id.0 as usize]
  }

  pub fn nonterm_name(&self, id: NontermId) -> &str {
    &self.nonterms[id.0 as usize].name
  }

  pub fn symbol_name(&self, sym: Symbol) -> &str {
    match sym {
      Symbol::Term(id) => self.term_name(id),
      Symbol::Nonterm(id) => self.nonterm_name(id),
    }
  }

  pub fn lookup(&self, name: &str) -> Option<Symbol> {
    self.terms.iter().position(|t| t == name)
      .map(|i| Symbol::Term(TermId(i as u32)))
      .or_else(|| self.nonterms.iter().position(|nt| nt.name == name)
        .map(|i| Symbol::Nonterm(NontermId(i as u32))))
  }

  pub fn display_prod(&self, id: ProdId) -> DisplayProd<'_> {
    DisplayProd {
      grammar: self,
      prod: id,
      dot: None,
    }
  }

  pub(crate) fn display_item(&self, id: ProdId, dot: usize) -> DisplayProd<'_> {
    DisplayProd {
      grammar: self,
      prod: id,
      dot: Some(dot),
    }
  }
}

/// `A -> b C`, or `A -> b . C` when a dot is given.
pub struct DisplayProd<'a> {
  grammar: &'a Grammar,
  prod: ProdId,
  dot: Option<usize>,
}

impl Display for DisplayProd<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let prod = self.grammar.prod(self.prod);
    write!(f, "{} ->", self.grammar.nonterm_name(prod.nonterm))?;
    for (i, &sym) in prod.symbols.iter().enumerate() {
      if self.dot == Some(i) {
        write!(f, " .")?;
      }
      write!(f, " {}", self.grammar.symbol_name(sym))?;
    }
    match self.dot {
      Some(dot) if dot == prod.symbols.len() => write!(f, " ."),
      None if prod.symbols.is_empty() => write!(f, " ε"),
      _ => Ok(()),
    }
  }
}
