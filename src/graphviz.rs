//! GraphViz `dot` output for state diagrams.

use std::borrow::Cow;
use std::io;
use crate::lr0::{Automaton, StateId};

struct Diagram<'a>(&'a Automaton);

/// Edges are referred to by their index in [`Automaton::edges`].
type EdgeIx = usize;

impl<'a> dot::GraphWalk<'a, StateId, EdgeIx> for Diagram<'a> {
  fn nodes(&'a self) -> dot::Nodes<'a, StateId> {
    self.0.states().iter().map(|state| state.id).collect()
  }

  fn edges(&'a self) -> dot::Edges<'a, EdgeIx> {
    (0..self.0.edges().len()).collect()
  }

  fn source(&'a self, edge: &EdgeIx) -> StateId {
    self.0.edges()[*edge].source
  }

  fn target(&'a self, edge: &EdgeIx) -> StateId {
    self.0.edges()[*edge].target
  }
}

impl<'a> dot::Labeller<'a, StateId, EdgeIx> for Diagram<'a> {
  fn graph_id(&'a self) -> dot::Id<'a> {
    dot::Id::new("lr0").expect("`lr0` is a valid dot identifier")
  }

  fn node_id(&'a self, node: &StateId) -> dot::Id<'a> {
    dot::Id::new(format!("I{}", node)).expect("`I<n>` is a valid dot identifier")
  }

  fn node_label(&'a self, node: &StateId) -> dot::LabelText<'a> {
    let grammar = self.0.grammar();
    let mut label = format!("I{}\\n", node);
    if let Some(state) = self.0.state(*node) {
      for item in &state.items {
        label.push_str(&item.display(grammar).to_string());
        label.push_str("\\l");
      }
    }
    dot::LabelText::EscStr(Cow::Owned(label))
  }

  fn node_shape(&'a self, node: &StateId) -> Option<dot::LabelText<'a>> {
    let accepting = self.0.state(*node).map_or(false, |state| state.is_accepting());
    let shape = if accepting { "doubleoctagon" } else { "box" };
    Some(dot::LabelText::LabelStr(Cow::Borrowed(shape)))
  }

  fn edge_label(&'a self, edge: &EdgeIx) -> dot::LabelText<'a> {
    let symbol = self.0.edges()[*edge].symbol;
    let name = self.0.grammar().symbol_name(symbol).to_owned();
    dot::LabelText::LabelStr(Cow::Owned(name))
  }
}

/// Writes the state diagram of `automaton` in `dot` format.
pub fn render<W: io::Write>(automaton: &Automaton, out: &mut W) -> io::Result<()> {
  dot::render(&Diagram(automaton), out)
}

pub fn to_dot(automaton: &Automaton) -> io::Result<String> {
  let mut buf = vec![];
  render(automaton, &mut buf)?;
  String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
