//! LR(0) item sets and the automaton built from them.

mod bitset;
pub mod item;
pub mod closure;
pub mod goto;
pub mod state;
pub mod conflict;

pub use closure::closure;
pub use conflict::Conflict;
pub use goto::goto;
pub use item::{Item, ItemSet};
pub use state::{Advisory, Automaton, Builder, Edge, State, StateId};
