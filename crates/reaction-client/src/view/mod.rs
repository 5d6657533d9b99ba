//! Reaction view - display model projected from reaction state

mod renderer;

pub use renderer::{render, Badge, ReactionView};
