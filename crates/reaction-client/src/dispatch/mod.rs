//! Gesture dispatch - resolves clicks on a reaction control and admits at
//! most one in-flight submit per entity

mod dispatcher;
mod gesture;

pub use dispatcher::{GestureDispatcher, GestureOutcome};
pub use gesture::GestureTarget;
