//! Backend ports - what the client needs from the server

mod api;

pub use api::{ContentApi, ReactionApi};
