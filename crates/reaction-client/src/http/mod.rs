//! HTTP adapter for the social-network backend

mod client;
mod wire;

pub use client::HttpApi;
