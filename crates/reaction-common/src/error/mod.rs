//! Viewer-facing error types

mod notice;

pub use notice::Notice;
