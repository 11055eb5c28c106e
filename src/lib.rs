//! Screenplay Studio — the core of a plain-text screenplay editor.
//!
//! Scans scripts for character cues and structural story beats, presents
//! them as psychology and mythology views, keeps a reorderable beat board,
//! and prepares imports, exports and continuation-suggestion requests for
//! whatever host (browser or native) drives the session.

pub mod core;
pub mod schema;

pub use crate::core::beat_board::BeatSequence;
pub use crate::core::scanner::{detect_structural_beats, extract_character_names};
pub use crate::core::session::{deliver_downloads, Effect, PanelView, Session};
