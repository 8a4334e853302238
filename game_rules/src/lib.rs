//! # Game Rules
//!
//! The rules crate for Starship Odyssey - player state, damage rolls, and the
//! turn-based combat resolver. It knows nothing about scenes or story text;
//! `narrative_core` drives it.

pub mod entities;
pub mod error;
pub mod mechanics;

pub use entities::*;
pub use error::*;
pub use mechanics::*;
