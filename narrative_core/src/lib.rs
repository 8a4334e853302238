//! # Narrative Core
//!
//! The story engine for Starship Odyssey. This crate drives `game_rules`,
//! holds the scene graph for each narrative, and exposes the session contract
//! that presentation shells call into.
//!
//! ## Core Components
//!
//! - **scene**: Scenes, guarded choices, and the effects they apply
//! - **story**: The finite scene graph per narrative and its transition function
//! - **encounter**: Combat entry points and where each outcome leads
//! - **ending**: Terminal scenes and their closing text
//! - **session**: One playthrough and the views handed to shells
//!
//! ## Design Philosophy
//!
//! - **Data-Driven**: Scene flow is a graph of ids, not a chain of calls
//! - **Injected Randomness**: Every random branch goes through a `DamageRoller`
//! - **Outcomes, Not Faults**: Endings and defeat are values; errors are only for bad input

pub mod encounter;
pub mod ending;
pub mod error;
pub mod scene;
pub mod session;
pub mod story;

pub use encounter::*;
pub use ending::*;
pub use error::*;
pub use scene::*;
pub use session::*;
pub use story::*;
