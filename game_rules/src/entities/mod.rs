//! Player state and the components it is built from.

mod components;
mod player;

pub use components::*;
pub use player::*;
