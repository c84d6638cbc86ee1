//! Systems - per-frame logic that operates on the word arena

mod collector;
mod falling;
mod helpers;
mod spawning;
mod typing;

pub use collector::*;
pub use falling::*;
pub use helpers::*;
pub use spawning::*;
pub use typing::*;
