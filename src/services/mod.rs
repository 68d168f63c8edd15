//! External collaborators
//!
//! The animation engine that actually performs drags and close animations
//! is a black box from the core's point of view: the controller only ever
//! observes its discrete events.

pub mod animator;

pub use animator::{SheetAnimator, DEFAULT_ANIMATION_FRAMES};
