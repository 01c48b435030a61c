//! Per-frame animation behaviors
//!
//! Behaviors are bound once, after composition, into an immutable
//! [`BehaviorSet`]. Each tick the frame scheduler applies the set with the
//! current phase; a behavior overwrites its target outright instead of
//! accumulating deltas.

mod behavior;
mod set;

pub use behavior::{billboard_rotation, orbit_position, spin_rotation, AnimationBehavior, BehaviorTarget};
pub use set::{BehaviorDirective, BehaviorSet};

use thiserror::Error;

/// Reasons a behavior cannot be bound to a scene
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BehaviorBindingError {
    /// No node with this name or id
    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    /// No light with this name or id
    #[error("Unknown light '{0}'")]
    UnknownLight(String),

    /// Orbit can only move point lights
    #[error("Light '{0}' is not a point light")]
    NotAPointLight(String),

    /// Two behaviors write the same value
    #[error("Behaviors {first} and {second} both animate the {target}")]
    DuplicateTarget {
        /// Human-readable target
        target: String,
        /// Index of the behavior that claimed it first
        first: usize,
        /// Index of the conflicting behavior
        second: usize,
    },

    /// Parameter is out of range or not finite
    #[error("Behavior {index}: {reason}")]
    InvalidParameter {
        /// Behavior index
        index: usize,
        /// What is wrong
        reason: String,
    },
}

/// Result type for behavior binding
pub type BindingResult<T> = Result<T, BehaviorBindingError>;
