//! # Tweenlet
//!
//! A tick-driven tweening engine.
//!
//! A [`Tween`] interpolates from a start value to an end value along one of
//! the curves in [`EasingKind`]. A [`Registry`] owns the live tweens, advances
//! them once per host frame and reaps the ones that finish. Progress is
//! reported through `on_playing` and `on_complete` callbacks.
//!
//! ```
//! use tweenlet::prelude::*;
//!
//! let registry = Registry::new();
//! let tween = Tween::with_easing(0.0, 10.0, 1.0, EasingKind::EaseInQuad).into_handle();
//! registry.register(&tween).unwrap();
//! tween.play();
//!
//! registry.advance(0.5).unwrap();
//! assert_eq!(tween.value(), 2.5);
//! ```

pub mod animation;
pub mod core;
pub mod prelude;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ConfigPreset, RegistryConfig, TweenDefaults},
    vector::{Vec2, Vec3},
};

pub use animation::{
    easing::{evaluate, EasingKind},
    registry::{Positionable, Positionable2d, Registry, TickReport, WeakRegistry},
    tweening::{TickOutcome, Tickable, Tween, TweenHandle, TweenState, Tweenable},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TweenError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TweenError {
    #[error("Unsupported easing kind: {0}")]
    UnsupportedEasing(String),

    #[error("Invalid duration {0}: must be non-negative")]
    InvalidDuration(f64),

    #[error("Invalid tick delta {0}: must be finite and non-negative")]
    InvalidDelta(f64),

    #[error("Invalid time scale {0}: must be finite and non-negative")]
    InvalidTimeScale(f64),

    #[error("Tween is already registered")]
    AlreadyRegistered,

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = TweenError;

/// Install `env_logger` as the `log` backend, honoring `RUST_LOG`
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
