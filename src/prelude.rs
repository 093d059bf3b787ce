//! Prelude module for common tweenlet types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tweenlet::prelude::*;`

pub use crate::core::{
    config::{ConfigPreset, RegistryConfig, TweenDefaults},
    vector::{Vec2, Vec3},
};

pub use crate::animation::{
    clock::FrameClock,
    easing::{evaluate, EasingKind},
    registry::{Positionable, Positionable2d, Registry, TickReport, WeakRegistry},
    tweening::{
        FloatTween, StopSignal, TickOutcome, Tickable, Tween, TweenHandle, TweenState, Tweenable,
        Vec2Tween, Vec3Tween,
    },
};

pub use crate::{Error as TweenError, Result};
