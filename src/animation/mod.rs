pub mod clock;
pub mod easing;
pub mod registry;
pub mod tweening;

// Re-export commonly used types and functions for convenience
pub use clock::FrameClock;
pub use easing::{evaluate, EasingKind};
pub use registry::{
    Positionable, Positionable2d, Registry, SharedTickable, TickReport, WeakRegistry,
};
pub use tweening::{
    FloatTween, StopSignal, TickOutcome, Tickable, Tween, TweenHandle, TweenState, Tweenable,
    Vec2Tween, Vec3Tween,
};
