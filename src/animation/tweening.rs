use crate::animation::easing::EasingKind;
use crate::core::config::TweenDefaults;
use crate::core::vector::{Vec2, Vec3};
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Represents a value that can be tweened component by component
pub trait Tweenable: Copy + fmt::Debug + 'static {
    /// Ease every component from `start` to `end` with the same curve and progress
    fn ease(kind: EasingKind, start: &Self, end: &Self, progress: f64) -> Self;
}

impl Tweenable for f64 {
    fn ease(kind: EasingKind, start: &Self, end: &Self, progress: f64) -> Self {
        kind.evaluate(*start, *end, progress)
    }
}

impl Tweenable for f32 {
    fn ease(kind: EasingKind, start: &Self, end: &Self, progress: f64) -> Self {
        kind.evaluate(*start as f64, *end as f64, progress) as f32
    }
}

impl Tweenable for Vec2 {
    fn ease(kind: EasingKind, start: &Self, end: &Self, progress: f64) -> Self {
        Vec2::new(
            kind.evaluate(start.x, end.x, progress),
            kind.evaluate(start.y, end.y, progress),
        )
    }
}

impl Tweenable for Vec3 {
    fn ease(kind: EasingKind, start: &Self, end: &Self, progress: f64) -> Self {
        Vec3::new(
            kind.evaluate(start.x, end.x, progress),
            kind.evaluate(start.y, end.y, progress),
            kind.evaluate(start.z, end.z, progress),
        )
    }
}

/// State of a tween animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenState {
    /// Constructed, `play` not called yet
    NotStarted,
    Playing,
    Paused,
    /// Completed, either by running out its duration or by `stop`
    Stopped,
}

/// What a tween reports back to the registry after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// Still playing
    Active,
    /// Not started or paused; no time accrued this tick
    Idle,
    /// Stopped; the registry reaps it
    Completed,
}

impl TickOutcome {
    pub fn is_completed(self) -> bool {
        self == TickOutcome::Completed
    }
}

/// Shared update contract the registry drives once per tick
pub trait Tickable {
    fn play(&mut self);
    fn pause(&mut self);
    /// Force completion. Fires the completion callback at most once.
    fn stop(&mut self);
    fn state(&self) -> TweenState;
    /// Total duration in seconds
    fn duration(&self) -> f64;
    /// Advance by `dt` seconds
    fn on_tick(&mut self, dt: f64) -> TickOutcome;
}

/// Stop request raised while a tween is busy in one of its own callbacks.
///
/// The tween honours it as soon as the callback returns.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Rc<Cell<bool>>);

impl StopSignal {
    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }

    fn take(&self) -> bool {
        self.0.replace(false)
    }
}

type PlayingCallback<T> = Box<dyn FnMut(&mut Tween<T>)>;
type CompleteCallback<T> = Box<dyn FnOnce(&mut Tween<T>)>;

/// A tween animation between two values
pub struct Tween<T: Tweenable> {
    /// Starting value
    pub start: T,
    /// Ending value
    pub end: T,
    /// Easing curve to follow
    pub kind: EasingKind,
    /// Animation duration in seconds
    pub duration: f64,
    value: T,
    elapsed: f64,
    state: TweenState,
    snap_to_end: bool,
    /// Set by the first `stop`; a replayed tween does not snap again
    completed_once: bool,
    stop_signal: StopSignal,
    on_playing: Option<PlayingCallback<T>>,
    on_complete: Option<CompleteCallback<T>>,
}

pub type FloatTween = Tween<f64>;
pub type Vec2Tween = Tween<Vec2>;
pub type Vec3Tween = Tween<Vec3>;

impl<T: Tweenable> Tween<T> {
    /// Create a new linear tween
    pub fn new(start: T, end: T, duration: f64) -> Self {
        Self::with_easing(start, end, duration, EasingKind::Linear)
    }

    /// Create a new tween with custom easing
    pub fn with_easing(start: T, end: T, duration: f64, kind: EasingKind) -> Self {
        Self {
            start,
            end,
            kind,
            duration,
            value: start,
            elapsed: 0.0,
            state: TweenState::NotStarted,
            snap_to_end: false,
            completed_once: false,
            stop_signal: StopSignal::default(),
            on_playing: None,
            on_complete: None,
        }
    }

    /// Create a tween using configured defaults for curve, duration and snapping
    pub fn from_defaults(start: T, end: T, defaults: &TweenDefaults) -> Self {
        Self::with_easing(start, end, defaults.duration, defaults.easing)
            .snap_to_end(defaults.snap_to_end)
    }

    /// Set the callback fired on every tick that produces a new value
    pub fn on_playing<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Tween<T>) + 'static,
    {
        self.on_playing = Some(Box::new(callback));
        self
    }

    /// Set the callback fired once when the tween stops
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut Tween<T>) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Write `end` and fire `on_playing` one last time on the completing tick
    pub fn snap_to_end(mut self, snap: bool) -> Self {
        self.snap_to_end = snap;
        self
    }

    pub fn set_on_playing<F>(&mut self, callback: F)
    where
        F: FnMut(&mut Tween<T>) + 'static,
    {
        self.on_playing = Some(Box::new(callback));
    }

    pub fn set_on_complete<F>(&mut self, callback: F)
    where
        F: FnOnce(&mut Tween<T>) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn set_easing(&mut self, kind: EasingKind) {
        self.kind = kind;
    }

    /// Wrap in a shared handle so it can be registered and still driven by the caller
    pub fn into_handle(self) -> TweenHandle<T> {
        TweenHandle::new(self)
    }

    /// Start or resume the animation
    pub fn play(&mut self) {
        if self.state != TweenState::Playing {
            self.state = TweenState::Playing;
        }
    }

    /// Pause the animation
    pub fn pause(&mut self) {
        if self.state == TweenState::Playing {
            self.state = TweenState::Paused;
        }
    }

    /// Stop the animation, jumping its clock to the end
    pub fn stop(&mut self) {
        if matches!(self.state, TweenState::NotStarted | TweenState::Stopped) {
            return;
        }

        self.state = TweenState::Stopped;
        self.elapsed = self.duration;
        self.completed_once = true;
        if let Some(callback) = self.on_complete.take() {
            callback(self);
        }
        self.stop_signal.take();
    }

    /// Advance the clock by `dt` seconds and recompute the value
    pub fn tick(&mut self, dt: f64) -> TickOutcome {
        if self.state != TweenState::Playing {
            return self.outcome();
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            if self.snap_to_end && !self.completed_once {
                self.value = self.end;
                self.notify_playing();
            }
            self.stop();
        } else {
            self.value = T::ease(self.kind, &self.start, &self.end, self.elapsed / self.duration);
            self.notify_playing();
            if self.stop_signal.take() {
                self.stop();
            }
        }

        self.outcome()
    }

    fn notify_playing(&mut self) {
        if let Some(mut callback) = self.on_playing.take() {
            callback(self);
            // The callback may have installed a replacement.
            if self.on_playing.is_none() {
                self.on_playing = Some(callback);
            }
        }
    }

    fn outcome(&self) -> TickOutcome {
        match self.state {
            TweenState::Playing => TickOutcome::Active,
            TweenState::NotStarted | TweenState::Paused => TickOutcome::Idle,
            TweenState::Stopped => TickOutcome::Completed,
        }
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        self.value
    }

    /// Seconds accrued while playing
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Elapsed time over duration; not clamped
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            self.elapsed / self.duration
        } else if self.is_finished() {
            1.0
        } else {
            0.0
        }
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TweenState::Playing
    }

    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Stopped
    }
}

impl<T: Tweenable> Tickable for Tween<T> {
    fn play(&mut self) {
        Tween::play(self)
    }

    fn pause(&mut self) {
        Tween::pause(self)
    }

    fn stop(&mut self) {
        Tween::stop(self)
    }

    fn state(&self) -> TweenState {
        self.state
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn on_tick(&mut self, dt: f64) -> TickOutcome {
        self.tick(dt)
    }
}

impl<T: Tweenable> fmt::Debug for Tween<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("value", &self.value)
            .field("kind", &self.kind)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .field("snap_to_end", &self.snap_to_end)
            .field("has_on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Shared handle to a tween.
///
/// The registry keeps its own clone, so the caller can still pause, stop or
/// read the tween between ticks. Methods borrow the tween; inside one of the
/// tween's own callbacks use the `&mut Tween` argument instead.
pub struct TweenHandle<T: Tweenable> {
    inner: Rc<RefCell<Tween<T>>>,
    stop_signal: StopSignal,
}

impl<T: Tweenable> TweenHandle<T> {
    pub fn new(tween: Tween<T>) -> Self {
        Self {
            stop_signal: tween.stop_signal.clone(),
            inner: Rc::new(RefCell::new(tween)),
        }
    }

    /// Signal that stops the tween even while it is borrowed by its own callback
    pub fn stop_signal(&self) -> StopSignal {
        self.stop_signal.clone()
    }

    pub fn play(&self) {
        self.inner.borrow_mut().play();
    }

    pub fn pause(&self) {
        self.inner.borrow_mut().pause();
    }

    pub fn stop(&self) {
        self.inner.borrow_mut().stop();
    }

    pub fn value(&self) -> T {
        self.inner.borrow().value()
    }

    pub fn state(&self) -> TweenState {
        self.inner.borrow().state()
    }

    pub fn elapsed(&self) -> f64 {
        self.inner.borrow().elapsed()
    }

    pub fn progress(&self) -> f64 {
        self.inner.borrow().progress()
    }

    /// Borrow the tween for inspection
    pub fn borrow(&self) -> Ref<'_, Tween<T>> {
        self.inner.borrow()
    }

    /// Run `f` with mutable access to the tween
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Tween<T>) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Whether both handles point at the same tween
    pub fn ptr_eq(&self, other: &TweenHandle<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn as_tickable(&self) -> Rc<RefCell<dyn Tickable>> {
        self.inner.clone()
    }
}

impl<T: Tweenable> Clone for TweenHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            stop_signal: self.stop_signal.clone(),
        }
    }
}

impl<T: Tweenable> From<Tween<T>> for TweenHandle<T> {
    fn from(tween: Tween<T>) -> Self {
        Self::new(tween)
    }
}

impl<T: Tweenable> fmt::Debug for TweenHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(tween) => f.debug_tuple("TweenHandle").field(&*tween).finish(),
            Err(_) => f.write_str("TweenHandle(<busy>)"),
        }
    }
}
