//! Registry of live tweens, advanced once per host tick
//!
//! Tweens are visited from last-registered to first-registered. Callbacks run
//! synchronously during [`Registry::advance`] and may register, unregister or
//! stop any tween, including the one being ticked. The registry keeps a cursor
//! to the tween being visited and shifts it when a callback removes something
//! below it, so nothing is skipped or visited twice.

use crate::animation::easing::EasingKind;
use crate::animation::tweening::{
    FloatTween, StopSignal, Tickable, Tween, TweenHandle, TweenState, Tweenable, Vec2Tween,
    Vec3Tween,
};
use crate::core::config::{RegistryConfig, TweenDefaults};
use crate::core::vector::{Vec2, Vec3};
use crate::{Result, TweenError};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A registered tween, type-erased
pub type SharedTickable = Rc<RefCell<dyn Tickable>>;

/// Something a move tween can write a 3D position into
pub trait Positionable {
    fn set_position(&mut self, position: Vec3);
}

/// Something a move tween can write a 2D position into
pub trait Positionable2d {
    fn set_position_2d(&mut self, position: Vec2);
}

#[derive(Clone)]
struct Entry {
    tween: SharedTickable,
    /// Present for tweens registered through a [`TweenHandle`]
    stop_signal: Option<StopSignal>,
}

/// Counts from one [`Registry::advance`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tweens ticked
    pub visited: usize,
    /// Tweens that completed this tick, whether reaped here or unregistered
    /// from their own completion callback
    pub completed: usize,
}

struct RegistryInner {
    tweens: Vec<Entry>,
    /// Tickables without a stop signal that were unregistered while busy;
    /// stopped before the next tween is visited
    pending_stop: Vec<SharedTickable>,
    /// Index of the tween being visited; everything below it is still unvisited
    cursor: usize,
    advancing: bool,
    config: RegistryConfig,
}

impl RegistryInner {
    fn position_of(&self, tween: &SharedTickable) -> Option<usize> {
        self.tweens.iter().position(|e| same_tween(&e.tween, tween))
    }

    fn remove_at(&mut self, index: usize) -> Entry {
        if index < self.cursor {
            self.cursor -= 1;
        }
        self.tweens.remove(index)
    }

    fn take_all(&mut self) -> Vec<Entry> {
        self.cursor = 0;
        std::mem::take(&mut self.tweens)
    }
}

fn same_tween(a: &SharedTickable, b: &SharedTickable) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

/// Ordered collection of active tweens.
///
/// Cloning is cheap and yields another handle to the same registry. Callbacks
/// that need the registry should capture a [`WeakRegistry`] so a tween does not
/// keep its own registry alive.
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RefCell<RegistryInner>>,
}

/// Non-owning handle to a [`Registry`]
#[derive(Clone)]
pub struct WeakRegistry {
    inner: Weak<RefCell<RegistryInner>>,
}

impl WeakRegistry {
    pub fn upgrade(&self) -> Option<Registry> {
        self.inner.upgrade().map(|inner| Registry { inner })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry with the standard configuration
    pub fn new() -> Self {
        Self::from_valid_config(RegistryConfig::default())
    }

    /// Create an empty registry, validating the configuration first
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: RegistryConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                tweens: Vec::new(),
                pending_stop: Vec::new(),
                cursor: 0,
                advancing: false,
                config,
            })),
        }
    }

    pub fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn config(&self) -> RegistryConfig {
        self.inner.borrow().config.clone()
    }

    pub fn tween_defaults(&self) -> TweenDefaults {
        self.inner.borrow().config.defaults.clone()
    }

    pub fn set_time_scale(&self, time_scale: f64) -> Result<()> {
        if !time_scale.is_finite() || time_scale < 0.0 {
            return Err(TweenError::InvalidTimeScale(time_scale));
        }
        self.inner.borrow_mut().config.time_scale = time_scale;
        Ok(())
    }

    /// Number of registered tweens
    pub fn len(&self) -> usize {
        self.inner.borrow().tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains<T: Tweenable>(&self, tween: &TweenHandle<T>) -> bool {
        self.inner
            .borrow()
            .position_of(&tween.as_tickable())
            .is_some()
    }

    /// Append a tween. It still has to be played before it advances.
    pub fn register<T: Tweenable>(&self, tween: &TweenHandle<T>) -> Result<()> {
        self.insert(tween.as_tickable(), Some(tween.stop_signal()))
    }

    /// Append any [`Tickable`]
    pub fn register_tickable(&self, tween: SharedTickable) -> Result<()> {
        self.insert(tween, None)
    }

    fn insert(&self, tween: SharedTickable, stop_signal: Option<StopSignal>) -> Result<()> {
        // A tween registered from inside its own callback is busy; its duration
        // was already accepted when it started.
        if let Ok(t) = tween.try_borrow() {
            let duration = t.duration();
            if duration.is_nan() || duration < 0.0 {
                log::warn!("Rejecting tween with duration {}", duration);
                return Err(TweenError::InvalidDuration(duration));
            }
        }

        let mut inner = self.inner.borrow_mut();
        if inner.position_of(&tween).is_some() {
            return Err(TweenError::AlreadyRegistered);
        }
        inner.tweens.push(Entry { tween, stop_signal });
        log::debug!("Registered tween ({} live)", inner.tweens.len());
        Ok(())
    }

    /// Stop a tween, firing its completion, and remove it.
    ///
    /// Returns whether the tween was registered.
    pub fn unregister<T: Tweenable>(&self, tween: &TweenHandle<T>) -> bool {
        self.remove_and_stop(&tween.as_tickable(), Some(tween.stop_signal()))
    }

    pub fn unregister_tickable(&self, tween: &SharedTickable) -> bool {
        self.remove_and_stop(tween, None)
    }

    fn remove_and_stop(&self, tween: &SharedTickable, stop_signal: Option<StopSignal>) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let removed = inner.position_of(tween).map(|index| inner.remove_at(index));
            if removed.is_some() {
                log::debug!("Unregistered tween ({} live)", inner.tweens.len());
            }
            removed
        };

        let stop_signal =
            stop_signal.or_else(|| removed.as_ref().and_then(|e| e.stop_signal.clone()));
        self.stop_or_defer(tween, stop_signal.as_ref());
        removed.is_some()
    }

    /// Stop now, or as soon as the tween's own callback returns if it is busy
    fn stop_or_defer(&self, tween: &SharedTickable, stop_signal: Option<&StopSignal>) {
        let busy = tween.try_borrow_mut().map(|mut t| t.stop()).is_err();
        if !busy {
            return;
        }
        match stop_signal {
            Some(signal) => signal.request(),
            None => {
                log::debug!("Tween stopped from its own callback; deferring stop");
                self.inner.borrow_mut().pending_stop.push(Rc::clone(tween));
            }
        }
    }

    /// Advance every registered tween by `dt` seconds and reap the completed ones.
    ///
    /// `dt` must be finite and non-negative. It is scaled by the configured time
    /// scale but otherwise not clamped, so a large delta completes tweens outright.
    pub fn advance(&self, dt: f64) -> Result<TickReport> {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Rejecting tick delta {}", dt);
            return Err(TweenError::InvalidDelta(dt));
        }

        let scaled = {
            let mut inner = self.inner.borrow_mut();
            if inner.advancing {
                log::warn!("Registry advanced from inside a tween callback; ignoring");
                return Ok(TickReport::default());
            }
            inner.advancing = true;
            inner.cursor = inner.tweens.len();
            dt * inner.config.time_scale
        };

        self.flush_pending_stops();

        let mut report = TickReport::default();
        loop {
            let tween = {
                let mut inner = self.inner.borrow_mut();
                if inner.cursor == 0 {
                    break;
                }
                inner.cursor -= 1;
                inner.tweens.get(inner.cursor).map(|e| Rc::clone(&e.tween))
            };
            let Some(tween) = tween else {
                continue;
            };

            let outcome = match tween.try_borrow_mut() {
                Ok(mut t) => t.on_tick(scaled),
                Err(_) => {
                    log::warn!("Skipping tween that is busy in a callback");
                    continue;
                }
            };
            report.visited += 1;
            self.flush_pending_stops();

            if outcome.is_completed() {
                report.completed += 1;
                let mut inner = self.inner.borrow_mut();
                let cursor = inner.cursor;
                if inner
                    .tweens
                    .get(cursor)
                    .is_some_and(|e| same_tween(&e.tween, &tween))
                {
                    inner.remove_at(cursor);
                }
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.advancing = false;
        log::trace!(
            "Advanced {} tweens by {:.4}s, {} completed, {} live",
            report.visited,
            scaled,
            report.completed,
            inner.tweens.len()
        );
        Ok(report)
    }

    fn flush_pending_stops(&self) {
        let pending = std::mem::take(&mut self.inner.borrow_mut().pending_stop);
        for tween in pending {
            let busy = tween.try_borrow_mut().map(|mut t| t.stop()).is_err();
            if busy {
                self.inner.borrow_mut().pending_stop.push(tween);
            }
        }
    }

    /// Pause every playing tween
    pub fn pause_all(&self) {
        for entry in self.snapshot() {
            if let Ok(mut t) = entry.tween.try_borrow_mut() {
                t.pause();
            }
        }
    }

    /// Resume every paused tween
    pub fn resume_all(&self) {
        for entry in self.snapshot() {
            if let Ok(mut t) = entry.tween.try_borrow_mut() {
                if t.state() == TweenState::Paused {
                    t.play();
                }
            }
        }
    }

    /// Stop and remove every tween, firing completions
    pub fn stop_all(&self) {
        let tweens = self.inner.borrow_mut().take_all();
        log::debug!("Stopping {} tweens", tweens.len());
        for entry in tweens {
            self.stop_or_defer(&entry.tween, entry.stop_signal.as_ref());
        }
    }

    /// Drop every tween without firing completions
    pub fn clear(&self) {
        self.inner.borrow_mut().take_all();
    }

    fn snapshot(&self) -> Vec<Entry> {
        self.inner.borrow().tweens.clone()
    }

    fn start<T: Tweenable>(&self, tween: Tween<T>) -> Result<TweenHandle<T>> {
        let handle = tween.into_handle();
        self.register(&handle)?;
        handle.play();
        Ok(handle)
    }

    /// Tween `target`'s position from `from` to `to`, then call `on_complete`.
    ///
    /// The target is held weakly; if it is dropped mid-flight the tween keeps
    /// running but writes nowhere.
    pub fn move_to<H, F>(
        &self,
        target: &Rc<RefCell<H>>,
        from: Vec3,
        to: Vec3,
        duration: f64,
        kind: EasingKind,
        on_complete: F,
    ) -> Result<TweenHandle<Vec3>>
    where
        H: Positionable + 'static,
        F: FnOnce(&mut Vec3Tween) + 'static,
    {
        let target = Rc::downgrade(target);
        let tween = Tween::with_easing(from, to, duration, kind)
            .snap_to_end(self.tween_defaults().snap_to_end)
            .on_playing(move |tween: &mut Vec3Tween| {
                let Some(target) = target.upgrade() else {
                    return;
                };
                let Ok(mut target) = target.try_borrow_mut() else {
                    return;
                };
                target.set_position(tween.value());
            })
            .on_complete(on_complete);
        self.start(tween)
    }

    /// [`Registry::move_to`] with the configured default curve and duration
    pub fn move_to_default<H, F>(
        &self,
        target: &Rc<RefCell<H>>,
        from: Vec3,
        to: Vec3,
        on_complete: F,
    ) -> Result<TweenHandle<Vec3>>
    where
        H: Positionable + 'static,
        F: FnOnce(&mut Vec3Tween) + 'static,
    {
        let defaults = self.tween_defaults();
        self.move_to(target, from, to, defaults.duration, defaults.easing, on_complete)
    }

    /// 2D counterpart of [`Registry::move_to`]
    pub fn move_to_2d<H, F>(
        &self,
        target: &Rc<RefCell<H>>,
        from: Vec2,
        to: Vec2,
        duration: f64,
        kind: EasingKind,
        on_complete: F,
    ) -> Result<TweenHandle<Vec2>>
    where
        H: Positionable2d + 'static,
        F: FnOnce(&mut Vec2Tween) + 'static,
    {
        let target = Rc::downgrade(target);
        let tween = Tween::with_easing(from, to, duration, kind)
            .snap_to_end(self.tween_defaults().snap_to_end)
            .on_playing(move |tween: &mut Vec2Tween| {
                let Some(target) = target.upgrade() else {
                    return;
                };
                let Ok(mut target) = target.try_borrow_mut() else {
                    return;
                };
                target.set_position_2d(tween.value());
            })
            .on_complete(on_complete);
        self.start(tween)
    }

    /// Tween a scalar, handing every new value to `on_update`
    pub fn tween_value<U, F>(
        &self,
        from: f64,
        to: f64,
        duration: f64,
        kind: EasingKind,
        mut on_update: U,
        on_complete: F,
    ) -> Result<TweenHandle<f64>>
    where
        U: FnMut(f64) + 'static,
        F: FnOnce(&mut FloatTween) + 'static,
    {
        let tween = Tween::with_easing(from, to, duration, kind)
            .snap_to_end(self.tween_defaults().snap_to_end)
            .on_playing(move |tween: &mut FloatTween| on_update(tween.value()))
            .on_complete(on_complete);
        self.start(tween)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Registry")
                .field("live", &inner.tweens.len())
                .field("advancing", &inner.advancing)
                .field("config", &inner.config)
                .finish(),
            Err(_) => f.write_str("Registry(<busy>)"),
        }
    }
}
