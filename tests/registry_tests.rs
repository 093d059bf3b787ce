use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tweenlet::prelude::*;

/// Integration tests for driving many tweens through one registry
#[cfg(test)]
mod registry_tests {
    use super::*;

    fn counted_tween(duration: f64, completions: &Rc<Cell<u32>>) -> TweenHandle<f64> {
        let c = completions.clone();
        Tween::new(0.0, 1.0, duration)
            .on_playing(|_| {})
            .on_complete(move |_| c.set(c.get() + 1))
            .into_handle()
    }

    #[test]
    fn test_all_tweens_reaped_after_longest_duration() {
        let registry = Registry::new();
        let completions = Rc::new(Cell::new(0));
        let handles: Vec<_> = (1..=5)
            .map(|i| {
                let handle = counted_tween(i as f64 * 0.1, &completions);
                registry.register(&handle).unwrap();
                handle.play();
                handle
            })
            .collect();

        let report = registry.advance(1.0).unwrap();
        assert_eq!(report.visited, 5);
        assert_eq!(report.completed, 5);
        assert!(registry.is_empty());
        assert_eq!(completions.get(), 5);
        assert!(handles.iter().all(|h| h.state() == TweenState::Stopped));

        registry.advance(1.0).unwrap();
        assert_eq!(completions.get(), 5);
    }

    #[test]
    fn test_completes_once_when_ticks_sum_to_duration() {
        let registry = Registry::new();
        let completions = Rc::new(Cell::new(0));
        let handle = counted_tween(1.0, &completions);
        registry.register(&handle).unwrap();
        handle.play();

        for _ in 0..3 {
            assert_eq!(registry.advance(0.25).unwrap().completed, 0);
        }
        assert_eq!(registry.advance(0.25).unwrap().completed, 1);
        assert_eq!(completions.get(), 1);

        for _ in 0..3 {
            registry.advance(0.25).unwrap();
            handle.with_mut(|t| t.tick(0.25));
        }
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_oversized_tick_skips_on_playing() {
        let registry = Registry::new();
        let updates = Rc::new(Cell::new(0));
        let completions = Rc::new(Cell::new(0));
        let (u, c) = (updates.clone(), completions.clone());

        registry
            .tween_value(
                0.0,
                10.0,
                0.5,
                EasingKind::EaseOutCubic,
                move |_| u.set(u.get() + 1),
                move |t| {
                    // The completing tick never recomputes the value.
                    assert_eq!(t.value(), 0.0);
                    c.set(c.get() + 1);
                },
            )
            .unwrap();

        registry.advance(2.0).unwrap();
        assert_eq!(updates.get(), 0);
        assert_eq!(completions.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_zero_duration_completes_on_next_tick() {
        let registry = Registry::new();
        let completions = Rc::new(Cell::new(0));
        let handle = counted_tween(0.0, &completions);
        registry.register(&handle).unwrap();
        handle.play();

        assert_eq!(registry.advance(0.0).unwrap().completed, 1);
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_callback_unregisters_unvisited_tween() {
        let registry = Registry::new();
        let weak = registry.downgrade();
        let ticks = Rc::new(RefCell::new(Vec::new()));

        let make = |name: &'static str| {
            let log = ticks.clone();
            Tween::new(0.0, 1.0, 10.0)
                .on_playing(move |_| log.borrow_mut().push(name))
                .into_handle()
        };
        let first = make("first");
        let second = make("second");

        // Visited first, since iteration runs from the back.
        let victim = second.clone();
        let log = ticks.clone();
        let last = Tween::new(0.0, 1.0, 10.0)
            .on_playing(move |_| {
                log.borrow_mut().push("last");
                if let Some(registry) = weak.upgrade() {
                    registry.unregister(&victim);
                }
            })
            .into_handle();

        for handle in [&first, &second] {
            registry.register(handle).unwrap();
            handle.play();
        }
        registry.register(&last).unwrap();
        last.play();

        let report = registry.advance(0.1).unwrap();
        assert_eq!(*ticks.borrow(), vec!["last", "first"]);
        assert_eq!(report.visited, 2);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&first));
        assert!(registry.contains(&last));
        assert_eq!(second.state(), TweenState::Stopped);
    }

    #[test]
    fn test_completion_unregisters_earlier_tweens() {
        let registry = Registry::new();
        let weak = registry.downgrade();
        let visits = Rc::new(Cell::new(0));

        let others: Vec<_> = (0..4)
            .map(|_| {
                let v = visits.clone();
                Tween::new(0.0, 1.0, 10.0)
                    .on_playing(move |_| v.set(v.get() + 1))
                    .into_handle()
            })
            .collect();
        for handle in &others {
            registry.register(handle).unwrap();
            handle.play();
        }

        let victims = vec![others[0].clone(), others[2].clone()];
        let finisher = Tween::new(0.0, 1.0, 0.05)
            .on_complete(move |_| {
                if let Some(registry) = weak.upgrade() {
                    for victim in &victims {
                        registry.unregister(victim);
                    }
                }
            })
            .into_handle();
        registry.register(&finisher).unwrap();
        finisher.play();

        let report = registry.advance(0.1).unwrap();
        assert_eq!(report.completed, 1);
        assert_eq!(report.visited, 3);
        assert_eq!(visits.get(), 2);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&others[1]));
        assert!(registry.contains(&others[3]));
    }

    #[test]
    fn test_tween_unregisters_itself() {
        let registry = Registry::new();
        let weak = registry.downgrade();
        let completions = Rc::new(Cell::new(0));
        let c = completions.clone();

        let handle = Tween::new(0.0, 1.0, 10.0).into_handle();
        let me = handle.clone();
        handle.with_mut(|t| {
            t.set_on_playing(move |_| {
                if let Some(registry) = weak.upgrade() {
                    registry.unregister(&me);
                }
            });
            t.set_on_complete(move |_| c.set(c.get() + 1));
        });
        let neighbour = counted_tween(10.0, &Rc::new(Cell::new(0)));
        registry.register(&neighbour).unwrap();
        neighbour.play();
        registry.register(&handle).unwrap();
        handle.play();

        let report = registry.advance(0.1).unwrap();
        assert_eq!(report.visited, 2);
        assert_eq!(completions.get(), 1);
        assert_eq!(handle.state(), TweenState::Stopped);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&neighbour));
    }

    #[test]
    fn test_self_unregister_outside_advance_stops_immediately() {
        let registry = Registry::new();
        let weak = registry.downgrade();
        let completions = Rc::new(Cell::new(0));
        let c = completions.clone();

        let handle = Tween::new(0.0, 1.0, 10.0).into_handle();
        let me = handle.clone();
        handle.with_mut(|t| {
            t.set_on_playing(move |_| {
                if let Some(registry) = weak.upgrade() {
                    registry.unregister(&me);
                }
            });
            t.set_on_complete(move |_| c.set(c.get() + 1));
        });
        registry.register(&handle).unwrap();
        handle.play();

        // Driven by hand, never through the registry.
        let outcome = handle.with_mut(|t| t.tick(0.1));
        assert!(outcome.is_completed());
        assert!(!registry.contains(&handle));
        assert_eq!(handle.state(), TweenState::Stopped);
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_replayed_tween_completes_without_callbacks() {
        let registry = Registry::new();
        let updates = Rc::new(Cell::new(0));
        let completions = Rc::new(Cell::new(0));
        let (u, c) = (updates.clone(), completions.clone());
        let handle = Tween::new(0.0, 4.0, 0.5)
            .snap_to_end(true)
            .on_playing(move |_| u.set(u.get() + 1))
            .on_complete(move |_| c.set(c.get() + 1))
            .into_handle();
        registry.register(&handle).unwrap();
        handle.play();

        assert_eq!(registry.advance(0.5).unwrap().completed, 1);
        assert_eq!((updates.get(), completions.get()), (1, 1));

        registry.register(&handle).unwrap();
        handle.play();
        assert_eq!(registry.advance(0.1).unwrap().completed, 1);
        assert_eq!((updates.get(), completions.get()), (1, 1));
        assert_eq!(handle.value(), 4.0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_callback_registers_new_tween() {
        let registry = Registry::new();
        let weak = registry.downgrade();
        let chained = Rc::new(RefCell::new(None));
        let slot = chained.clone();

        registry
            .tween_value(0.0, 1.0, 0.5, EasingKind::Linear, |_| {}, move |_| {
                if let Some(registry) = weak.upgrade() {
                    let next = registry
                        .tween_value(1.0, 0.0, 0.5, EasingKind::Linear, |_| {}, |_| {})
                        .unwrap();
                    *slot.borrow_mut() = Some(next);
                }
            })
            .unwrap();

        registry.advance(0.5).unwrap();
        assert_eq!(registry.len(), 1);
        let next = chained.borrow().clone().unwrap();
        assert_eq!(next.elapsed(), 0.0);

        registry.advance(0.25).unwrap();
        assert_eq!(next.value(), 0.5);
    }

    #[test]
    fn test_pause_play_round_trip() {
        let registry = Registry::new();
        let handle = registry
            .tween_value(0.0, 100.0, 1.0, EasingKind::Linear, |_| {}, |_| {})
            .unwrap();

        registry.advance(0.25).unwrap();
        handle.pause();
        for _ in 0..10 {
            registry.advance(0.25).unwrap();
        }
        assert_eq!(handle.elapsed(), 0.25);
        assert_eq!(handle.value(), 25.0);
        assert_eq!(registry.len(), 1);

        handle.play();
        registry.advance(0.25).unwrap();
        assert_eq!(handle.progress(), 0.5);
        assert_eq!(handle.value(), 50.0);
    }

    #[test]
    fn test_manual_stop_is_reaped() {
        let registry = Registry::new();
        let completions = Rc::new(Cell::new(0));
        let handle = counted_tween(5.0, &completions);
        registry.register(&handle).unwrap();
        handle.play();

        handle.stop();
        assert_eq!(completions.get(), 1);
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.advance(0.1).unwrap().completed, 1);
        assert!(registry.is_empty());
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_reduced_motion_preset_snaps_to_target() {
        let registry = Registry::with_config(ConfigPreset::ReducedMotion.resolve()).unwrap();
        let last = Rc::new(Cell::new(f64::NAN));
        let l = last.clone();

        let defaults = registry.tween_defaults();
        let handle = Tween::from_defaults(3.0, 9.0, &defaults)
            .on_playing(move |t| l.set(t.value()))
            .into_handle();
        registry.register(&handle).unwrap();
        handle.play();

        registry.advance(1.0 / 60.0).unwrap();
        assert_eq!(last.get(), 9.0);
        assert!(registry.is_empty());
    }
}
