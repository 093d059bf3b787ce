use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tweenlet::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

/// Stand-in for a scene object owned by the host
#[derive(Debug, Default)]
struct Actor {
    name: &'static str,
    position: Vec3,
}

impl Positionable for Actor {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

/// Headless driver: moves an actor and fades a value, one registry tick per frame
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tweenlet::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => RegistryConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ConfigPreset::Standard.resolve(),
    };
    log::info!("Registry config: {}", serde_json::to_string(&config)?);
    let registry = Registry::with_config(config)?;

    let actor = Rc::new(RefCell::new(Actor {
        name: "crate",
        ..Default::default()
    }));
    let finished = Rc::new(Cell::new(0));

    let done = finished.clone();
    registry.move_to(
        &actor,
        Vec3::ZERO,
        Vec3::new(2.0, 0.0, 0.0),
        1.0,
        EasingKind::EaseOutBounce,
        move |tween| {
            log::info!("Move complete at {:?}", tween.value());
            done.set(done.get() + 1);
        },
    )?;

    let done = finished.clone();
    let fade = registry.tween_value(
        1.0,
        0.0,
        0.6,
        EasingKind::EaseInOutSine,
        |alpha| log::debug!("alpha {:.3}", alpha),
        move |_| {
            log::info!("Fade complete");
            done.set(done.get() + 1);
        },
    )?;

    let mut clock = FrameClock::new();
    clock.tick();
    let mut frame = 0u32;
    while !registry.is_empty() {
        std::thread::sleep(FRAME);
        let report = registry.advance(clock.tick())?;
        frame += 1;

        let actor = actor.borrow();
        log::debug!(
            "frame {:>3}: {} at ({:.3}, {:.3}, {:.3}), {} live",
            frame,
            actor.name,
            actor.position.x,
            actor.position.y,
            actor.position.z,
            registry.len()
        );
        if report.completed > 0 {
            log::info!("frame {}: {} tween(s) finished", frame, report.completed);
        }
    }

    println!(
        "{} tweens finished in {} frames; fade ended {:?}",
        finished.get(),
        frame,
        fade.state()
    );
    Ok(())
}
