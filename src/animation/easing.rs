use crate::core::constants::{
    BACK_IN_OUT_SCALE, BACK_OVERSHOOT, BOUNCE_D1, BOUNCE_N1, ELASTIC_C4, ELASTIC_C5,
};
use crate::TweenError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Easing curves a tween can follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingKind {
    #[default]
    Linear,
    Spring,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
}

impl EasingKind {
    /// Every kind, in declaration order. Indexing matches `TryFrom<u8>`.
    pub const ALL: [EasingKind; 32] = [
        EasingKind::Linear,
        EasingKind::Spring,
        EasingKind::EaseInQuad,
        EasingKind::EaseOutQuad,
        EasingKind::EaseInOutQuad,
        EasingKind::EaseInCubic,
        EasingKind::EaseOutCubic,
        EasingKind::EaseInOutCubic,
        EasingKind::EaseInQuart,
        EasingKind::EaseOutQuart,
        EasingKind::EaseInOutQuart,
        EasingKind::EaseInQuint,
        EasingKind::EaseOutQuint,
        EasingKind::EaseInOutQuint,
        EasingKind::EaseInSine,
        EasingKind::EaseOutSine,
        EasingKind::EaseInOutSine,
        EasingKind::EaseInExpo,
        EasingKind::EaseOutExpo,
        EasingKind::EaseInOutExpo,
        EasingKind::EaseInCirc,
        EasingKind::EaseOutCirc,
        EasingKind::EaseInOutCirc,
        EasingKind::EaseInBack,
        EasingKind::EaseOutBack,
        EasingKind::EaseInOutBack,
        EasingKind::EaseInElastic,
        EasingKind::EaseOutElastic,
        EasingKind::EaseInOutElastic,
        EasingKind::EaseInBounce,
        EasingKind::EaseOutBounce,
        EasingKind::EaseInOutBounce,
    ];

    /// Apply the easing curve to a normalized progress value.
    ///
    /// Progress is not clamped: values outside 0.0..=1.0 extrapolate the curve,
    /// and the spring, back, elastic and bounce families leave 0.0..=1.0 on their own.
    pub fn apply(self, t: f64) -> f64 {
        // Every curve is pinned to its endpoints.
        if t == 0.0 {
            return 0.0;
        }
        if t == 1.0 {
            return 1.0;
        }

        match self {
            EasingKind::Linear => t,
            EasingKind::Spring => spring(t),
            EasingKind::EaseInQuad => t * t,
            EasingKind::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingKind::EaseInOutQuad => in_out_pow(t, 2),
            EasingKind::EaseInCubic => t * t * t,
            EasingKind::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingKind::EaseInOutCubic => in_out_pow(t, 3),
            EasingKind::EaseInQuart => t.powi(4),
            EasingKind::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            EasingKind::EaseInOutQuart => in_out_pow(t, 4),
            EasingKind::EaseInQuint => t.powi(5),
            EasingKind::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            EasingKind::EaseInOutQuint => in_out_pow(t, 5),
            EasingKind::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            EasingKind::EaseOutSine => (t * PI / 2.0).sin(),
            EasingKind::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingKind::EaseInExpo => 2.0_f64.powf(10.0 * t - 10.0),
            EasingKind::EaseOutExpo => 1.0 - 2.0_f64.powf(-10.0 * t),
            EasingKind::EaseInOutExpo => {
                if t < 0.5 {
                    2.0_f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            EasingKind::EaseInCirc => 1.0 - (1.0 - t * t).sqrt(),
            EasingKind::EaseOutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            EasingKind::EaseInOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            EasingKind::EaseInBack => {
                let c3 = BACK_OVERSHOOT + 1.0;
                c3 * t * t * t - BACK_OVERSHOOT * t * t
            }
            EasingKind::EaseOutBack => {
                let c3 = BACK_OVERSHOOT + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + BACK_OVERSHOOT * (t - 1.0).powi(2)
            }
            EasingKind::EaseInOutBack => {
                let c2 = BACK_OVERSHOOT * BACK_IN_OUT_SCALE;
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (t * 2.0 - 2.0) + c2) + 2.0) / 2.0
                }
            }
            EasingKind::EaseInElastic => {
                -(2.0_f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
            }
            EasingKind::EaseOutElastic => {
                2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
            }
            EasingKind::EaseInOutElastic => {
                let wave = ((20.0 * t - 11.125) * ELASTIC_C5).sin();
                if t < 0.5 {
                    -(2.0_f64.powf(20.0 * t - 10.0) * wave) / 2.0
                } else {
                    (2.0_f64.powf(-20.0 * t + 10.0) * wave) / 2.0 + 1.0
                }
            }
            EasingKind::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            EasingKind::EaseOutBounce => bounce_out(t),
            EasingKind::EaseInOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }

    /// Interpolate from `start` to `end` along this curve.
    ///
    /// `t == 0.0` returns `start` and `t == 1.0` returns `end` exactly.
    pub fn evaluate(self, start: f64, end: f64, t: f64) -> f64 {
        let p = self.apply(t);
        start * (1.0 - p) + end * p
    }

    /// Whether the curve leaves the `[start, end]` range between its endpoints
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            EasingKind::Spring
                | EasingKind::EaseInBack
                | EasingKind::EaseOutBack
                | EasingKind::EaseInOutBack
                | EasingKind::EaseInElastic
                | EasingKind::EaseOutElastic
                | EasingKind::EaseInOutElastic
        )
    }

    /// Canonical snake-case name, as used by serde
    pub fn name(self) -> &'static str {
        match self {
            EasingKind::Linear => "linear",
            EasingKind::Spring => "spring",
            EasingKind::EaseInQuad => "ease_in_quad",
            EasingKind::EaseOutQuad => "ease_out_quad",
            EasingKind::EaseInOutQuad => "ease_in_out_quad",
            EasingKind::EaseInCubic => "ease_in_cubic",
            EasingKind::EaseOutCubic => "ease_out_cubic",
            EasingKind::EaseInOutCubic => "ease_in_out_cubic",
            EasingKind::EaseInQuart => "ease_in_quart",
            EasingKind::EaseOutQuart => "ease_out_quart",
            EasingKind::EaseInOutQuart => "ease_in_out_quart",
            EasingKind::EaseInQuint => "ease_in_quint",
            EasingKind::EaseOutQuint => "ease_out_quint",
            EasingKind::EaseInOutQuint => "ease_in_out_quint",
            EasingKind::EaseInSine => "ease_in_sine",
            EasingKind::EaseOutSine => "ease_out_sine",
            EasingKind::EaseInOutSine => "ease_in_out_sine",
            EasingKind::EaseInExpo => "ease_in_expo",
            EasingKind::EaseOutExpo => "ease_out_expo",
            EasingKind::EaseInOutExpo => "ease_in_out_expo",
            EasingKind::EaseInCirc => "ease_in_circ",
            EasingKind::EaseOutCirc => "ease_out_circ",
            EasingKind::EaseInOutCirc => "ease_in_out_circ",
            EasingKind::EaseInBack => "ease_in_back",
            EasingKind::EaseOutBack => "ease_out_back",
            EasingKind::EaseInOutBack => "ease_in_out_back",
            EasingKind::EaseInElastic => "ease_in_elastic",
            EasingKind::EaseOutElastic => "ease_out_elastic",
            EasingKind::EaseInOutElastic => "ease_in_out_elastic",
            EasingKind::EaseInBounce => "ease_in_bounce",
            EasingKind::EaseOutBounce => "ease_out_bounce",
            EasingKind::EaseInOutBounce => "ease_in_out_bounce",
        }
    }
}

/// Interpolate from `start` to `end` with the given curve
pub fn evaluate(kind: EasingKind, start: f64, end: f64, t: f64) -> f64 {
    kind.evaluate(start, end, t)
}

fn in_out_pow(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2.0_f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

/// Damped oscillation settling on 1.0
fn spring(t: f64) -> f64 {
    let decay = (1.0 - t).max(0.0).powf(2.2);
    ((t * PI * (0.2 + 2.5 * t * t * t)).sin() * decay + t) * (1.0 + 1.2 * (1.0 - t))
}

fn bounce_out(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

/// Lowercase with separators removed; `sin`/`exp` suffixes widened to `sine`/`expo`
fn normalize_name(name: &str) -> String {
    let mut key: String = name
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect();
    if key.ends_with("sin") {
        key.push('e');
    } else if key.ends_with("exp") {
        key.push('o');
    }
    key
}

impl fmt::Display for EasingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingKind {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        EasingKind::ALL
            .iter()
            .copied()
            .find(|kind| normalize_name(kind.name()) == key)
            .ok_or_else(|| TweenError::UnsupportedEasing(s.to_string()))
    }
}

impl TryFrom<&str> for EasingKind {
    type Error = TweenError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<u8> for EasingKind {
    type Error = TweenError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        EasingKind::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| TweenError::UnsupportedEasing(format!("#{index}")))
    }
}
