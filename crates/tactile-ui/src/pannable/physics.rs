//! Pure velocity and easing math.

use super::config::RATIO_TOLERANCE;

/// Folds one drag sample into `vel`.
///
/// `dist` is the pointer travel since the previous sample and `dt_ms` the
/// time between them. Samples shorter than the ratio tolerance are ignored.
/// The result is low-pass filtered by `inertia` and clamped to `±vmax`.
pub fn drag_velocity(vel: f64, dt_ms: f64, dist: f64, vmax: f64, inertia: f64, force: f64) -> f64 {
    if dist.abs() < RATIO_TOLERANCE {
        return vel;
    }
    let raw = dist / dt_ms.abs().max(1.0) * force;
    let v = vel * (1.0 - inertia) + raw * inertia;
    v.clamp(-vmax, vmax)
}

/// Velocity of accelerated mode for a pointer `offset` from the press point.
///
/// Scales linearly from `vmin` at the press point to `vmax` at a full
/// `extent`; the sign follows `offset`, with zero treated as negative.
///
/// The zero case matches the classic Hildon pannable area: the sample that
/// decides a pan has its offset zeroed, so an accelerated pan always opens
/// with one `-vmin` tick, whichever way the finger moves.
pub fn accelerated_velocity(offset: f64, extent: f64, vmin: f64, vmax: f64) -> f64 {
    let sign = if offset > 0.0 { 1.0 } else { -1.0 };
    sign * (offset.abs() / extent.max(1.0) * (vmax - vmin) + vmin)
}

/// Sum `1 + d + d^2 + ... + d^(n-1)` with `n = ceil(sps * scroll_time)`.
///
/// An initial velocity `distance / vel_factor` decaying by `d` per tick
/// covers `distance` in `n` ticks.
pub fn vel_factor(decel: f64, sps: u32, scroll_time: f64) -> f64 {
    let n = (sps as f64 * scroll_time).ceil() as i64;
    let mut total = 1.0;
    let mut term = 1.0;
    let mut i = 1;
    while i < n && term >= RATIO_TOLERANCE {
        term *= decel;
        total += term;
        i += 1;
    }
    total
}

/// `(t - 1)^3 + 1`.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let p = t - 1.0;
    p * p * p + 1.0
}

/// Velocity after the fast-click boost.
///
/// A press that interrupted a glide and was released quickly keeps the
/// pre-press speed plus `accel` in the same direction. `symbol` comes from
/// the velocity observed during the click: zero cancels the axis, negative
/// reverses it.
pub fn fast_click_boost(current: f64, pre_press: f64, accel: f64) -> f64 {
    let symbol = if current == 0.0 {
        0.0
    } else if current * pre_press > 0.0 {
        1.0
    } else {
        -1.0
    };
    symbol * (pre_press + if pre_press > 0.0 { accel } else { -accel })
}
