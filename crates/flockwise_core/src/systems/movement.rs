use crate::config::SpeedLimit;
use flockwise_data::Vec2;

/// Bounds a velocity by `max_speed` under the chosen convention.
#[must_use]
pub fn apply_speed_limit(velocity: Vec2, max_speed: f64, limit: SpeedLimit) -> Vec2 {
    match limit {
        SpeedLimit::Magnitude => velocity.clamp_length(max_speed),
        SpeedLimit::Componentwise => {
            Vec2::new(velocity.x.min(max_speed), velocity.y.min(max_speed))
        }
    }
}

/// Wraps one coordinate into `[0, extent)`.
#[inline]
#[must_use]
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Advances a position by one velocity step on the torus.
#[must_use]
pub fn integrate(position: Vec2, velocity: Vec2, width: f64, height: f64) -> Vec2 {
    let moved = position + velocity;
    Vec2::new(
        wrap_coordinate(moved.x, width),
        wrap_coordinate(moved.y, height),
    )
}
