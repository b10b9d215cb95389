/// Asserts that two floats differ by less than `eps`.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $eps:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() < $eps,
            "{} and {} differ by more than {}",
            l,
            r,
            $eps
        );
    };
}

/// Asserts that every agent lies inside the half-open world rectangle.
#[macro_export]
macro_rules! assert_in_world {
    ($flock:expr) => {
        let world = &$flock.config().world;
        for agent in $flock.agents() {
            assert!(
                (0.0..world.width).contains(&agent.position.x)
                    && (0.0..world.height).contains(&agent.position.y),
                "Agent {} at ({}, {}) is outside {}x{}",
                agent.id,
                agent.position.x,
                agent.position.y,
                world.width,
                world.height
            );
        }
    };
}

/// Asserts that no agent is faster than its own max speed.
#[macro_export]
macro_rules! assert_speed_bounded {
    ($flock:expr) => {
        for agent in $flock.agents() {
            assert!(
                agent.velocity.length() <= agent.max_speed * (1.0 + 1e-9),
                "Agent {} speed {} exceeds {}",
                agent.id,
                agent.velocity.length(),
                agent.max_speed
            );
        }
    };
}
