use crate::agent::Agent;
use crate::config::{FlockConfig, RandomnessScale, SpeedLimit};
use crate::systems::movement::apply_speed_limit;
use flockwise_data::Vec2;
use rand::Rng;

/// Read-only parameters shared by every agent's velocity synthesis.
#[derive(Debug, Clone, Copy)]
pub struct SteeringContext {
    pub width: f64,
    pub height: f64,
    pub separation_min_distance: f64,
    pub speed_limit: SpeedLimit,
    pub randomness_scale: RandomnessScale,
}

impl SteeringContext {
    #[must_use]
    pub fn from_config(config: &FlockConfig) -> Self {
        Self {
            width: config.world.width,
            height: config.world.height,
            separation_min_distance: config.rules.separation_min_distance,
            speed_limit: config.rules.speed_limit,
            randomness_scale: config.rules.randomness_scale,
        }
    }

    /// True when `position` is within the separation distance of any edge.
    #[must_use]
    pub fn in_border_zone(&self, position: Vec2) -> bool {
        let d = self.separation_min_distance;
        position.x < d
            || position.x > self.width - d
            || position.y < d
            || position.y > self.height - d
    }
}

/// Mean velocity of the neighbors.
#[must_use]
pub fn alignment_cue(agent: &Agent, agents: &[Agent]) -> Vec2 {
    Vec2::mean(agent.neighbors.iter().map(|&j| agents[j].velocity)).unwrap_or(Vec2::ZERO)
}

/// Offset from the agent to its neighbors' mean position.
#[must_use]
pub fn cohesion_cue(agent: &Agent, agents: &[Agent]) -> Vec2 {
    Vec2::mean(agent.neighbors.iter().map(|&j| agents[j].position))
        .map_or(Vec2::ZERO, |center| center - agent.position)
}

/// Push away from neighbors strictly closer than `min_distance`.
#[must_use]
pub fn separation_cue(agent: &Agent, agents: &[Agent], min_distance: f64) -> Vec2 {
    agent
        .neighbors
        .iter()
        .map(|&j| agents[j].position)
        .filter(|&p| agent.position.distance(p) < min_distance)
        .fold(Vec2::ZERO, |acc, p| acc - (p - agent.position))
}

/// Uniform draw in `[-amplitude, amplitude)`.
#[inline]
fn symmetric<R: Rng>(rng: &mut R, amplitude: f64) -> f64 {
    (rng.gen::<f64>() * 2.0 - 1.0) * amplitude
}

/// Computes the agent's next velocity from the frozen pre-step `agents`.
///
/// Agents in the border zone or without neighbors keep their velocity and
/// draw no random numbers. Everyone else draws, per axis, the noise term
/// and then the randomness term. The result is always speed-limited.
pub fn synthesize_velocity<R: Rng>(
    agent: &Agent,
    agents: &[Agent],
    ctx: &SteeringContext,
    rng: &mut R,
) -> Vec2 {
    if ctx.in_border_zone(agent.position) || agent.neighbors.is_empty() {
        return apply_speed_limit(agent.velocity, agent.max_speed, ctx.speed_limit);
    }

    let alignment = alignment_cue(agent, agents).with_length(agent.max_speed);
    let cohesion = cohesion_cue(agent, agents).with_length(agent.max_speed);
    let separation =
        separation_cue(agent, agents, ctx.separation_min_distance).with_length(agent.max_speed);

    let w = agent.weights;
    let scale = match ctx.randomness_scale {
        RandomnessScale::Unit => 1.0,
        RandomnessScale::MaxSpeed => agent.max_speed,
    };
    let social =
        alignment * w.alignment() + cohesion * w.cohesion() + separation * w.separation();

    let mut jitter = [0.0; 2];
    for axis in &mut jitter {
        let noise = symmetric(rng, agent.noise_amplitude);
        let randomness = symmetric(rng, 1.0) * scale;
        *axis = noise + w.randomness() * randomness;
    }

    apply_speed_limit(
        social + Vec2::from(jitter),
        agent.max_speed,
        ctx.speed_limit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flockwise_data::{ConnectivityState, WeightVector};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn agent(id: usize, x: f64, y: f64, vx: f64, vy: f64) -> Agent {
        Agent {
            id,
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            max_speed: 10.0,
            perception_radius: 80.0,
            noise_amplitude: 0.0,
            weights: WeightVector::new(0.5, 0.1, 0.4, 0.0),
            state: ConnectivityState::Connected,
            neighbors: Vec::new(),
        }
    }

    fn ctx() -> SteeringContext {
        SteeringContext {
            width: 1000.0,
            height: 600.0,
            separation_min_distance: 20.0,
            speed_limit: SpeedLimit::Magnitude,
            randomness_scale: RandomnessScale::Unit,
        }
    }

    #[test]
    fn test_border_zone_edges() {
        let c = ctx();
        assert!(c.in_border_zone(Vec2::new(19.9, 300.0)));
        assert!(c.in_border_zone(Vec2::new(500.0, 580.1)));
        assert!(!c.in_border_zone(Vec2::new(20.0, 20.0)));
        assert!(!c.in_border_zone(Vec2::new(500.0, 300.0)));
    }

    #[test]
    fn test_cues() {
        let mut a = agent(0, 100.0, 100.0, 0.0, 0.0);
        a.neighbors = vec![1, 2];
        let agents = vec![
            a.clone(),
            agent(1, 110.0, 100.0, 2.0, 0.0),
            agent(2, 100.0, 150.0, 0.0, 4.0),
        ];
        assert_eq!(alignment_cue(&a, &agents), Vec2::new(1.0, 2.0));
        assert_eq!(cohesion_cue(&a, &agents), Vec2::new(5.0, 25.0));
        // only agent 1 is closer than 20
        assert_eq!(separation_cue(&a, &agents, 20.0), Vec2::new(-10.0, 0.0));
    }

    #[test]
    fn test_no_neighbors_keeps_velocity_and_draws_nothing() {
        let a = agent(0, 100.0, 100.0, 3.0, -2.0);
        let agents = vec![a.clone()];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut untouched = ChaCha8Rng::seed_from_u64(1);
        let v = synthesize_velocity(&a, &agents, &ctx(), &mut rng);
        assert_eq!(v, Vec2::new(3.0, -2.0));
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_border_agent_keeps_velocity() {
        let mut a = agent(0, 5.0, 100.0, 1.0, 1.0);
        a.neighbors = vec![1];
        let agents = vec![a.clone(), agent(1, 8.0, 100.0, -5.0, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            synthesize_velocity(&a, &agents, &ctx(), &mut rng),
            Vec2::new(1.0, 1.0)
        );
    }

    #[test]
    fn test_cues_are_normalised_to_max_speed() {
        let mut a = agent(0, 100.0, 100.0, 0.0, 0.0);
        a.weights = WeightVector::new(1.0, 0.0, 0.0, 0.0);
        a.neighbors = vec![1];
        let agents = vec![a.clone(), agent(1, 150.0, 100.0, 0.001, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let v = synthesize_velocity(&a, &agents, &ctx(), &mut rng);
        assert!((v.x - 10.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
    }

    #[test]
    fn test_zero_cue_stays_zero() {
        let mut a = agent(0, 100.0, 100.0, 0.0, 0.0);
        a.weights = WeightVector::new(1.0, 0.0, 0.0, 0.0);
        a.neighbors = vec![1];
        let agents = vec![a.clone(), agent(1, 150.0, 100.0, 0.0, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(synthesize_velocity(&a, &agents, &ctx(), &mut rng), Vec2::ZERO);
    }
}
