use crate::agent::Agent;
use crate::policy::AdaptiveWeightPolicy;
use flockwise_data::{StateCounts, StatsSnapshot, Vec2};
use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;
use std::f64::consts::PI;

pub struct StatsContext<'a> {
    pub agents: &'a [Agent],
    pub policy: &'a AdaptiveWeightPolicy,
    pub cluster_distance: f64,
    pub step: u64,
}

/// Summarises a completed step. Pure; performs no I/O.
#[must_use]
pub fn compute_snapshot(ctx: &StatsContext) -> StatsSnapshot {
    let agents = ctx.agents;
    let positions: Vec<Vec2> = agents.iter().map(|a| a.position).collect();
    let velocities: Vec<Vec2> = agents.iter().map(|a| a.velocity).collect();

    let cohesion = cohesion(&positions);
    let mut state_counts = StateCounts::zeroed(ctx.policy.states().iter().copied());
    for agent in agents {
        state_counts.record(agent.state);
    }

    StatsSnapshot {
        step: ctx.step,
        cohesion,
        cohesion_inverse: (cohesion > 0.0).then(|| cohesion.recip()),
        separation: separation(agents),
        alignment_variance: alignment_variance(&velocities),
        cluster_count: cluster_count(&positions, ctx.cluster_distance),
        state_counts,
        polarization: polarization(&velocities),
        angular_variance: angular_variance(&velocities),
        kinetic_energy: kinetic_energy(&velocities),
        mean_neighbor_count: mean_neighbor_count(agents),
        mean_velocity: Vec2::mean(velocities.iter().copied()).unwrap_or(Vec2::ZERO),
    }
}

fn sum_squared_deviation(vectors: &[Vec2]) -> f64 {
    let Some(mean) = Vec2::mean(vectors.iter().copied()) else {
        return 0.0;
    };
    vectors.iter().map(|v| (*v - mean).length_squared()).sum()
}

/// Sum of squared distances from each position to the mean position.
#[must_use]
pub fn cohesion(positions: &[Vec2]) -> f64 {
    sum_squared_deviation(positions)
}

/// Sum of squared deviations from the flock-mean velocity.
#[must_use]
pub fn alignment_variance(velocities: &[Vec2]) -> f64 {
    sum_squared_deviation(velocities)
}

/// Mean over agents of the mean distance to their own neighbors.
///
/// Agents without neighbors contribute zero but still count in the mean.
#[must_use]
pub fn separation(agents: &[Agent]) -> f64 {
    if agents.is_empty() {
        return 0.0;
    }
    let total: f64 = agents
        .iter()
        .filter(|a| !a.neighbors.is_empty())
        .map(|a| {
            let sum: f64 = a
                .neighbors
                .iter()
                .map(|&j| a.position.distance(agents[j].position))
                .sum();
            sum / a.neighbors.len() as f64
        })
        // an empty f64 sum is -0.0, which would export as "-0"
        .fold(0.0, |acc, s| acc + s);
    total / agents.len() as f64
}

/// Connected components of the graph linking agents closer than `threshold`.
#[must_use]
pub fn cluster_count(positions: &[Vec2], threshold: f64) -> usize {
    let mut graph = UnGraph::<(), ()>::with_capacity(positions.len(), positions.len());
    let nodes: Vec<_> = positions.iter().map(|_| graph.add_node(())).collect();
    for (i, a) in positions.iter().enumerate() {
        for (j, b) in positions.iter().enumerate().skip(i + 1) {
            if a.distance(*b) < threshold {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
    }
    connected_components(&graph)
}

/// Length of the mean unit heading; 1.0 means everyone flies the same way.
#[must_use]
pub fn polarization(velocities: &[Vec2]) -> f64 {
    Vec2::mean(velocities.iter().map(|v| v.with_length(1.0)))
        .map_or(0.0, Vec2::length)
}

/// Population variance of heading angles measured against the mean velocity.
#[must_use]
pub fn angular_variance(velocities: &[Vec2]) -> f64 {
    let Some(mean) = Vec2::mean(velocities.iter().copied()) else {
        return 0.0;
    };
    let reference = mean.angle();
    let offsets: Vec<f64> = velocities
        .iter()
        .map(|v| wrap_angle(v.angle() - reference))
        .collect();
    let avg = offsets.iter().sum::<f64>() / offsets.len() as f64;
    offsets.iter().map(|o| (o - avg).powi(2)).sum::<f64>() / offsets.len() as f64
}

/// Wraps an angle into `(-PI, PI]`.
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Mean of `0.5 * |v|^2` over agents.
#[must_use]
pub fn kinetic_energy(velocities: &[Vec2]) -> f64 {
    if velocities.is_empty() {
        return 0.0;
    }
    velocities
        .iter()
        .map(|v| 0.5 * v.length_squared())
        .sum::<f64>()
        / velocities.len() as f64
}

#[must_use]
pub fn mean_neighbor_count(agents: &[Agent]) -> f64 {
    if agents.is_empty() {
        return 0.0;
    }
    agents.iter().map(|a| a.neighbors.len()).sum::<usize>() as f64 / agents.len() as f64
}
