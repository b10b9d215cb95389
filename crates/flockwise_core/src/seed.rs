use crate::config::FlockConfig;
use crate::error::Result;
use crate::flock::Flock;
use flockwise_data::AgentState;
use serde::{Deserialize, Serialize};

/// Configuration plus explicit starting layout; enough to replay a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunSeed {
    pub config: FlockConfig,
    pub agents: Vec<AgentState>,
}

impl RunSeed {
    /// Captures the layout `flock` started from, not its current state.
    #[must_use]
    pub fn capture(flock: &Flock) -> Self {
        Self {
            config: flock.config().clone(),
            agents: flock.initial_states().to_vec(),
        }
    }

    /// Same layout under a different configuration.
    #[must_use]
    pub fn with_config(&self, config: FlockConfig) -> Self {
        Self {
            config,
            agents: self.agents.clone(),
        }
    }

    /// Constructs a fresh, independent flock.
    pub fn build(&self) -> Result<Flock> {
        Flock::from_states(self.config.clone(), self.agents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    #[test]
    fn test_capture_replays_identically() {
        let config = FlockConfig {
            world: WorldConfig {
                agent_count: 25,
                seed: 11,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut original = Flock::new(config).unwrap();
        let seed = RunSeed::capture(&original);
        original.advance(15);

        let mut replay = seed.build().unwrap();
        replay.advance(15);
        assert_eq!(original.current_states(), replay.current_states());
        assert_eq!(original.history(), replay.history());
    }

    #[test]
    fn test_with_config_keeps_layout() {
        let config = FlockConfig {
            world: WorldConfig {
                agent_count: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        let flock = Flock::new(config.clone()).unwrap();
        let seed = RunSeed::capture(&flock);
        let mut other = config;
        other.agent.k_nearest = 2;
        let variant = seed.with_config(other);
        assert_eq!(variant.agents, seed.agents);
        assert_eq!(variant.build().unwrap().config().agent.k_nearest, 2);
    }
}
