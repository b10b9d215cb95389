use crate::vector::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete connectivity bucket derived from an agent's neighbor count.
///
/// The 2-state policy only uses `Isolated` and `Connected`; the 3-state
/// policy adds `Peripheral` and reports `Connected` under the name "central".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    Isolated,
    Peripheral,
    #[serde(alias = "central")]
    Connected,
}

/// Rule weights `[alignment, cohesion, separation, randomness]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(pub [f64; 4]);

impl WeightVector {
    #[must_use]
    pub const fn new(alignment: f64, cohesion: f64, separation: f64, randomness: f64) -> Self {
        Self([alignment, cohesion, separation, randomness])
    }

    #[must_use]
    pub fn alignment(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn cohesion(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub fn separation(&self) -> f64 {
        self.0[2]
    }

    #[must_use]
    pub fn randomness(&self) -> f64 {
        self.0[3]
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|w| w.is_finite())
    }

    /// Same randomness weight, new social weights.
    #[must_use]
    pub fn with_social(self, alignment: f64, cohesion: f64, separation: f64) -> Self {
        Self([alignment, cohesion, separation, self.0[3]])
    }
}

/// Serializable initial state of one agent.
///
/// A list of these plus a configuration fully determines a run, which is
/// how identical starting layouts are replayed under different settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub max_speed: f64,
    pub perception_radius: f64,
    pub noise_amplitude: f64,
    pub state: ConnectivityState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_order_matches_column_order() {
        assert!(ConnectivityState::Isolated < ConnectivityState::Peripheral);
        assert!(ConnectivityState::Peripheral < ConnectivityState::Connected);
    }

    #[test]
    fn test_central_alias_deserializes() {
        let s: ConnectivityState = serde_json::from_str("\"central\"").unwrap();
        assert_eq!(s, ConnectivityState::Connected);
    }

    #[test]
    fn test_weight_vector_accessors() {
        let w = WeightVector::new(0.5, 0.1, 0.4, 0.0).with_social(1.0, 2.0, 3.0);
        assert_eq!(w.alignment(), 1.0);
        assert_eq!(w.cohesion(), 2.0);
        assert_eq!(w.separation(), 3.0);
        assert_eq!(w.randomness(), 0.0);
    }
}
