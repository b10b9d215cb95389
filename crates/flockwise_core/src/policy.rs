//! Adaptive rule weighting driven by local connectivity.
//!
//! Classification is memoryless: the state is recomputed from the current
//! neighbor count alone, and each state maps to one fixed weight vector.

use crate::config::PolicyConfig;
use crate::error::Result;
use flockwise_data::{ConnectivityState, WeightVector};

#[derive(Debug, Clone, PartialEq)]
pub enum AdaptiveWeightPolicy {
    TwoState {
        threshold: usize,
        isolated: WeightVector,
        connected: WeightVector,
    },
    ThreeState {
        low: usize,
        high: usize,
        isolated: WeightVector,
        peripheral: WeightVector,
        central: WeightVector,
    },
}

impl AdaptiveWeightPolicy {
    pub fn from_config(config: &PolicyConfig) -> Result<Self> {
        config.validate()?;
        // validate() has rejected negative thresholds
        Ok(match *config {
            PolicyConfig::TwoState {
                threshold,
                isolated,
                connected,
            } => Self::TwoState {
                threshold: threshold as usize,
                isolated,
                connected,
            },
            PolicyConfig::ThreeState {
                thresholds: [low, high],
                isolated,
                peripheral,
                central,
            } => Self::ThreeState {
                low: low as usize,
                high: high as usize,
                isolated,
                peripheral,
                central,
            },
        })
    }

    /// Maps a neighbor count to its connectivity state.
    #[must_use]
    pub fn classify(&self, neighbor_count: usize) -> ConnectivityState {
        match *self {
            Self::TwoState { threshold, .. } => {
                if neighbor_count < threshold {
                    ConnectivityState::Isolated
                } else {
                    ConnectivityState::Connected
                }
            }
            Self::ThreeState { low, high, .. } => {
                if neighbor_count < low {
                    ConnectivityState::Isolated
                } else if neighbor_count < high {
                    ConnectivityState::Peripheral
                } else {
                    ConnectivityState::Connected
                }
            }
        }
    }

    /// Weight vector associated with `state`.
    ///
    /// `Peripheral` has no vector of its own in the two-state variant and
    /// falls back to the isolated one; constructors never produce it there.
    #[must_use]
    pub fn weights(&self, state: ConnectivityState) -> WeightVector {
        match (self, state) {
            (Self::TwoState { isolated, .. }, ConnectivityState::Isolated)
            | (Self::TwoState { isolated, .. }, ConnectivityState::Peripheral) => *isolated,
            (Self::TwoState { connected, .. }, ConnectivityState::Connected) => *connected,
            (Self::ThreeState { isolated, .. }, ConnectivityState::Isolated) => *isolated,
            (Self::ThreeState { peripheral, .. }, ConnectivityState::Peripheral) => *peripheral,
            (Self::ThreeState { central, .. }, ConnectivityState::Connected) => *central,
        }
    }

    #[must_use]
    pub fn select(&self, neighbor_count: usize) -> (ConnectivityState, WeightVector) {
        let state = self.classify(neighbor_count);
        (state, self.weights(state))
    }

    /// States this policy produces, in column order.
    #[must_use]
    pub fn states(&self) -> &'static [ConnectivityState] {
        match self {
            Self::TwoState { .. } => &[ConnectivityState::Isolated, ConnectivityState::Connected],
            Self::ThreeState { .. } => &[
                ConnectivityState::Isolated,
                ConnectivityState::Peripheral,
                ConnectivityState::Connected,
            ],
        }
    }

    #[must_use]
    pub fn label(&self, state: ConnectivityState) -> &'static str {
        match (self, state) {
            (_, ConnectivityState::Isolated) => "isolated",
            (_, ConnectivityState::Peripheral) => "peripheral",
            (Self::TwoState { .. }, ConnectivityState::Connected) => "connected",
            (Self::ThreeState { .. }, ConnectivityState::Connected) => "central",
        }
    }

    /// Export column names for the state tally.
    #[must_use]
    pub fn state_labels(&self) -> Vec<&'static str> {
        self.states().iter().map(|s| self.label(*s)).collect()
    }
}
