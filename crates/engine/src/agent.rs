//! Agents - automated players that pick one action per observation
//!
//! Agents only see the boolean occupancy snapshot. Both agents here are
//! random baselines; anything smarter implements [`Agent`] the same way.

use serde::{Deserialize, Serialize};

use crate::core::{Observation, SimpleRng};
use crate::types::Action;

/// Chooses the next action from an occupancy snapshot.
///
/// Object-safe so it can be used as `Box<dyn Agent>`.
pub trait Agent {
    fn act(&mut self, observation: &Observation) -> Action;

    /// Short identifier used in reports
    fn name(&self) -> &'static str;
}

/// Picks every action with equal probability
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: SimpleRng,
}

impl RandomAgent {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, _observation: &Observation) -> Action {
        self.rng
            .choose(&Action::ALL)
            .copied()
            .unwrap_or(Action::MoveDown)
    }

    fn name(&self) -> &'static str {
        AgentKind::Random.as_str()
    }
}

/// Relative action weights: mostly sideways moves and rotations, rarely a
/// single step down or a hold.
pub const BIASED_ACTION_WEIGHTS: [(Action, u32); 6] = [
    (Action::Rotate, 20),
    (Action::MoveLeft, 35),
    (Action::MoveRight, 35),
    (Action::MoveDown, 1),
    (Action::MoveToBottom, 10),
    (Action::SaveBlock, 1),
];

/// Picks actions with the fixed [`BIASED_ACTION_WEIGHTS`]
#[derive(Debug, Clone)]
pub struct BiasedRandomAgent {
    rng: SimpleRng,
    weights: [u32; 6],
}

impl BiasedRandomAgent {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            weights: BIASED_ACTION_WEIGHTS.map(|(_, weight)| weight),
        }
    }
}

impl Agent for BiasedRandomAgent {
    fn act(&mut self, _observation: &Observation) -> Action {
        self.rng
            .weighted_index(&self.weights)
            .map(|idx| BIASED_ACTION_WEIGHTS[idx].0)
            .unwrap_or(Action::MoveDown)
    }

    fn name(&self) -> &'static str {
        AgentKind::Biased.as_str()
    }
}

/// Selectable agent implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    #[default]
    Biased,
}

impl AgentKind {
    /// Parse agent kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random" => Some(AgentKind::Random),
            "biased" | "biased-random" | "biased_random" => Some(AgentKind::Biased),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Biased => "biased",
        }
    }

    /// Instantiate the agent with its own RNG stream
    pub fn build(self, seed: u32) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent::new(seed)),
            AgentKind::Biased => Box::new(BiasedRandomAgent::new(seed)),
        }
    }
}
