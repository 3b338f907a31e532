//! Simulation - run a headless session driven by an agent
//!
//! Gravity is counted in actions instead of wall-clock time: after every
//! `gravity_every` agent actions the session gets one [`Session::tick`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::agent::AgentKind;
use crate::core::GridConfig;
use crate::error::EngineError;
use crate::session::Session;
use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_GRAVITY_EVERY, DEFAULT_SIMULATION_STEPS,
};

/// Smallest board every shape can spawn on
pub const MIN_BOARD_WIDTH: usize = 4;
pub const MIN_BOARD_HEIGHT: usize = 2;

/// Simulation settings; missing fields in a config file take the defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub agent: AgentKind,
    pub seed: u32,
    /// Upper bound on agent actions
    pub steps: u32,
    /// Agent actions per gravity tick (0 disables gravity)
    pub gravity_every: u32,
    pub height: usize,
    pub width: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent: AgentKind::default(),
            seed: 1,
            steps: DEFAULT_SIMULATION_STEPS,
            gravity_every: DEFAULT_GRAVITY_EVERY,
            height: DEFAULT_BOARD_HEIGHT,
            width: DEFAULT_BOARD_WIDTH,
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width < MIN_BOARD_WIDTH {
            return Err(EngineError::InvalidConfig(format!(
                "width must be at least {}, got {}",
                MIN_BOARD_WIDTH, self.width
            )));
        }
        if self.height < MIN_BOARD_HEIGHT {
            return Err(EngineError::InvalidConfig(format!(
                "height must be at least {}, got {}",
                MIN_BOARD_HEIGHT, self.height
            )));
        }
        Ok(())
    }

    pub fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.height, self.width)
    }
}

/// Outcome of one simulated game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub agent: String,
    pub seed: u32,
    pub steps: u32,
    pub score: u32,
    pub lines_cleared: u32,
    pub pieces: u32,
    pub game_over: bool,
}

/// Play one game until it ends or the step budget runs out
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport, EngineError> {
    config.validate()?;

    let mut session = Session::new(config.grid_config(), config.seed);
    let mut agent = config.agent.build(config.seed.wrapping_add(1));
    session.start();

    let mut steps = 0u32;
    while steps < config.steps && !session.is_game_over() {
        let action = agent.act(&session.observation());
        session.apply_action(action)?;
        steps += 1;

        if config.gravity_every > 0 && steps % config.gravity_every == 0 {
            session.tick()?;
        }
    }

    let report = SimulationReport {
        agent: agent.name().to_string(),
        seed: config.seed,
        steps,
        score: session.score(),
        lines_cleared: session.lines_cleared(),
        pieces: session.pieces_spawned(),
        game_over: session.is_game_over(),
    };
    tracing::info!(
        agent = %report.agent,
        steps = report.steps,
        score = report.score,
        game_over = report.game_over,
        "simulation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config = SimulationConfig::from_json_str(r#"{"agent": "random", "seed": 9}"#).unwrap();
        assert_eq!(config.agent, AgentKind::Random);
        assert_eq!(config.seed, 9);
        assert_eq!(config.width, DEFAULT_BOARD_WIDTH);
        assert_eq!(config.steps, DEFAULT_SIMULATION_STEPS);
    }

    #[test]
    fn test_config_rejects_narrow_board() {
        let err = SimulationConfig::from_json_str(r#"{"width": 3}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_rejects_unknown_agent() {
        let err = SimulationConfig::from_json_str(r#"{"agent": "smart"}"#).unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let config = SimulationConfig {
            steps: 500,
            ..SimulationConfig::default()
        };
        let a = run_simulation(&config).unwrap();
        let b = run_simulation(&config).unwrap();
        assert_eq!(a, b);
        assert!(a.steps <= 500);
        assert!(a.pieces >= 1);
    }

    #[test]
    fn test_simulation_stops_at_game_over() {
        let config = SimulationConfig {
            agent: AgentKind::Random,
            steps: 1_000_000,
            gravity_every: 1,
            height: 6,
            width: 4,
            ..SimulationConfig::default()
        };
        let report = run_simulation(&config).unwrap();
        assert!(report.game_over);
        assert!(report.steps < 1_000_000);
    }
}
