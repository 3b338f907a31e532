//! Headless driver for the grid engine
//!
//! Everything the core leaves to "the driver" lives here: turning actions into
//! block operations, settling and scoring, holding a block, detecting game
//! over, and running agents against a session.
//!
//! # Example
//!
//! ```
//! use grid_tetris_engine::{run_simulation, AgentKind, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     agent: AgentKind::Random,
//!     steps: 200,
//!     ..SimulationConfig::default()
//! };
//! let report = run_simulation(&config).unwrap();
//! assert!(report.steps <= 200);
//! ```

pub mod agent;
pub mod error;
pub mod session;
pub mod simulation;

pub use grid_tetris_core as core;
pub use grid_tetris_types as types;

pub use agent::{Agent, AgentKind, BiasedRandomAgent, RandomAgent, BIASED_ACTION_WEIGHTS};
pub use error::EngineError;
pub use session::Session;
pub use simulation::{run_simulation, SimulationConfig, SimulationReport};
