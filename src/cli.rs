use anyhow::{anyhow, Result};

use grid_tetris::engine::{AgentKind, SimulationConfig};

pub const USAGE: &str = "usage: grid-tetris simulate [--config FILE] [--agent random|biased] \
[--seed N] [--steps N] [--gravity-every N] [--height N] [--width N]";

/// Parse `simulate ...` arguments (program name already stripped)
///
/// Returns `Ok(None)` when the first argument is not `simulate`. Flags are
/// applied in order on top of the config file (or the defaults).
pub fn parse_simulate_args(args: &[String]) -> Result<Option<SimulationConfig>> {
    if args.is_empty() || args[0] != "simulate" {
        return Ok(None);
    }

    let mut config = SimulationConfig::default();
    let mut i = 1usize;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let value = || {
            args.get(i)
                .ok_or_else(|| anyhow!("simulate: missing value for {}", flag))
        };
        match flag {
            "--config" => {
                let path = value()?;
                config = SimulationConfig::load(path)?;
            }
            "--agent" => {
                let v = value()?;
                config.agent =
                    AgentKind::from_str(v).ok_or_else(|| anyhow!("simulate: unknown agent: {}", v))?;
            }
            "--seed" => config.seed = parse_number(flag, value()?)?,
            "--steps" => config.steps = parse_number(flag, value()?)?,
            "--gravity-every" => config.gravity_every = parse_number(flag, value()?)?,
            "--height" => config.height = parse_number(flag, value()?)?,
            "--width" => config.width = parse_number(flag, value()?)?,
            other => {
                return Err(anyhow!("simulate: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    config.validate()?;
    Ok(Some(config))
}

fn parse_number<T: std::str::FromStr>(flag: &str, v: &str) -> Result<T> {
    v.parse::<T>()
        .map_err(|_| anyhow!("simulate: invalid {} value: {}", flag, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_other_modes_are_not_parsed() {
        assert!(parse_simulate_args(&args(&[])).unwrap().is_none());
        assert!(parse_simulate_args(&args(&["play"])).unwrap().is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse_simulate_args(&args(&[
            "simulate", "--agent", "random", "--seed", "42", "--steps", "300", "--width", "8",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config.agent, AgentKind::Random);
        assert_eq!(config.seed, 42);
        assert_eq!(config.steps, 300);
        assert_eq!(config.width, 8);
        assert_eq!(config.height, SimulationConfig::default().height);
    }

    #[test]
    fn test_bad_values_are_reported() {
        assert!(parse_simulate_args(&args(&["simulate", "--seed"])).is_err());
        assert!(parse_simulate_args(&args(&["simulate", "--seed", "abc"])).is_err());
        assert!(parse_simulate_args(&args(&["simulate", "--agent", "smart"])).is_err());
        assert!(parse_simulate_args(&args(&["simulate", "--width", "2"])).is_err());
        assert!(parse_simulate_args(&args(&["simulate", "--fast"])).is_err());
    }
}
