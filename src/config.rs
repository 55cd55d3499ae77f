//! Runtime configuration: environment first, command-line arguments on top.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use log::LevelFilter;

pub const USAGE: &str = "\
usage: run-tetris [--activities PATH] [--seed N] [--log PATH] [--log-level LEVEL]

  --activities PATH   JSON array of activities; runs drive the piece sizes
  --seed N            seed for random pieces (used when there are no runs)
  --log PATH          append JSON-lines logs to PATH
  --log-level LEVEL   off|error|warn|info|debug|trace (default info)

environment: RUN_TETRIS_ACTIVITIES, RUN_TETRIS_SEED, RUN_TETRIS_LOG_PATH, RUN_TETRIS_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub activities: Option<PathBuf>,
    pub seed: u32,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Play(RunConfig),
    Help,
}

impl RunConfig {
    /// Read `RUN_TETRIS_*` variables. Malformed values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`RunConfig::from_env`] over an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            var(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let activities = non_empty("RUN_TETRIS_ACTIVITIES").map(PathBuf::from);
        let seed = non_empty("RUN_TETRIS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);
        let log_path = non_empty("RUN_TETRIS_LOG_PATH").map(PathBuf::from);
        let log_level = non_empty("RUN_TETRIS_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            activities,
            seed,
            log_path,
            log_level,
        }
    }
}

/// Seed from the wall clock, for games without an explicit seed
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

/// Apply command-line arguments (program name excluded) over `base`.
pub fn parse_args(args: &[String], base: RunConfig) -> Result<Invocation> {
    let mut config = base;
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "-h" || flag == "--help" {
            return Ok(Invocation::Help);
        }

        i += 1;
        let v = args
            .get(i)
            .ok_or_else(|| anyhow!("missing value for {}", flag))?;
        match flag {
            "--activities" => config.activities = Some(PathBuf::from(v)),
            "--seed" => {
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--log" => config.log_path = Some(PathBuf::from(v)),
            "--log-level" => {
                config.log_level = v
                    .parse::<LevelFilter>()
                    .map_err(|_| anyhow!("invalid --log-level value: {}", v))?;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Invocation::Play(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn base() -> RunConfig {
        RunConfig {
            activities: None,
            seed: 7,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }

    #[test]
    fn from_vars_reads_all_keys() {
        let cfg = RunConfig::from_vars(|key| match key {
            "RUN_TETRIS_ACTIVITIES" => Some("runs.json".to_string()),
            "RUN_TETRIS_SEED" => Some(" 42 ".to_string()),
            "RUN_TETRIS_LOG_PATH" => Some("/tmp/run-tetris.jsonl".to_string()),
            "RUN_TETRIS_LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        });
        assert_eq!(cfg.activities, Some(PathBuf::from("runs.json")));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/run-tetris.jsonl")));
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn from_vars_ignores_blank_and_malformed_values() {
        let cfg = RunConfig::from_vars(|key| match key {
            "RUN_TETRIS_ACTIVITIES" => Some("   ".to_string()),
            "RUN_TETRIS_LOG_LEVEL" => Some("chatty".to_string()),
            _ => None,
        });
        assert_eq!(cfg.activities, None);
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.log_level, LevelFilter::Info);
    }

    #[test]
    fn parse_args_overrides_base() {
        let inv = parse_args(
            &args(&["--activities", "a.json", "--seed", "9", "--log", "x.log", "--log-level", "trace"]),
            base(),
        )
        .unwrap();
        assert_eq!(
            inv,
            Invocation::Play(RunConfig {
                activities: Some(PathBuf::from("a.json")),
                seed: 9,
                log_path: Some(PathBuf::from("x.log")),
                log_level: LevelFilter::Trace,
            })
        );
    }

    #[test]
    fn parse_args_without_flags_keeps_base() {
        assert_eq!(parse_args(&[], base()).unwrap(), Invocation::Play(base()));
    }

    #[test]
    fn parse_args_help() {
        assert_eq!(parse_args(&args(&["--help"]), base()).unwrap(), Invocation::Help);
        assert_eq!(parse_args(&args(&["--seed", "1", "-h"]), base()).unwrap(), Invocation::Help);
    }

    #[test]
    fn parse_args_rejects_bad_input() {
        let err = parse_args(&args(&["--seed", "minus-one"]), base()).unwrap_err();
        assert!(err.to_string().contains("--seed"));
        assert!(parse_args(&args(&["--activities"]), base()).is_err());
        assert!(parse_args(&args(&["--speed", "3"]), base()).is_err());
        assert!(parse_args(&args(&["--log-level", "loud"]), base()).is_err());
    }
}
