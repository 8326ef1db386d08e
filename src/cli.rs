//! Command-line arguments.

use crate::core::config::GameConfig;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: handflap [options]

Options:
  --config PATH      Read settings from a JSON file
  --landmarks PATH   Replay recorded hand landmarks (JSON lines)
  --tracker CMD      Run a hand tracker that prints JSON lines to stdout
  --keyboard         Play with the keyboard only
  --seed N           Seed the pipe generator
  --no-debug         Start with the hand view hidden
  --version          Show version information
  --help             Show this help message";

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Run(CliOptions),
    Version,
    Help,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub landmark_file: Option<PathBuf>,
    pub tracker_command: Option<String>,
    pub keyboard_only: bool,
    pub seed: Option<u64>,
    pub hide_debug: bool,
}

impl CliOptions {
    /// Overlay flags on top of file configuration.
    pub fn apply(&self, config: &mut GameConfig) {
        if self.keyboard_only {
            config.landmark_file = None;
            config.tracker_command = None;
        }
        if let Some(path) = &self.landmark_file {
            config.landmark_file = Some(path.clone());
            config.tracker_command = None;
        }
        if let Some(command) = &self.tracker_command {
            config.tracker_command = Some(command.clone());
            config.landmark_file = None;
        }
        if self.hide_debug {
            config.show_debug = false;
        }
    }
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--config" => options.config_path = Some(value_for(&arg, args.next())?.into()),
            "--landmarks" => options.landmark_file = Some(value_for(&arg, args.next())?.into()),
            "--tracker" => options.tracker_command = Some(value_for(&arg, args.next())?),
            "--keyboard" => options.keyboard_only = true,
            "--no-debug" => options.hide_debug = true,
            "--seed" => {
                let value = value_for(&arg, args.next())?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    let sources = [
        options.landmark_file.is_some(),
        options.tracker_command.is_some(),
        options.keyboard_only,
    ];
    if sources.iter().filter(|&&set| set).count() > 1 {
        return Err("Choose only one of --landmarks, --tracker and --keyboard".to_string());
    }

    Ok(CliCommand::Run(options))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{} needs a value", flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_runs_with_defaults() {
        assert_eq!(parse(&[]), Ok(CliCommand::Run(CliOptions::default())));
    }

    #[test]
    fn test_version_and_help() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_run_options() {
        let parsed = parse(&["--config", "cfg.json", "--tracker", "python3 track.py", "--seed", "42"]);
        let options = match parsed {
            Ok(CliCommand::Run(options)) => options,
            other => panic!("expected run command, got {:?}", other),
        };
        assert_eq!(options.config_path, Some(PathBuf::from("cfg.json")));
        assert_eq!(options.tracker_command.as_deref(), Some("python3 track.py"));
        assert_eq!(options.seed, Some(42));
    }

    #[test]
    fn test_missing_value() {
        assert!(parse(&["--landmarks"]).is_err());
    }

    #[test]
    fn test_bad_seed() {
        assert!(parse(&["--seed", "abc"]).is_err());
    }

    #[test]
    fn test_unknown_argument() {
        assert_eq!(
            parse(&["--fullscreen"]),
            Err("Unknown argument: --fullscreen".to_string())
        );
    }

    #[test]
    fn test_conflicting_sources() {
        assert!(parse(&["--keyboard", "--landmarks", "a.jsonl"]).is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let mut config = GameConfig {
            tracker_command: Some("old-tracker".to_string()),
            ..GameConfig::default()
        };
        let options = CliOptions {
            landmark_file: Some(PathBuf::from("session.jsonl")),
            hide_debug: true,
            ..CliOptions::default()
        };
        options.apply(&mut config);
        assert_eq!(config.landmark_file, Some(PathBuf::from("session.jsonl")));
        assert!(config.tracker_command.is_none());
        assert!(!config.show_debug);
    }

    #[test]
    fn test_keyboard_clears_sources() {
        let mut config = GameConfig {
            tracker_command: Some("tracker".to_string()),
            ..GameConfig::default()
        };
        let options = CliOptions {
            keyboard_only: true,
            ..CliOptions::default()
        };
        options.apply(&mut config);
        assert!(config.tracker_command.is_none());
        assert!(config.landmark_file.is_none());
    }
}
