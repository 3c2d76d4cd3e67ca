use std::env;
use std::fs;
use std::str::FromStr;
use std::time::Duration;

use log::{info, warn};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.json";
const FALLBACK_CONFIG_FILE: &str = "_config.json";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TimingFile {
    pub travel_ms: u64,
    pub dwell_ms: u64,
}

impl Default for TimingFile {
    fn default() -> Self {
        TimingFile {
            travel_ms: 2500,
            dwell_ms: 3000,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ConfigFile {
    pub cars: Vec<String>,
    pub timing: TimingFile,
    pub output: OutputMode,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            cars: vec![String::from("passenger"), String::from("service")],
            timing: TimingFile::default(),
            output: OutputMode::Board,
        }
    }
}

/// How the demo binary narrates car events.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Board,
    Json,
    Log,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "board" => Ok(OutputMode::Board),
            "json" => Ok(OutputMode::Json),
            "log" => Ok(OutputMode::Log),
            _ => Err(mode.to_string()),
        }
    }
}

/// Simulated duration of each movement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub travel: Duration,
    pub dwell: Duration,
}

impl TimingConfig {
    pub fn zero() -> Self {
        TimingConfig {
            travel: Duration::ZERO,
            dwell: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub cars: Vec<String>,
    pub timing: TimingConfig,
    pub output: OutputMode,
}

impl Config {
    /// Reads `config.json` (or the shipped fallback) and applies the
    /// process's command line on top.
    pub fn get() -> Result<Self, ConfigError> {
        let args: Vec<String> = env::args().skip(1).collect();
        Config::from_args(&args)
    }

    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let overrides = parse_env_args(args)?;
        let mut config_file = match &overrides.config_path {
            Some(path) => read_config_file(path)?,
            None => read_default_config_file()?,
        };
        if let Some(travel_ms) = overrides.travel_ms {
            config_file.timing.travel_ms = travel_ms;
        }
        if let Some(dwell_ms) = overrides.dwell_ms {
            config_file.timing.dwell_ms = dwell_ms;
        }
        if let Some(output) = overrides.output {
            config_file.output = output;
        }
        Ok(Config::from(config_file))
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config_file: ConfigFile = serde_json::from_str(contents)?;
        Ok(Config::from(config_file))
    }
}

impl From<ConfigFile> for Config {
    fn from(config_file: ConfigFile) -> Self {
        Config {
            cars: config_file.cars,
            timing: TimingConfig {
                travel: Duration::from_millis(config_file.timing.travel_ms),
                dwell: Duration::from_millis(config_file.timing.dwell_ms),
            },
            output: config_file.output,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from(ConfigFile::default())
    }
}

fn read_config_file(path: &str) -> Result<ConfigFile, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source: source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

fn read_default_config_file() -> Result<ConfigFile, ConfigError> {
    match fs::read_to_string(CONFIG_FILE) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(_) => {
            info!("No configuration file provided, using default settings...");
            match fs::read_to_string(FALLBACK_CONFIG_FILE) {
                Ok(contents) => Ok(serde_json::from_str(&contents)?),
                Err(_) => Ok(ConfigFile::default()),
            }
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct Overrides {
    config_path: Option<String>,
    travel_ms: Option<u64>,
    dwell_ms: Option<u64>,
    output: Option<OutputMode>,
}

fn parse_env_args(args: &[String]) -> Result<Overrides, ConfigError> {
    let mut overrides = Overrides::default();

    for arg_pair in args.chunks(2) {
        let flag = arg_pair[0].as_str();
        let value = match arg_pair.get(1) {
            Some(value) => value.as_str(),
            None => {
                warn!("argument {} has no value, skipping...", flag);
                continue;
            }
        };
        let invalid = || ConfigError::InvalidArgument {
            flag: flag.to_string(),
            value: value.to_string(),
        };
        match flag {
            "--config" => overrides.config_path = Some(value.to_string()),
            "--travel-ms" => overrides.travel_ms = Some(value.parse().map_err(|_| invalid())?),
            "--dwell-ms" => overrides.dwell_ms = Some(value.parse().map_err(|_| invalid())?),
            "--output" => overrides.output = Some(value.parse().map_err(|_| invalid())?),
            _ => warn!("illegal argument {}, skipping...", flag),
        }
    }
    Ok(overrides)
}
