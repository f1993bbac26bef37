use log::*;
use serde_derive::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use crate::pad::DEFAULT_PAD_ROWS;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Remap {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

impl Default for Remap {
    fn default() -> Self {
        Self {
            input: PathBuf::from("multiplayer.png"),
            output: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pad {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub rows: u32,
}

impl Default for Pad {
    fn default() -> Self {
        Self {
            input: PathBuf::from("discord.png"),
            output: None,
            rows: DEFAULT_PAD_ROWS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remap: Remap,
    pub pad: Pad,
}

impl Config {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let config_file = match read_to_string(path) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to read config file: {}", e);
                return Err(Box::new(e));
            }
        };

        match toml::from_str(&config_file) {
            Ok(c) => Ok(c),
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                Err(Box::new(e))
            }
        }
    }
}

/// Output path for an operation, falling back to rewriting the input in place
pub fn resolve_output(input: &Path, output: Option<&Path>) -> PathBuf {
    output.unwrap_or(input).to_path_buf()
}
