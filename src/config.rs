use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::duplicate::SuggestionRules;
use crate::error::Result;
use crate::lottery::TicketRules;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_FILE: &str = "Roulette.toml";

/// Prefix of environment variables that override the config file.
pub const ENV_PREFIX: &str = "ROULETTE_";

/// Application configuration, derived from built-in defaults, then
/// `Roulette.toml`, then `ROULETTE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    most_wanted_weight: u32,
    somewhat_wanted_weight: u32,
    max_distance: usize,
    suggestion_limit: usize,
    seed: Option<u64>,
    log_config: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let tickets = TicketRules::default();
        let suggestions = SuggestionRules::default();
        Self {
            most_wanted_weight: tickets.most_wanted_weight,
            somewhat_wanted_weight: tickets.somewhat_wanted_weight,
            max_distance: suggestions.max_distance,
            suggestion_limit: suggestions.limit,
            seed: None,
            log_config: PathBuf::from("log4rs.yaml"),
        }
    }
}

impl Config {
    /// Load from the default config file and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from the given config file and the environment.
    /// A missing file is not an error; the defaults are used instead.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::figment(path.as_ref()).extract().map_err(Into::into)
    }

    /// The layered configuration sources.
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Ticket multipliers for the lottery.
    /// Configured via `MOST_WANTED_WEIGHT` and `SOMEWHAT_WANTED_WEIGHT`.
    pub fn ticket_rules(&self) -> TicketRules {
        TicketRules {
            most_wanted_weight: self.most_wanted_weight,
            somewhat_wanted_weight: self.somewhat_wanted_weight,
        }
    }

    /// Near-duplicate limits.
    /// Configured via `MAX_DISTANCE` and `SUGGESTION_LIMIT`.
    pub fn suggestion_rules(&self) -> SuggestionRules {
        SuggestionRules {
            max_distance: self.max_distance,
            limit: self.suggestion_limit,
        }
    }

    /// Fixed seed for reproducible draws; unset means draw from the OS.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Path of the log4rs YAML config.
    pub fn log_config(&self) -> &Path {
        &self.log_config
    }
}
