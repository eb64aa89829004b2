use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use serde_aux::prelude::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub application: ApplicationSettings,
    pub allow_cors: bool,
    pub game: GameSettings,
    pub word_source: WordSourceSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct GameSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub inactivity_timeout_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub client_timeout_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_players: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_players: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub seconds_per_player: u32,
}

impl GameSettings {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_seconds)
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_millis(self.client_timeout_millis)
    }

    /// A round needs at least one player to pick the liar from.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_players == 0 {
            return Err("game.min_players must be at least 1.".to_string());
        }
        if self.max_players < self.min_players {
            return Err(format!(
                "game.max_players ({}) must not be lower than game.min_players ({}).",
                self.max_players, self.min_players
            ));
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            inactivity_timeout_seconds: 300,
            client_timeout_millis: 10_000,
            min_players: 3,
            max_players: 10,
            seconds_per_player: 20,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct WordSourceSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_timeout_millis: u64,
}

impl WordSourceSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_millis)
    }
}

impl Config {
    pub fn get() -> Result<Config, ConfigError> {
        let base_path = std::env::current_dir().map_err(|error| {
            ConfigError::Message(format!(
                "Failed to determine the current directory. Error: '{error}'."
            ))
        })?;
        let configuration_directory = base_path.join("config");

        let environment: Environment = std::env::var("ENVIRONMENT")
            .map_err(|_| ConfigError::NotFound("ENVIRONMENT".to_string()))?
            .try_into()
            .map_err(ConfigError::Message)?;

        let environment_filename = format!("{}.yaml", environment.as_str());

        let config = config::Config::builder()
            .add_source(config::File::from(
                configuration_directory.join("base.yaml"),
            ))
            .add_source(config::File::from(
                configuration_directory.join(environment_filename),
            ))
            // APP_WORD_SOURCE__API_KEY=... overrides word_source.api_key
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config = config.try_deserialize::<Config>()?;
        config.game.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }
}

enum Environment {
    Dev,
    Prod,
}

const DEV: &str = "dev";
const PROD: &str = "prod";

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => DEV,
            Environment::Prod => PROD,
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        match string.to_lowercase().as_str() {
            DEV => Ok(Self::Dev),
            PROD => Ok(Self::Prod),
            other => Err(format!(
                "{other} is not a supported environment. Use either `{DEV}` or `{PROD}`.",
            )),
        }
    }
}
