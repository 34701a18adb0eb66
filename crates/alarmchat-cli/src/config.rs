use crate::timezone::detect_system_timezone;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path to the sqlite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// IANA timezone used to interpret and render wall-clock times
    #[serde(default = "detect_system_timezone")]
    pub timezone: String,
    /// Default cadence for `sweep --every` style deployments
    #[serde(default = "default_sweep_interval_minutes")]
    pub sweep_interval_minutes: u64,
}

fn default_database_path() -> String {
    "alarmchat.db".to_string()
}

fn default_sweep_interval_minutes() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            timezone: detect_system_timezone(),
            sweep_interval_minutes: default_sweep_interval_minutes(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("ALARMCHAT_"))
            .extract()
    }
}
