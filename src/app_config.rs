use crate::domain::Calendar;
use crate::view_state::DEFAULT_VIEWPORT_SPAN_M;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    storage: Storage,
    #[serde(default)]
    calendar: Calendar,
    tracking: Tracking,
    feed: Feed,
    #[serde(default)]
    map: Map,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("FOOTPRINTS").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn tracking(&self) -> &Tracking {
        &self.tracking
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn map(&self) -> &Map {
        &self.map
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    intent_buffer_size: usize,
}

impl Core {
    pub fn intent_buffer_size(&self) -> usize {
        self.intent_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Storage {
    directory: Option<String>,
    key: String,
}

impl Storage {
    /// Without a directory the history only lives as long as the process.
    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Deserialize)]
pub struct Tracking {
    #[serde(default)]
    start_on_launch: bool,
    #[serde(default)]
    validate_coordinates: bool,
}

impl Tracking {
    pub fn start_on_launch(&self) -> bool {
        self.start_on_launch
    }

    pub fn validate_coordinates(&self) -> bool {
        self.validate_coordinates
    }
}

#[derive(Debug, Deserialize)]
pub struct Feed {
    replay_file: String,
    #[serde(with = "humantime_serde")]
    interval: Duration,
}

impl Feed {
    pub fn replay_file(&self) -> &str {
        &self.replay_file
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[derive(Debug, Deserialize)]
pub struct Map {
    #[serde(default = "default_viewport_span_m")]
    viewport_span_m: f64,
}

impl Default for Map {
    fn default() -> Self {
        Map {
            viewport_span_m: default_viewport_span_m(),
        }
    }
}

impl Map {
    pub fn viewport_span_m(&self) -> f64 {
        self.viewport_span_m
    }
}

fn default_viewport_span_m() -> f64 {
    DEFAULT_VIEWPORT_SPAN_M
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core { intent_buffer_size: 1 },
                storage: Storage {
                    directory: Some("data".to_string()),
                    key: "saved_locations".to_string(),
                },
                calendar: Calendar::default(),
                tracking: Tracking {
                    start_on_launch: false,
                    validate_coordinates: false,
                },
                feed: Feed {
                    replay_file: "fixes/walk.json".to_string(),
                    interval: Duration::from_secs(1),
                },
                map: Map {
                    viewport_span_m: DEFAULT_VIEWPORT_SPAN_M,
                },
            },
        }
    }

    pub fn viewport_span_m(mut self, span_m: f64) -> Self {
        self.config.map.viewport_span_m = span_m;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
