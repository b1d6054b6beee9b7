use crate::prelude::*;

use serde::Deserialize;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub unit: Unit,
    pub domoticz: Domoticz,

    #[serde(default = "Config::default_dashboard")]
    pub dashboard: Dashboard,

    #[serde(default = "Config::default_loglevel")]
    pub loglevel: String,
}

// Unit {{{
#[derive(Clone, Debug, Deserialize)]
pub struct Unit {
    /// Base URL of the Xtend indoor unit. The WIFI connection must be
    /// active, indicated by a flashing purple LED on the unit.
    #[serde(default = "Config::default_unit_host")]
    pub host: String,

    /// Seconds between polls.
    #[serde(default = "Config::default_poll_interval")]
    pub poll_interval: u64,

    /// Request timeout in seconds.
    #[serde(default = "Config::default_timeout")]
    pub timeout: u64,
}
impl Unit {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn poll_interval(&self) -> u64 {
        self.poll_interval
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }
} // }}}

// Domoticz {{{
#[derive(Clone, Debug, Deserialize)]
pub struct Domoticz {
    #[serde(default = "Config::default_enabled")]
    pub enabled: bool,

    pub url: String,

    /// The Domoticz hardware id the devices are registered under; combined
    /// with the slot number it forms each DeviceID.
    pub hardware_id: u16,

    /// Slots whose readings should not be written.
    #[serde(default = "Vec::new")]
    pub disabled_slots: Vec<u8>,
}
impl Domoticz {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn hardware_id(&self) -> u16 {
        self.hardware_id
    }

    pub fn disabled_slots(&self) -> &[u8] {
        &self.disabled_slots
    }
} // }}}

// Dashboard {{{
#[derive(Clone, Debug, Deserialize)]
pub struct Dashboard {
    #[serde(default = "Config::default_enabled")]
    pub enabled: bool,

    #[serde(default = "Config::default_dashboard_path")]
    pub path: String,
}
impl Dashboard {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn path(&self) -> &str {
        &self.path
    }
} // }}}

pub struct ConfigWrapper {
    config: Arc<Mutex<Config>>,
}

impl Clone for ConfigWrapper {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
        }
    }
}

impl ConfigWrapper {
    pub fn new(file: String) -> Result<Self> {
        let config = Config::new(file)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config: Arc::new(Mutex::new(config)),
        }
    }

    pub fn unit(&self) -> Unit {
        self.config.lock().unwrap().unit.clone()
    }

    pub fn domoticz(&self) -> Domoticz {
        self.config.lock().unwrap().domoticz.clone()
    }

    pub fn dashboard(&self) -> Dashboard {
        self.config.lock().unwrap().dashboard.clone()
    }

    pub fn loglevel(&self) -> String {
        self.config.lock().unwrap().loglevel.clone()
    }

    pub fn log_summary(&self) {
        self.config.lock().unwrap().log_summary();
    }
}

impl Config {
    pub fn new(file: String) -> Result<Self> {
        let content = std::fs::read_to_string(&file)
            .map_err(|err| file_error!("error reading {}: {}", file, err))?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  Unit:");
        info!("    Host: {}", self.unit.host);
        info!("    Poll interval: {}s", self.unit.poll_interval);
        info!("    Timeout: {}s", self.unit.timeout);
        info!(
            "  Domoticz: {}",
            if self.domoticz.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        if self.domoticz.enabled {
            info!("    URL: {}", self.domoticz.url);
            info!("    Hardware id: {}", self.domoticz.hardware_id);
            if !self.domoticz.disabled_slots.is_empty() {
                info!("    Disabled slots: {:?}", self.domoticz.disabled_slots);
            }
        }
        info!(
            "  Dashboard: {}",
            if self.dashboard.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        if self.dashboard.enabled {
            info!("    Path: {}", self.dashboard.path);
        }
        info!("  Log level: {}", self.loglevel);
    }

    fn validate(&self) -> Result<()> {
        if let Err(e) = url::Url::parse(&self.unit.host) {
            return Err(file_error!("invalid unit host URL: {}", e));
        }
        if !(10..=300).contains(&self.unit.poll_interval) {
            bail!(
                "unit.poll_interval must be between 10 and 300 seconds, got {}",
                self.unit.poll_interval
            );
        }
        if self.unit.timeout == 0 {
            bail!("unit.timeout must be at least 1 second");
        }

        if self.domoticz.enabled {
            if let Err(e) = url::Url::parse(&self.domoticz.url) {
                return Err(file_error!("invalid Domoticz URL: {}", e));
            }
            if self.domoticz.hardware_id == 0 {
                bail!("domoticz.hardware_id must be set");
            }
        }

        if self.dashboard.enabled && self.dashboard.path.is_empty() {
            bail!("dashboard.path cannot be empty");
        }

        Ok(())
    }

    fn default_unit_host() -> String {
        // address of the indoor unit after activation by pressing its button
        "http://10.20.30.1".to_string()
    }

    fn default_poll_interval() -> u64 {
        30
    }

    fn default_timeout() -> u64 {
        5
    }

    fn default_enabled() -> bool {
        true
    }

    fn default_dashboard() -> Dashboard {
        Dashboard {
            enabled: Self::default_enabled(),
            path: Self::default_dashboard_path(),
        }
    }

    fn default_dashboard_path() -> String {
        "DASHTICZCONFIG.js".to_string()
    }

    fn default_loglevel() -> String {
        "info".to_string()
    }
}
