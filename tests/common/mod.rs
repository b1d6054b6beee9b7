#![allow(dead_code)]

use xtend_bridge::prelude::*;

pub fn common_setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Factory();
impl Factory {
    pub fn config() -> Config {
        Self::config_with_host("http://10.20.30.1")
    }

    pub fn config_with_host(host: &str) -> Config {
        Config {
            unit: config::Unit {
                host: host.to_string(),
                poll_interval: 30,
                timeout: 5,
            },
            domoticz: config::Domoticz {
                enabled: true,
                url: "http://127.0.0.1:8080".to_string(),
                hardware_id: 1,
                disabled_slots: Vec::new(),
            },
            dashboard: config::Dashboard {
                enabled: true,
                path: "DASHTICZCONFIG.js".to_string(),
            },
            loglevel: "info".to_string(),
        }
    }

    pub fn unit(host: &str) -> config::Unit {
        config::Unit {
            host: host.to_string(),
            poll_interval: 30,
            timeout: 5,
        }
    }

    pub fn decoder() -> Decoder {
        Decoder::new(Catalog::new())
    }
}
