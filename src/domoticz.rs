use crate::prelude::*;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelData {
    Reading(Reading),
    Shutdown,
}

/// Device sink: forwards readings to a Domoticz server over its JSON API.
///
/// Each reading is written with `param=udevice` and an explicit device id,
/// so Domoticz creates missing devices on first update.
#[derive(Clone)]
pub struct Domoticz {
    config: ConfigWrapper,
    channels: Channels,
    http: reqwest::Client,
    /// slot -> device class, for the dtype/dsubtype parameters
    classes: HashMap<u8, DeviceClass>,
}

/// DeviceID as registered in Domoticz: hardware id and slot, both hex.
pub fn device_id(hardware_id: u16, slot: u8) -> String {
    format!("{:04x}{:04x}", hardware_id, slot)
}

// Domoticz (type, subtype, switchtype) numbers per device class.
fn device_numbers(class: DeviceClass) -> (u8, u8, u8) {
    match class {
        DeviceClass::Temperature => (80, 5, 0),
        DeviceClass::Pressure => (243, 9, 0),
        DeviceClass::Flow => (243, 30, 0),
        DeviceClass::FanSpeed => (243, 7, 0),
        DeviceClass::Percentage => (243, 6, 0),
        DeviceClass::CustomMetric => (243, 31, 0),
        DeviceClass::Counter => (113, 0, 3),
        // usage meters are switchtype 0, generation meters 4
        DeviceClass::EnergyPair { generation } => (243, 29, if generation { 4 } else { 0 }),
        DeviceClass::EnumText => (243, 19, 0),
    }
}

impl Domoticz {
    pub fn new(config: ConfigWrapper, channels: Channels, catalog: Catalog) -> Result<Self> {
        let classes = catalog
            .iter()
            .map(|field| (field.slot, field.class))
            .collect();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            config,
            channels,
            http,
            classes,
        })
    }

    pub async fn start(&self) -> Result<()> {
        if !self.config.domoticz().enabled() {
            info!("domoticz sink disabled, skipping");
            return Ok(());
        }

        info!("initializing domoticz sink at {}", self.config.domoticz().url());

        self.sender().await
    }

    pub fn stop(&self) {
        let _ = self.channels.to_domoticz.send(ChannelData::Shutdown);
    }

    async fn sender(&self) -> Result<()> {
        use ChannelData::*;

        let mut receiver = self.channels.to_domoticz.subscribe();
        let sink = self.config.domoticz();
        let inactive: HashSet<u8> = sink.disabled_slots().iter().copied().collect();

        loop {
            match receiver.recv().await {
                Ok(Shutdown) => {
                    info!("domoticz sender received shutdown signal");
                    break;
                }
                Ok(Reading(reading)) => {
                    if inactive.contains(&reading.slot) {
                        trace!("slot {} inactive, dropping reading", reading.slot);
                        continue;
                    }

                    // a failed update is dropped; the next cycle brings a
                    // fresh reading anyway
                    if let Err(err) = self.update_device(&sink, &reading).await {
                        error!("update for slot {} failed: {}", reading.slot, err);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("domoticz sender lagged, dropped {} readings", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }

        info!("domoticz sender loop exiting");

        Ok(())
    }

    async fn update_device(&self, sink: &config::Domoticz, reading: &Reading) -> Result<()> {
        let Some(&class) = self.classes.get(&reading.slot) else {
            bail!("no catalog entry for slot {}", reading.slot);
        };
        let (dtype, dsubtype, dswitchtype) = device_numbers(class);

        let hid = sink.hardware_id().to_string();
        let did = device_id(sink.hardware_id(), reading.slot);
        let dunit = reading.slot.to_string();
        let dtype = dtype.to_string();
        let dsubtype = dsubtype.to_string();
        let dswitchtype = dswitchtype.to_string();
        let nvalue = reading.numeric_value.to_string();

        let url = format!("{}/json.htm", sink.url().trim_end_matches('/'));
        let query = [
            ("type", "command"),
            ("param", "udevice"),
            ("hid", hid.as_str()),
            ("did", did.as_str()),
            ("dunit", dunit.as_str()),
            ("dtype", dtype.as_str()),
            ("dsubtype", dsubtype.as_str()),
            ("dswitchtype", dswitchtype.as_str()),
            ("nvalue", nvalue.as_str()),
            ("svalue", reading.display_value.as_str()),
        ];

        trace!(
            "slot {}: nvalue={} svalue={}",
            reading.slot,
            reading.numeric_value,
            reading.display_value
        );

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|err| file_error_with_source!(err, "request to Domoticz failed"))?;

        if !response.status().is_success() {
            bail!("Domoticz returned HTTP {}", response.status());
        }

        Ok(())
    }
}
