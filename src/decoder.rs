use crate::prelude::*;

use serde_json::Value;
use std::collections::HashMap;

/// Raw field values from a single poll, keyed by field code.
pub type RawSample = HashMap<String, Value>;

/// The unit reports this for any field it has no data for this cycle.
pub const SENTINEL_INVALID: i64 = 32767;

// Energy rates are instantaneous watts; anything at or above this is a
// glitched sample and must not reach the accumulating device.
const ENERGY_RATE_LIMIT: f64 = 10000.0;

// The one text field that carries a version string rather than a status code.
const SOFTWARE_VERSION_CODE: &str = "47e0";

/// A decoded reading for one device slot, valid for the current cycle only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    pub slot: u8,
    pub numeric_value: i64,
    pub display_value: String,
    /// Set for energy rates; the sink accumulates these into a counter.
    pub cumulative: bool,
}

#[derive(Clone)]
pub struct Decoder {
    catalog: Catalog,
}

impl Decoder {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Decode every present, valid field of a sample, in catalog order.
    ///
    /// Decoding is per-field isolated: a malformed or out-of-range value
    /// skips that field and the rest of the sample is still processed.
    pub fn decode_sample(&self, sample: &RawSample) -> Vec<Reading> {
        let mut readings = Vec::new();

        for field in self.catalog.iter() {
            let Some(raw) = sample.get(field.code) else {
                debug!("field {} missing from sample", field.code);
                continue;
            };

            if let Some(reading) = self.decode(field.code, raw) {
                readings.push(reading);
            }
        }

        readings
    }

    /// Decode a single field. Returns None when the field produces no
    /// reading this cycle (sentinel, unknown code, malformed or out-of-range
    /// value).
    pub fn decode(&self, code: &str, raw: &Value) -> Option<Reading> {
        if is_sentinel(raw) {
            trace!("field {}: no data this cycle", code);
            return None;
        }

        let field = self.catalog.lookup(code)?;

        match field.class {
            DeviceClass::Temperature
            | DeviceClass::Pressure
            | DeviceClass::Flow
            | DeviceClass::FanSpeed
            | DeviceClass::Percentage
            | DeviceClass::CustomMetric => self.decode_scaled(field, raw),
            DeviceClass::Counter => self.decode_counter(field, raw),
            DeviceClass::EnergyPair { .. } => self.decode_energy(field, raw),
            DeviceClass::EnumText => self.decode_text(field, raw),
        }
    }

    fn decode_scaled(&self, field: &FieldDefinition, raw: &Value) -> Option<Reading> {
        let Some(raw) = raw.as_f64() else {
            warn!("field {}: expected a number, got {}", field.code, raw);
            return None;
        };

        // Scale-1 fields are shown whole, everything else with one decimal.
        // The numeric value then truncates toward zero, matching what the
        // original integration has always reported.
        let digits = if field.scale == 1.0 { 0 } else { 1 };
        let value = round_to(field.scale * raw, digits);

        Some(Reading {
            slot: field.slot,
            numeric_value: value as i64,
            display_value: format!("{:.*}", digits, value),
            cumulative: false,
        })
    }

    fn decode_counter(&self, field: &FieldDefinition, raw: &Value) -> Option<Reading> {
        let Some(count) = raw.as_i64() else {
            warn!("field {}: expected an integer, got {}", field.code, raw);
            return None;
        };

        Some(Reading {
            slot: field.slot,
            numeric_value: count,
            display_value: count.to_string(),
            cumulative: false,
        })
    }

    fn decode_energy(&self, field: &FieldDefinition, raw: &Value) -> Option<Reading> {
        let Some(rate) = raw.as_f64() else {
            warn!("field {}: expected a number, got {}", field.code, raw);
            return None;
        };

        if !(0.0..ENERGY_RATE_LIMIT).contains(&rate) {
            debug!(
                "field {}: rate {} outside [0, {}), skipping",
                field.code, rate, ENERGY_RATE_LIMIT
            );
            return None;
        }

        // Watts are supplied; the kWh counter is computed by the sink, so
        // the display carries the rate plus a unit factor of 1.
        let display_value = match raw.as_i64() {
            Some(watts) => format!("{};1", watts),
            None => format!("{};1", rate),
        };

        Some(Reading {
            slot: field.slot,
            numeric_value: 0,
            display_value,
            cumulative: true,
        })
    }

    fn decode_text(&self, field: &FieldDefinition, raw: &Value) -> Option<Reading> {
        if field.code == SOFTWARE_VERSION_CODE {
            // A version string like "0.86"; passed through verbatim.
            let display_value = match raw {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };

            return Some(Reading {
                slot: field.slot,
                numeric_value: 0,
                display_value,
                cumulative: false,
            });
        }

        let Some(code) = raw.as_i64() else {
            warn!("field {}: expected an integer, got {}", field.code, raw);
            return None;
        };

        // An unknown status is informative, not an error: fields with a
        // label table fall back to a generic label, fields without one show
        // the raw value.
        let display_value = match labels::lookup(field.code, code) {
            Some(label) => label.to_string(),
            None if labels::has_table(field.code) => format!("Unknown, value: {}", code),
            None => code.to_string(),
        };

        Some(Reading {
            slot: field.slot,
            numeric_value: code,
            display_value,
            cumulative: false,
        })
    }
}

fn is_sentinel(raw: &Value) -> bool {
    raw.as_i64() == Some(SENTINEL_INVALID) || raw.as_str() == Some("32767")
}

fn round_to(value: f64, digits: usize) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
