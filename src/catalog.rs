use std::collections::HashMap;

/// What kind of reading a field produces, and therefore how its raw value
/// is decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DeviceClass {
    Temperature,
    Pressure,
    Flow,
    FanSpeed,
    Percentage,
    CustomMetric,
    Counter,
    /// Instantaneous rate accumulated by the sink; generation meters are
    /// registered differently from usage meters in Domoticz.
    EnergyPair { generation: bool },
    EnumText,
}

/// One entry of the field catalog: a vendor field code and how it maps onto
/// a device slot.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    /// Opaque vendor key as used by the stats API.
    pub code: &'static str,
    /// Device slot the readings are written to. Slots are persisted device
    /// identity on the Domoticz side; never renumber a live entry.
    pub slot: u8,
    pub class: DeviceClass,
    /// Multiplier applied to the raw value for the scaled classes.
    pub scale: f64,
    pub label: &'static str,
}

const fn field(
    code: &'static str,
    slot: u8,
    class: DeviceClass,
    scale: f64,
    label: &'static str,
) -> FieldDefinition {
    FieldDefinition {
        code,
        slot,
        class,
        scale,
        label,
    }
}

use DeviceClass::*;

// The full parameter set of the Xtend indoor unit, in definition order.
// Codes follow the Xtend screen codes as of firmware 0.86; availability of
// some values depends on boiler type and year.
static FIELDS: &[FieldDefinition] = &[
    // temperatures
    field("79b3", 1, Temperature, 0.01, "Room temp"),
    field("7921", 2, Temperature, 0.01, "Target room temp"),
    field("62d1", 3, Temperature, 0.01, "Outside temp"),
    field("6280", 4, Temperature, 0.01, "HP return temp"),
    field("62e7", 5, Temperature, 0.01, "HP supply temp"),
    field("62ed", 6, Temperature, 0.01, "HP setpoint temp"),
    field("65d9", 7, Temperature, 0.01, "Exhaust gas temp"),
    field("6505", 8, Temperature, 0.01, "Suction line gas temp"),
    field("47e0", 9, EnumText, 1.0, "Software version"),
    field("6c26", 10, Temperature, 0.01, "Condensor gas temp"),
    field("6ceb", 11, Temperature, 0.01, "Condensor liquid temp"),
    field("6cfb", 12, Temperature, 0.01, "Suction line overheat temp"),
    field("6c33", 13, Temperature, 0.01, "Discharge overheat temp"),
    field("6c53", 14, Temperature, 0.01, "Subcooling temp"),
    field("65c1", 15, Temperature, 0.01, "Coil temp"),
    field("7ee6", 16, Temperature, 0.01, "Boiler temp"),
    field("7e31", 17, Temperature, 0.01, "Boiler CH setpoint temp"),
    field("625b", 18, Temperature, 0.01, "Boiler CH supply temp"),
    field("7e81", 19, Temperature, 0.01, "Boiler CH return temp"),
    field("8ecb", 20, Temperature, 0.01, "Boiler DHW max temp"),
    field("8edb", 21, Temperature, 0.01, "Boiler DHW actual temp"),
    // pressures
    field("7ed3", 22, Pressure, 0.01, "CH water pressure"),
    field("6579", 23, Pressure, 0.01, "HP suction pressure"),
    field("65b0", 24, Pressure, 0.01, "HP discharge gas pressure"),
    // water flow
    field("8e7f", 25, Flow, 0.01, "Boiler DHW flow"),
    field("629c", 26, Flow, 0.01, "HP CH flow"),
    // fan
    field("6c8a", 27, FanSpeed, 1.0, "Fan speed"),
    // percentages
    field("848e", 28, Percentage, 0.01, "Boiler modulation target"),
    field("84d1", 29, Percentage, 0.01, "Boiler modulation level"),
    field("62cb", 30, Percentage, 0.01, "Pump level"),
    // custom metrics
    field("65a7", 31, CustomMetric, 0.01, "Compressor frequency"),
    field("71a7", 32, CustomMetric, 1.0, "HP poweron"),
    // counters
    field("6ac5", 33, Counter, 1.0, "HP runtime"),
    field("8ef9", 34, Counter, 1.0, "Boiler CH runtime"),
    field("8e37", 35, Counter, 1.0, "Boiler DHW runtime"),
    field("6a8e", 36, Counter, 1.0, "HP Compressor starts"),
    field("7160", 37, Counter, 1.0, "HP power cycles"),
    field("6a53", 38, Counter, 1.0, "HP defrost cycles"),
    field("8e00", 39, Counter, 1.0, "Boiler starts"),
    field("6a8d", 40, Counter, 1.0, "Boiler DHW starts"),
    field("8e18", 41, Counter, 1.0, "Boiler flame loss count"),
    field("712c", 42, Counter, 1.0, "Boiler ignition fail count"),
    // energy rates, accumulated on the Domoticz side
    field("50f2", 43, EnergyPair { generation: false }, 1.0, "HP energy usage"),
    field("503e", 44, EnergyPair { generation: true }, 1.0, "HP energy generated"),
    field("5041", 45, CustomMetric, 0.1, "COP"),
    // status texts
    field("7e7a", 46, EnumText, 1.0, "Heat demand Boiler"),
    field("7e51", 47, EnumText, 1.0, "Heat demand HP"),
    field("657e", 48, EnumText, 1.0, "Operation mode"),
    field("6578", 49, EnumText, 1.0, "Working mode"),
    field("777d", 50, EnumText, 1.0, "Heatpump mode"),
    field("77dd", 51, EnumText, 1.0, "System status"),
    field("843a", 52, EnumText, 1.0, "Boiler status"),
    field("5088", 53, EnergyPair { generation: true }, 1.0, "Boiler energy generated"),
    field("b2bc", 54, EnumText, 1.0, "Boiler flame"),
    field("f9f2", 55, EnumText, 1.0, "Status flags"),
];

/// Immutable lookup table over [FIELDS], built once at startup.
#[derive(Clone)]
pub struct Catalog {
    index: HashMap<&'static str, usize>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        let index = FIELDS
            .iter()
            .enumerate()
            .map(|(i, field)| (field.code, i))
            .collect();

        Self { index }
    }

    pub fn lookup(&self, code: &str) -> Option<&'static FieldDefinition> {
        self.index.get(code).map(|&i| &FIELDS[i])
    }

    /// Iterate all fields in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldDefinition> {
        FIELDS.iter()
    }

    pub fn len(&self) -> usize {
        FIELDS.len()
    }

    pub fn is_empty(&self) -> bool {
        FIELDS.is_empty()
    }

    /// The `fields=` query value for the stats API, covering every catalog
    /// entry in definition order.
    pub fn query_fields(&self) -> String {
        self.iter()
            .map(|field| field.code)
            .collect::<Vec<_>>()
            .join(",")
    }
}
