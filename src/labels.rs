//! Label tables for the status fields.
//!
//! Each table maps the raw integer reported by the unit to the text shown in
//! the Intergas service interface. Values missing from a table are still
//! reported, with a generic fallback label applied by the decoder.

pub type LabelTable = &'static [(i64, &'static str)];

// 657e
static OPERATION_MODE: LabelTable = &[
    (0, "DHW"),
    (1, "HEATING"),
    (2, "COOLING"),
    (253, "PUMPDOWN"),
    (254, "OFF"),
    (255, "UNDEFINED"),
];

// 6578
static WORKING_MODE: LabelTable = &[
    (0, "COOLING"),
    (1, "HEATING"),
    (2, "DEFROSTING"),
    (3, "PUMPDOWN"),
    (255, "UNDEFINED"),
];

// 777d
static HEATPUMP_MODE: LabelTable = &[
    (0, "DHW"),
    (1, "HEATING"),
    (2, "COOLING"),
    (253, "PUMPDOWN"),
    (254, "OFF"),
    (255, "UNDEFINED"),
];

// 77dd
static SYSTEM_STATUS: LabelTable = &[
    (0, "MONITOR_LOCKOUT"),
    (1, "PUMP_VENTING"),
    (2, "SERVICE"),
    (3, "DEFROST"),
    (4, "DHW"),
    (5, "ROOMHEATING_COMFORT"),
    (6, "ROOMHEATING_ECO"),
    (7, "ROOMCOOLING"),
    (8, "DHW_HEATEXCHANGE"),
    (9, "FLOORHEATINGPROTOCOL"),
    (12, "ANTIFREEZE"),
    (13, "PUMP_MAINTENANCE"),
    (14, "IDLE"),
    (255, "NO_TASK"),
];

// 7e51
static HEAT_DEMAND_HP: LabelTable = &[
    (0, "OPENTHERM"),
    (15, "BOILER_EXT"),
    (24, "FROST"),
    (37, "CH_RF"),
    (51, "DHW_INT"),
    (85, "SENSORTEST"),
    (86, "COMMISSIONING"),
    (87, "CRANKHEATING"),
    (102, "CH"),
    (103, "CH_WAIT"),
    (104, "DEFROSTING"),
    (117, "STARTING_COOLING"),
    (118, "COOLING"),
    (119, "COOLING_WAIT"),
    (126, "STANDBY"),
    (127, "OFF"),
    (153, "POSTRUN_BOILER"),
    (170, "SERVICE"),
    (189, "POSTRUN_COOLING"),
    (204, "DHW"),
    (205, "DHW_HRECO"),
    (230, "STARTING_CH"),
    (231, "POSTRUN_CH"),
    (240, "BOILER_INT"),
    (255, "HEATUP"),
];

// 7e7a
static HEAT_DEMAND_BOILER: LabelTable = &[
    (0, "STARTUP"),
    (1, "INTERPURGE"),
    (2, "POSTPURGE"),
    (4, "PREPURGE"),
    (8, "IGNITION"),
    (16, "WAITING"),
    (32, "RUNNING"),
    (64, "REST"),
    (128, "LOCKOUT"),
];

// 843a
static BOILER_STATUS: LabelTable = &[(0, "OFF"), (10, "GAS HEATING"), (12, "DHW")];

/// The field codes that own a label table.
pub static CODES: &[&str] = &["657e", "6578", "777d", "77dd", "7e51", "7e7a", "843a"];

pub fn table_for(code: &str) -> Option<LabelTable> {
    match code {
        "657e" => Some(OPERATION_MODE),
        "6578" => Some(WORKING_MODE),
        "777d" => Some(HEATPUMP_MODE),
        "77dd" => Some(SYSTEM_STATUS),
        "7e51" => Some(HEAT_DEMAND_HP),
        "7e7a" => Some(HEAT_DEMAND_BOILER),
        "843a" => Some(BOILER_STATUS),
        _ => None,
    }
}

pub fn has_table(code: &str) -> bool {
    table_for(code).is_some()
}

pub fn lookup(code: &str, raw: i64) -> Option<&'static str> {
    table_for(code)?
        .iter()
        .find(|(value, _)| *value == raw)
        .map(|(_, label)| *label)
}
