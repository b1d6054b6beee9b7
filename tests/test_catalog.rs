mod common;
use common::*;

use std::collections::HashSet;
use xtend_bridge::prelude::*;

#[test]
fn slots_are_unique() {
    common_setup();
    let catalog = Catalog::new();

    let mut seen = HashSet::new();
    for field in catalog.iter() {
        assert!(
            seen.insert(field.slot),
            "slot {} used twice (code {})",
            field.slot,
            field.code
        );
    }
}

#[test]
fn catalog_covers_all_slots() {
    common_setup();
    let catalog = Catalog::new();

    assert_eq!(catalog.len(), 55);
    let slots: HashSet<u8> = catalog.iter().map(|f| f.slot).collect();
    for slot in 1..=55 {
        assert!(slots.contains(&slot), "slot {} missing", slot);
    }
}

#[test]
fn lookup_resolves_codes() {
    common_setup();
    let catalog = Catalog::new();

    let field = catalog.lookup("79b3").unwrap();
    assert_eq!(field.slot, 1);
    assert_eq!(field.class, DeviceClass::Temperature);
    assert_eq!(field.scale, 0.01);
    assert_eq!(field.label, "Room temp");

    assert!(catalog.lookup("zzzz").is_none());
}

#[test]
fn iteration_is_in_definition_order() {
    common_setup();
    let catalog = Catalog::new();

    let codes: Vec<&str> = catalog.iter().map(|f| f.code).collect();
    assert_eq!(codes[0], "79b3");
    assert_eq!(codes[8], "47e0");
    assert_eq!(*codes.last().unwrap(), "f9f2");
}

#[test]
fn query_fields_covers_every_code_in_order() {
    common_setup();
    let catalog = Catalog::new();

    let query = catalog.query_fields();
    let codes: Vec<&str> = query.split(',').collect();
    assert_eq!(codes.len(), catalog.len());

    for (from_query, field) in codes.iter().zip(catalog.iter()) {
        assert_eq!(*from_query, field.code);
    }
}

#[test]
fn every_label_table_code_is_in_the_catalog() {
    common_setup();
    let catalog = Catalog::new();

    for code in labels::CODES {
        let field = catalog
            .lookup(code)
            .unwrap_or_else(|| panic!("label table for {} has no catalog entry", code));
        assert_eq!(field.class, DeviceClass::EnumText, "code {}", code);
    }
}

#[test]
fn counters_and_energy_fields_are_unscaled() {
    common_setup();
    let catalog = Catalog::new();

    for field in catalog.iter() {
        if matches!(
            field.class,
            DeviceClass::Counter | DeviceClass::EnergyPair { .. } | DeviceClass::EnumText
        ) {
            assert_eq!(field.scale, 1.0, "code {}", field.code);
        }
    }
}

#[test]
fn energy_fields_keep_their_direction() {
    common_setup();
    let catalog = Catalog::new();

    assert_eq!(
        catalog.lookup("50f2").unwrap().class,
        DeviceClass::EnergyPair { generation: false }
    );
    assert_eq!(
        catalog.lookup("503e").unwrap().class,
        DeviceClass::EnergyPair { generation: true }
    );
    assert_eq!(
        catalog.lookup("5088").unwrap().class,
        DeviceClass::EnergyPair { generation: true }
    );
}

#[test]
fn label_tables_resolve_known_values() {
    common_setup();

    assert_eq!(labels::lookup("777d", 0), Some("DHW"));
    assert_eq!(labels::lookup("777d", 255), Some("UNDEFINED"));
    assert_eq!(labels::lookup("77dd", 5), Some("ROOMHEATING_COMFORT"));
    assert_eq!(labels::lookup("7e7a", 128), Some("LOCKOUT"));
    assert_eq!(labels::lookup("7e51", 126), Some("STANDBY"));
    assert_eq!(labels::lookup("6578", 2), Some("DEFROSTING"));
    assert_eq!(labels::lookup("657e", 253), Some("PUMPDOWN"));
    assert_eq!(labels::lookup("843a", 10), Some("GAS HEATING"));

    assert_eq!(labels::lookup("843a", 11), None);
    assert!(!labels::has_table("b2bc"));
    assert!(!labels::has_table("f9f2"));
}
