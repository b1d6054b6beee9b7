mod common;
use common::*;

use mockito::Matcher;
use std::time::Duration;
use xtend_bridge::domoticz::{device_id, Domoticz};
use xtend_bridge::prelude::*;

fn config_with_sink(url: &str, disabled_slots: Vec<u8>) -> Config {
    let mut config = Factory::config();
    config.domoticz.url = url.to_string();
    config.domoticz.disabled_slots = disabled_slots;
    config
}

async fn wait_for_match(mock: &mockito::Mock) -> bool {
    for _ in 0..50 {
        if mock.matched_async().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}

#[test]
fn device_id_is_hardware_id_and_slot_in_hex() {
    assert_eq!(device_id(1, 1), "00010001");
    assert_eq!(device_id(1, 52), "00010034");
    assert_eq!(device_id(258, 10), "0102000a");
}

#[tokio::test]
async fn reading_is_written_as_a_device_update() {
    common_setup();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/json.htm")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "command".into()),
            Matcher::UrlEncoded("param".into(), "udevice".into()),
            Matcher::UrlEncoded("did".into(), "00010001".into()),
            Matcher::UrlEncoded("dunit".into(), "1".into()),
            Matcher::UrlEncoded("dtype".into(), "80".into()),
            Matcher::UrlEncoded("dsubtype".into(), "5".into()),
            Matcher::UrlEncoded("nvalue".into(), "22".into()),
            Matcher::UrlEncoded("svalue".into(), "22.5".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"status":"OK"}"#)
        .create_async()
        .await;

    let config = ConfigWrapper::from_config(config_with_sink(&server.url(), Vec::new()));
    let channels = Channels::new();
    let subject = Domoticz::new(config, channels.clone(), Catalog::new()).unwrap();

    let task = subject.clone();
    let handle = tokio::spawn(async move { task.start().await });

    // let the sink subscribe before the first message
    tokio::time::sleep(Duration::from_millis(100)).await;

    channels
        .to_domoticz
        .send(domoticz::ChannelData::Reading(Reading {
            slot: 1,
            numeric_value: 22,
            display_value: "22.5".to_string(),
            cumulative: false,
        }))
        .unwrap();

    assert!(wait_for_match(&mock).await, "no device update arrived");

    subject.stop();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn energy_usage_and_generation_keep_their_meter_direction() {
    common_setup();

    let mut server = mockito::Server::new_async().await;
    // HP energy usage (slot 43) is a usage meter, switchtype 0
    let usage_mock = server
        .mock("GET", "/json.htm")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("did".into(), "0001002b".into()),
            Matcher::UrlEncoded("dtype".into(), "243".into()),
            Matcher::UrlEncoded("dsubtype".into(), "29".into()),
            Matcher::UrlEncoded("dswitchtype".into(), "0".into()),
            Matcher::UrlEncoded("svalue".into(), "500;1".into()),
        ]))
        .with_status(200)
        .create_async()
        .await;
    // HP energy generated (slot 44) is a generation meter, switchtype 4
    let generation_mock = server
        .mock("GET", "/json.htm")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("did".into(), "0001002c".into()),
            Matcher::UrlEncoded("dtype".into(), "243".into()),
            Matcher::UrlEncoded("dsubtype".into(), "29".into()),
            Matcher::UrlEncoded("dswitchtype".into(), "4".into()),
        ]))
        .with_status(200)
        .create_async()
        .await;

    let config = ConfigWrapper::from_config(config_with_sink(&server.url(), Vec::new()));
    let channels = Channels::new();
    let subject = Domoticz::new(config, channels.clone(), Catalog::new()).unwrap();

    let task = subject.clone();
    let handle = tokio::spawn(async move { task.start().await });

    // let the sink subscribe before the first message
    tokio::time::sleep(Duration::from_millis(100)).await;

    for slot in [43, 44] {
        channels
            .to_domoticz
            .send(domoticz::ChannelData::Reading(Reading {
                slot,
                numeric_value: 0,
                display_value: "500;1".to_string(),
                cumulative: true,
            }))
            .unwrap();
    }

    assert!(wait_for_match(&usage_mock).await, "no usage update arrived");
    assert!(
        wait_for_match(&generation_mock).await,
        "no generation update arrived"
    );

    subject.stop();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn disabled_slots_are_not_written() {
    common_setup();

    let mut server = mockito::Server::new_async().await;
    let disabled_mock = server
        .mock("GET", "/json.htm")
        .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
            "did".into(),
            "00010001".into(),
        )]))
        .with_status(200)
        .expect(0)
        .create_async()
        .await;
    let enabled_mock = server
        .mock("GET", "/json.htm")
        .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
            "did".into(),
            "0001001b".into(),
        )]))
        .with_status(200)
        .create_async()
        .await;

    let config = ConfigWrapper::from_config(config_with_sink(&server.url(), vec![1]));
    let channels = Channels::new();
    let subject = Domoticz::new(config, channels.clone(), Catalog::new()).unwrap();

    let task = subject.clone();
    let handle = tokio::spawn(async move { task.start().await });

    // let the sink subscribe before the first message
    tokio::time::sleep(Duration::from_millis(100)).await;

    // slot 1 is disabled, slot 27 is not; readings are handled in order so
    // once the slot 27 update arrives the slot 1 one was already dropped
    channels
        .to_domoticz
        .send(domoticz::ChannelData::Reading(Reading {
            slot: 1,
            numeric_value: 22,
            display_value: "22.5".to_string(),
            cumulative: false,
        }))
        .unwrap();
    channels
        .to_domoticz
        .send(domoticz::ChannelData::Reading(Reading {
            slot: 27,
            numeric_value: 1450,
            display_value: "1450".to_string(),
            cumulative: false,
        }))
        .unwrap();

    assert!(wait_for_match(&enabled_mock).await, "no device update arrived");
    disabled_mock.assert_async().await;

    subject.stop();
    handle.await.unwrap().unwrap();
}
