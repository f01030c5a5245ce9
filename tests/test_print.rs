mod common;
use common::*;

use voltronic_p18::p18::messages::*;
use voltronic_p18::p18::{decode, QueryCommand, Response};
use voltronic_p18::print::{self, Format, Item, Printable, Unit, Value};

use serde_json::json;

fn general_status() -> Response {
    decode(QueryCommand::GeneralStatus, Factory::general_status_payload())
}

#[test]
fn single_item_in_every_format() {
    let response = Response::ProtocolId(ProtocolId { id: 18 });

    assert_eq!(response.render(Format::Table), "Protocol ID: 18");
    assert_eq!(response.render(Format::ParsableTable), "id 18");
    assert_eq!(response.render(Format::Json), r#"{"id":18}"#);
    assert_eq!(response.render(Format::JsonWithUnits), r#"{"id":18}"#);
}

#[test]
fn tables_align_titles() {
    let response = decode(QueryCommand::AcChargeTimeBucket, "2300,0530");
    assert_eq!(
        response.render(Format::Table),
        "Start time: 23:00\nEnd time:   05:30"
    );
    assert_eq!(
        response.render(Format::ParsableTable),
        "start_time 23:00\nend_time 05:30"
    );
}

#[test]
fn units_and_tenths() {
    let items = vec![
        Item::new("voltage", "Voltage", Value::tenths(2300)).with_unit(Unit::V),
        Item::new("capacity", "Capacity", Value::long(90)).with_unit(Unit::Percentage),
    ];

    assert_eq!(
        print::render_items(&items, Format::Table),
        "Voltage:  230.0 V\nCapacity: 90%"
    );
    assert_eq!(
        print::render_items(&items, Format::ParsableTable),
        "voltage 230.0 V\ncapacity 90 %"
    );
    assert_eq!(
        print::items_to_json(&items, false),
        json!({ "voltage": 230.0, "capacity": 90 })
    );
    assert_eq!(
        print::items_to_json(&items, true),
        json!({ "voltage": [230.0, "V"], "capacity": [90, "%"] })
    );
}

#[test]
fn parsable_strings_with_spaces_are_quoted() {
    let response = decode(
        QueryCommand::FaultsWarnings,
        "01,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0",
    );
    let rendered = response.render(Format::ParsableTable);
    assert!(rendered.starts_with("fault_code \"Fan is locked\"\n"), "{}", rendered);
    assert!(rendered.contains("line_fail No"), "{}", rendered);
}

#[test]
fn general_status_labels() {
    let json = general_status().to_json(false);
    assert_eq!(json["grid_voltage"], json!(235.6));
    assert_eq!(json["settings_values_changed"], json!("Something changed"));
    assert_eq!(json["load_connected"], json!("Connected"));
    assert_eq!(json["battery_capacity"], json!(90));

    let unchanged = GeneralStatus::default();
    assert_eq!(
        unchanged.to_json(false)["settings_values_changed"],
        json!("Nothing changed")
    );
}

#[test]
fn flags_print_enabled_disabled() {
    let flags = FlagsStatuses {
        buzzer: true,
        ..FlagsStatuses::default()
    };
    let table = flags.render(Format::Table);
    assert!(table.lines().next().is_some_and(|line| line.ends_with("Enabled")), "{}", table);
    assert_eq!(flags.to_json(false)["buzzer"], json!(true));
}

#[test]
fn selectable_values_are_lists() {
    let response = decode(QueryCommand::MaxAcChargingCurrentSelectableValues, "002,010,020");
    assert_eq!(response.render(Format::Table), "2\n10\n20");
    assert_eq!(response.render(Format::Json), "[2,10,20]");
}

#[test]
fn set_results() {
    assert_eq!(print::render_set_result(true, Format::Table), "OK");
    assert_eq!(print::render_set_result(false, Format::ParsableTable), "Failure");
    assert_eq!(print::render_set_result(true, Format::Json), r#"{"ok":1}"#);
    assert_eq!(
        print::render_set_result(false, Format::JsonWithUnits),
        r#"{"error":"failure"}"#
    );
}

#[test]
fn errors_only_reach_json_consumers() {
    assert_eq!(print::render_error("timeout", Format::Table), None);
    assert_eq!(
        print::render_error("timeout", Format::Json).as_deref(),
        Some(r#"{"error":"timeout"}"#)
    );
}

#[test]
fn dump_combines_results() {
    let results = vec![
        (QueryCommand::ProtocolId, Response::ProtocolId(ProtocolId { id: 18 })),
        (
            QueryCommand::TotalGenerated,
            Response::TotalGenerated(TotalGenerated { kwh: 12 }),
        ),
    ];

    assert_eq!(
        print::render_dump(&results, Format::Json),
        r#"{"protocol_id":{"id":18},"total_generated":{"kwh":12}}"#
    );
    assert_eq!(
        print::render_dump(&results, Format::Table),
        "[protocol_id]\nProtocol ID: 18\n\n[total_generated]\nkWh: 12"
    );
}
