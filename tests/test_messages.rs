mod common;
use common::*;

use voltronic_p18::p18::messages::*;
use voltronic_p18::p18::types::*;
use voltronic_p18::p18::{decode, decode_frame, QueryCommand, Response};
use voltronic_p18::Error;

#[test]
fn protocol_id_and_time() {
    common_setup();

    assert_eq!(
        decode(QueryCommand::ProtocolId, "18"),
        Response::ProtocolId(ProtocolId { id: 18 })
    );
    assert_eq!(
        decode(QueryCommand::CurrentTime, "20240115123456"),
        Response::CurrentTime(CurrentTime {
            year: 2024,
            month: 1,
            day: 15,
            hour: 12,
            minute: 34,
            second: 56,
        })
    );
}

#[test]
fn generated_energy() {
    assert_eq!(
        decode(QueryCommand::TotalGenerated, "00012345"),
        Response::TotalGenerated(TotalGenerated { kwh: 12345 })
    );
    assert_eq!(
        decode(QueryCommand::DayGenerated, "00000987"),
        Response::DayGenerated(DayGenerated { wh: 987 })
    );
}

#[test]
fn series_number_keeps_declared_length() {
    assert_eq!(
        decode(QueryCommand::SeriesNumber, "1492932105105335"),
        Response::SeriesNumber(SeriesNumber {
            length: 14,
            id: "92932105105335".to_string(),
        })
    );
}

#[test]
fn rated_information() {
    let Response::RatedInformation(rated) =
        decode(QueryCommand::RatedInformation, Factory::rated_information_payload())
    else {
        panic!("wrong response type");
    };

    assert_eq!(rated.ac_input_rating_voltage, 2300);
    assert_eq!(rated.ac_output_rating_apparent_power, 5000);
    assert_eq!(rated.battery_bulk_voltage, 560);
    assert_eq!(rated.battery_type, BatteryType::User);
    assert_eq!(rated.max_ac_charging_current, 10);
    assert_eq!(rated.max_charging_current, 60);
    assert_eq!(rated.input_voltage_range, InputVoltageRange::Ups);
    assert_eq!(rated.output_source_priority, OutputSourcePriority::SolarBatteryUtility);
    assert_eq!(rated.topology, Topology::Transformer);
    assert_eq!(rated.mppt, "1");
}

#[test]
fn general_status() {
    let Response::GeneralStatus(status) =
        decode(QueryCommand::GeneralStatus, Factory::general_status_payload())
    else {
        panic!("wrong response type");
    };

    assert_eq!(status.grid_voltage, 2356);
    assert_eq!(status.ac_output_apparent_power, 483);
    assert_eq!(status.battery_voltage, 545);
    assert_eq!(status.battery_capacity, 90);
    assert!(status.settings_values_changed);
    assert_eq!(status.mppt1_charger_status, MpptChargerStatus::Charging);
    assert!(status.load_connected);
    assert_eq!(status.dc_ac_power_direction, DcAcPowerDirection::AcDc);
    assert_eq!(status.local_parallel_id, 0);
}

#[test]
fn short_payloads_leave_defaults() {
    let Response::GeneralStatus(status) = decode(QueryCommand::GeneralStatus, "2356,499") else {
        panic!("wrong response type");
    };

    assert_eq!(status.grid_voltage, 2356);
    assert_eq!(status.grid_freq, 499);
    assert_eq!(
        status,
        GeneralStatus {
            grid_voltage: 2356,
            grid_freq: 499,
            ..GeneralStatus::default()
        }
    );
}

#[test]
fn unknown_enum_values_are_kept() {
    let Response::WorkingMode(mode) = decode(QueryCommand::WorkingMode, "09") else {
        panic!("wrong response type");
    };
    assert_eq!(mode.mode, WorkingMode::Unknown(9));
    assert_eq!(mode.mode.label(), "Unknown");

    let Response::WorkingMode(mode) = decode(QueryCommand::WorkingMode, "-1") else {
        panic!("wrong response type");
    };
    assert_eq!(mode.mode, WorkingMode::Unknown(-1));

    assert_eq!(BatteryType::from_value(300), BatteryType::Unknown(300));
    assert_eq!(BatteryType::from_value(2), BatteryType::User);
}

#[test]
fn faults_and_warnings() {
    let Response::FaultsWarnings(faults) =
        decode(QueryCommand::FaultsWarnings, "01,1,0,0,2,0,0,0,0,0,0,0,0,0,0,0,1")
    else {
        panic!("wrong response type");
    };

    assert_eq!(faults.fault_code, 1);
    assert!(faults.line_fail);
    assert!(!faults.output_circuit_short);
    assert!(faults.fan_lock);
    assert!(faults.battery_too_low_to_charge_for_scc2);
    assert_eq!(FaultCodeString::from_value(1), "Fan is locked");
}

#[test]
fn flags_ignore_reserved_position() {
    let Response::FlagsStatuses(flags) = decode(QueryCommand::FlagsStatuses, "1,0,1,0,0,1,1,0,1")
    else {
        panic!("wrong response type");
    };

    assert!(flags.buzzer);
    assert!(!flags.overload_bypass);
    assert!(flags.lcd_escape_to_default_page_after_1min_timeout);
    assert!(flags.backlight_on);
    assert!(flags.alarm_on_primary_source_interrupt);
    assert!(!flags.fault_code_record);
}

#[test]
fn selectable_values_are_capped() {
    let payload = (1..=40).map(|n| format!("{:03}", n)).collect::<Vec<_>>().join(",");
    let Response::MaxChargingCurrentSelectableValues(values) =
        decode(QueryCommand::MaxChargingCurrentSelectableValues, &payload)
    else {
        panic!("wrong response type");
    };

    assert_eq!(values.0.amps.len(), MAX_SELECTABLE_VALUES);
    assert_eq!(values.0.amps[0], 1);
    assert_eq!(values.0.amps[31], 32);
}

#[test]
fn parallel_serial_number_uses_valid_length() {
    let Response::ParallelRatedInformation(info) = decode(
        QueryCommand::ParallelRatedInformation,
        "1,14,92932105105335000000,1,060,10,0",
    ) else {
        panic!("wrong response type");
    };

    assert_eq!(info.parallel_id_connection_status, ParallelConnectionStatus::Existent);
    assert_eq!(info.serial_number_valid_length, 14);
    assert_eq!(info.serial_number, "92932105105335");
    assert_eq!(info.max_charging_current, 60);
    assert_eq!(info.max_ac_charging_current, 10);
}

#[test]
fn time_buckets() {
    assert_eq!(
        decode(QueryCommand::AcChargeTimeBucket, "2300,0530"),
        Response::AcChargeTimeBucket(AcChargeTimeBucket(TimeBucket {
            start_hour: 23,
            start_minute: 0,
            end_hour: 5,
            end_minute: 30,
        }))
    );
}

#[test]
fn decoding_is_repeatable() {
    for query in QueryCommand::ALL {
        let payload = Factory::general_status_payload();
        assert_eq!(decode(query, payload), decode(query, payload), "{:?}", query);
    }
}

#[test]
fn frames_are_validated_before_decoding() -> anyhow::Result<()> {
    let reply = Factory::query_reply("18");
    assert_eq!(
        decode_frame(QueryCommand::ProtocolId, reply.as_bytes(), reply.received)?,
        Response::ProtocolId(ProtocolId { id: 18 })
    );

    assert!(matches!(
        decode_frame(QueryCommand::ProtocolId, b"^1", 5),
        Err(Error::MalformedResponse(_))
    ));
    Ok(())
}
