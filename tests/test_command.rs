use voltronic_p18::command::{Command, Request};
use voltronic_p18::p18::{self, QueryCommand, SetCommand};
use voltronic_p18::validation;

fn s(v: &str) -> String {
    v.to_string()
}

fn wire(command: Command) -> anyhow::Result<String> {
    let request = command.to_request()?;
    Ok(request.wire_command()?.unwrap_or_default())
}

#[test]
fn queries() -> anyhow::Result<()> {
    assert_eq!(
        Command::GetProtocolId.to_request()?,
        Request::Execute {
            command: p18::Command::Query(QueryCommand::ProtocolId),
            args: vec![],
        }
    );
    assert_eq!(
        wire(Command::GetDayGenerated {
            year: s("2024"),
            month: s("1"),
            day: s("15"),
        })?,
        "^P013ED20240115"
    );
    assert_eq!(wire(Command::GetParallelGeneralStatus { id: s("2") })?, "^P007PGS2");
    Ok(())
}

#[test]
fn raw_and_dump() -> anyhow::Result<()> {
    assert_eq!(
        Command::Raw { command: s("QPIGS") }.to_request()?,
        Request::Raw(s("QPIGS"))
    );
    assert_eq!(Command::Dump.to_request()?, Request::Dump);
    assert_eq!(Request::Dump.wire_command()?, None);

    assert!(Command::Raw { command: s("") }.to_request().is_err());
    assert!(Command::Raw { command: "X".repeat(128) }.to_request().is_err());
    Ok(())
}

#[test]
fn choices_resolve_to_index_digits() -> anyhow::Result<()> {
    assert_eq!(
        wire(Command::SetOutputSourcePriority { priority: s("SBU") })?,
        "^S007POP1"
    );
    assert_eq!(
        wire(Command::SetChargingSourcePriority {
            id: s("0"),
            priority: s("S"),
        })?,
        "^S009PCP0,2"
    );
    assert_eq!(wire(Command::SetSolarPowerPriority { priority: s("LBU") })?, "^S007PSP1");
    assert_eq!(
        wire(Command::SetAcInputVoltageRange { range: s("APPLIANCE") })?,
        "^S007PGR0"
    );
    assert_eq!(wire(Command::SetBatteryType { battery_type: s("USER") })?, "^S007PBT2");
    assert_eq!(
        wire(Command::SetOutputModel {
            id: s("1"),
            model: s("P3"),
        })?,
        "^S010POPM1,4"
    );

    assert!(Command::SetOutputSourcePriority { priority: s("sbu") }.to_request().is_err());
    assert!(Command::SetBatteryType { battery_type: s("LI") }.to_request().is_err());
    Ok(())
}

#[test]
fn flags() -> anyhow::Result<()> {
    assert_eq!(
        wire(Command::SetFlag {
            flag: s("BUZZ"),
            state: s("1"),
        })?,
        "^S006PEA"
    );
    assert_eq!(
        wire(Command::SetFlag {
            flag: s("FTCR"),
            state: s("0"),
        })?,
        "^S006PDH"
    );

    assert!(Command::SetFlag { flag: s("XXXX"), state: s("1") }.to_request().is_err());
    assert!(Command::SetFlag { flag: s("BUZZ"), state: s("2") }.to_request().is_err());
    Ok(())
}

#[test]
fn voltages() -> anyhow::Result<()> {
    assert_eq!(
        wire(Command::SetBatteryMaxChargingVoltage {
            cv: s("56.4"),
            fv: s("54.0"),
        })?,
        "^S015MCHGV564,540"
    );
    assert!(Command::SetBatteryMaxChargingVoltage { cv: s("58.5"), fv: s("54") }
        .to_request()
        .is_err());
    assert!(Command::SetBatteryCutoffVoltage { voltage: s("39.9") }.to_request().is_err());
    assert_eq!(
        wire(Command::SetBatteryCutoffVoltage { voltage: s("40") })?,
        "^S010PSDV400"
    );

    assert_eq!(
        wire(Command::SetAcOutputRatedVoltage { voltage: s("230") })?,
        "^S008V2300"
    );
    assert!(Command::SetAcOutputRatedVoltage { voltage: s("235") }.to_request().is_err());

    assert_eq!(
        wire(Command::SetBatteryChargingThresholds {
            cv: s("23.5"),
            dv: s("27"),
        })?,
        "^S014BUCD235,270"
    );
    assert!(Command::SetBatteryChargingThresholds { cv: s("43"), dv: s("0") }
        .to_request()
        .is_err());
    assert!(Command::SetBatteryChargingThresholds { cv: s("44"), dv: s("47") }
        .to_request()
        .is_err());
    Ok(())
}

#[test]
fn currents_and_frequency() -> anyhow::Result<()> {
    assert_eq!(
        wire(Command::SetBatteryMaxAcChargingCurrent {
            id: s("0"),
            amps: s("30"),
        })?,
        "^S014MUCHGC0,030"
    );
    assert!(Command::SetBatteryMaxChargingCurrent { id: s("10"), amps: s("30") }
        .to_request()
        .is_err());
    assert!(Command::SetBatteryMaxChargingCurrent { id: s("0"), amps: s("1000") }
        .to_request()
        .is_err());

    assert_eq!(wire(Command::SetAcOutputFreq { freq: s("60") })?, "^S006F60");
    assert!(Command::SetAcOutputFreq { freq: s("55") }.to_request().is_err());
    Ok(())
}

#[test]
fn dates() -> anyhow::Result<()> {
    assert!(Command::GetYearGenerated { year: s("1999") }.to_request().is_err());
    assert!(Command::GetYearGenerated { year: s("24") }.to_request().is_err());
    assert!(Command::GetMonthGenerated { year: s("2024"), month: s("13") }
        .to_request()
        .is_err());
    assert!(Command::GetDayGenerated {
        year: s("2023"),
        month: s("2"),
        day: s("29"),
    }
    .to_request()
    .is_err());
    assert!(Command::GetDayGenerated {
        year: s("2024"),
        month: s("2"),
        day: s("29"),
    }
    .to_request()
    .is_ok());

    let values = ["2024", "12", "31", "23", "59", "59"].map(s).to_vec();
    assert_eq!(
        wire(Command::SetDateTime { values })?,
        "^S018DAT241231235959"
    );

    let values = ["2024", "12", "31", "24", "00", "00"].map(s).to_vec();
    assert!(Command::SetDateTime { values }.to_request().is_err());
    assert!(Command::SetDateTime { values: vec![s("2024")] }.to_request().is_err());
    Ok(())
}

#[test]
fn date_time_defaults_to_local_clock() -> anyhow::Result<()> {
    let Request::Execute { command, args } = Command::SetDateTime { values: vec![] }.to_request()?
    else {
        panic!("expected a set command");
    };
    assert_eq!(command, p18::Command::Set(SetCommand::DateTime));
    assert_eq!(args.len(), 6);
    assert_eq!(args[0].len(), 4);
    Ok(())
}

#[test]
fn time_buckets_and_solar_id() -> anyhow::Result<()> {
    assert_eq!(
        wire(Command::SetAcSupplyLoadTimeBucket {
            start: s("7:05"),
            end: s("18:30"),
        })?,
        "^S016ACLT0705,1830"
    );
    assert!(Command::SetAcChargeTimeBucket { start: s("24:00"), end: s("05:00") }
        .to_request()
        .is_err());
    assert!(Command::SetAcChargeTimeBucket { start: s("2300"), end: s("05:00") }
        .to_request()
        .is_err());

    assert!(Command::SetSolarConfiguration { id: s("12a") }.to_request().is_err());
    assert!(Command::SetSolarConfiguration { id: "1".repeat(21) }.to_request().is_err());
    assert!(Command::SetSolarConfiguration { id: "1".repeat(20) }.to_request().is_ok());
    Ok(())
}

#[test]
fn literal_validators() {
    assert!(validation::year("2099").is_ok());
    assert!(validation::year("2100").is_err());
    assert!(validation::month("012").is_err());
    assert!(validation::day("0").is_err());
    assert!(validation::time("23", "59", "60").is_err());
    assert_eq!(validation::time_of_day("5:30", "start").ok(), Some((5, 30)));
    assert!(validation::zero_or_one("01", "state").is_err());
    assert!(validation::parallel_id("a").is_err());
    assert!(validation::float_in_range("48", validation::CHARGE_VOLTAGE_RANGE, "CV").is_ok());
    assert!(validation::float_in_range("x", validation::CHARGE_VOLTAGE_RANGE, "CV").is_err());
    assert!(validation::solar_id("").is_err());
}
