use voltronic_p18::p18::{self, build, QueryCommand, SetCommand};
use voltronic_p18::Error;

#[test]
fn queries_without_arguments() -> anyhow::Result<()> {
    assert_eq!(build(QueryCommand::ProtocolId.id(), &[])?, "^P005PI");
    assert_eq!(build(QueryCommand::GeneralStatus.id(), &[])?, "^P005GS");
    assert_eq!(build(QueryCommand::RatedInformation.id(), &[])?, "^P007PIRI");
    assert_eq!(build(QueryCommand::MaxAcChargingCurrentSelectableValues.id(), &[])?, "^P010MUCHGCR");
    Ok(())
}

#[test]
fn queries_with_arguments() -> anyhow::Result<()> {
    assert_eq!(build(1003, &["2024"])?, "^P009EY2024");
    assert_eq!(build(1004, &["2024", "1"])?, "^P011EM202401");
    assert_eq!(build(1005, &["2024", "01", "15"])?, "^P013ED20240115");
    assert_eq!(build(1016, &["0"])?, "^P007PRI0");
    assert_eq!(build(1017, &["3"])?, "^P007PGS3");
    Ok(())
}

#[test]
fn set_commands() -> anyhow::Result<()> {
    assert_eq!(build(SetCommand::Loads.id(), &["1"])?, "^S007LON1");
    assert_eq!(build(SetCommand::Flag.id(), &["BUZZ", "1"])?, "^S006PEA");
    assert_eq!(build(SetCommand::Flag.id(), &["MTYP", "0"])?, "^S006PDI");
    assert_eq!(build(SetCommand::Defaults.id(), &[])?, "^S005PF");
    assert_eq!(build(SetCommand::BatteryMaxChargeCurrent.id(), &["0", "60"])?, "^S013MCHGC0,060");
    assert_eq!(build(SetCommand::BatteryMaxAcChargeCurrent.id(), &["1", "2"])?, "^S014MUCHGC1,002");
    assert_eq!(build(SetCommand::AcOutputFreq.id(), &["50"])?, "^S006F50");
    assert_eq!(build(SetCommand::BatteryMaxChargeVoltage.id(), &["56.4", "54"])?, "^S015MCHGV564,540");
    assert_eq!(build(SetCommand::AcOutputRatedVoltage.id(), &["230"])?, "^S008V2300");
    assert_eq!(build(SetCommand::OutputSourcePriority.id(), &["1"])?, "^S007POP1");
    assert_eq!(build(SetCommand::BatteryChargingThresholds.id(), &["44", "0"])?, "^S014BUCD440,000");
    assert_eq!(build(SetCommand::ChargingSourcePriority.id(), &["0", "2"])?, "^S009PCP0,2");
    assert_eq!(build(SetCommand::OutputModel.id(), &["1", "4"])?, "^S010POPM1,4");
    assert_eq!(build(SetCommand::BatteryCutoffVoltage.id(), &["42.5"])?, "^S010PSDV425");
    assert_eq!(build(SetCommand::ClearGenerated.id(), &[])?, "^S006CLE");
    Ok(())
}

#[test]
fn solar_id_is_padded() -> anyhow::Result<()> {
    let command = build(SetCommand::SolarConfig.id(), &["12345"])?;
    assert_eq!(command, "^S027ID0512345000000000000000");
    assert_eq!(command.len(), 5 + 27 - 3);
    Ok(())
}

#[test]
fn date_time_uses_two_digit_year() -> anyhow::Result<()> {
    assert_eq!(
        build(SetCommand::DateTime.id(), &["2024", "3", "9", "7", "5", "0"])?,
        "^S018DAT240309070500"
    );
    Ok(())
}

#[test]
fn time_buckets_are_packed() -> anyhow::Result<()> {
    assert_eq!(
        build(SetCommand::AcChargeTimeBucket.id(), &["23:00", "5:30"])?,
        "^S016ACCT2300,0530"
    );
    assert_eq!(
        build(SetCommand::AcSupplyLoadTimeBucket.id(), &["00:00", "00:00"])?,
        "^S016ACLT0000,0000"
    );
    Ok(())
}

#[test]
fn unknown_identifiers() {
    for id in [0, 999, 1020, 1099, 1121, u16::MAX] {
        assert!(matches!(build(id, &[]), Err(Error::InvalidCommand(i)) if i == id));
    }
}

#[test]
fn missing_arguments() {
    assert!(matches!(build(1005, &["2024"]), Err(Error::InvalidArgument(_))));
    assert!(matches!(
        build(SetCommand::Flag.id(), &["BUZZ"]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn non_numeric_arguments() {
    assert!(matches!(
        build(SetCommand::AcOutputFreq.id(), &["fifty"]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn oversized_numbers_are_rejected() {
    assert!(matches!(
        build(SetCommand::AcOutputRatedVoltage.id(), &["922337203685477581"]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        build(
            SetCommand::DateTime.id(),
            &["-9223372036854775808", "3", "9", "7", "5", "0"]
        ),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn lookup_mnemonics() -> anyhow::Result<()> {
    assert_eq!(p18::lookup(1000)?, "PI");
    assert_eq!(p18::lookup(1019)?, "ACLT");
    assert_eq!(p18::lookup(1100)?, "LON");
    assert_eq!(p18::lookup(1120)?, "ACLT");
    assert!(p18::lookup(1020).is_err());
    assert!(p18::lookup(1121).is_err());
    Ok(())
}
