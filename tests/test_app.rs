mod common;
use common::*;

use voltronic_p18::prelude::*;
use voltronic_p18::{dump, execute, run};

fn config(format: Format) -> Config {
    Config {
        format,
        ..Config::default()
    }
}

async fn send(
    transport: &mut MockTransport,
    command: voltronic_p18::command::Command,
    config: &Config,
) -> Result<String> {
    let request = command.to_request()?;
    let wire = request.wire_command()?.unwrap_or_default();
    execute(transport, &request, &wire, config).await
}

#[tokio::test]
async fn query_is_decoded_and_printed() -> Result<()> {
    common_setup();

    let mut transport = MockTransport::new().reply(Factory::query_reply("18"));
    let output = send(&mut transport, Command::GetProtocolId, &config(Format::Table)).await?;

    assert_eq!(output, "Protocol ID: 18");
    assert_eq!(transport.sent, vec!["^P005PI".to_string()]);
    Ok(())
}

#[tokio::test]
async fn set_success() -> Result<()> {
    common_setup();

    let mut transport = MockTransport::new().reply(Factory::ack(true));
    let output = send(&mut transport, Command::SetDefaults, &config(Format::Json)).await?;

    assert_eq!(output, r#"{"ok":1}"#);
    assert_eq!(transport.sent, vec!["^S005PF".to_string()]);
    Ok(())
}

#[tokio::test]
async fn set_failure_is_an_error() {
    common_setup();

    let mut transport = MockTransport::new().reply(Factory::ack(false));
    let err = send(&mut transport, Command::ClearGeneratedData, &config(Format::Table))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<voltronic_p18::Error>(),
        Some(voltronic_p18::Error::SetCommandFailure)
    ));
}

#[tokio::test]
async fn malformed_response() {
    common_setup();

    let mut transport = MockTransport::new().reply(Factory::raw_reply("(NAK"));
    let result = send(&mut transport, Command::GetGeneralStatus, &config(Format::Table)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn transport_errors_propagate() {
    common_setup();

    let mut transport = MockTransport::new().fail(voltronic_p18::Error::CrcMismatch {
        expected: 1,
        actual: 2,
    });
    let err = send(&mut transport, Command::GetProtocolId, &config(Format::Table))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("CRC mismatch"), "{:#}", err);
}

#[tokio::test]
async fn raw_prints_text() -> Result<()> {
    common_setup();

    let mut transport = MockTransport::new().reply(Factory::raw_reply("(230.0 50.0"));
    let output = send(
        &mut transport,
        Command::Raw {
            command: "QPIGS".to_string(),
        },
        &config(Format::Table),
    )
    .await?;

    assert_eq!(output, "(230.0 50.0");
    assert_eq!(transport.sent, vec!["QPIGS".to_string()]);
    Ok(())
}

#[tokio::test]
async fn dump_runs_every_query_without_arguments() -> Result<()> {
    common_setup();

    let queries: Vec<QueryCommand> = QueryCommand::ALL
        .into_iter()
        .filter(|query| !query.takes_arguments())
        .collect();

    let mut transport = MockTransport::new();
    for _ in &queries {
        transport = transport.reply(Factory::query_reply("18"));
    }

    let output = dump(&mut transport, &config(Format::Json)).await?;
    let json: serde_json::Value = serde_json::from_str(&output)?;

    assert_eq!(transport.sent.len(), queries.len());
    assert_eq!(transport.sent[0], "^P005PI");
    assert_eq!(json["protocol_id"]["id"], 18);
    assert_eq!(json.as_object().map(|o| o.len()), Some(queries.len()));
    Ok(())
}

#[tokio::test]
async fn dump_stops_at_first_failure() {
    common_setup();

    let mut transport = MockTransport::new()
        .reply(Factory::query_reply("18"))
        .reply(Factory::raw_reply("^0"));

    assert!(dump(&mut transport, &config(Format::Table)).await.is_err());
    assert_eq!(transport.sent.len(), 2);
}

#[tokio::test]
async fn pretend_never_opens_the_device() -> Result<()> {
    common_setup();

    let config = Config {
        device: Device::Hidraw {
            path: "/nonexistent/hidraw".into(),
        },
        ..Config::default()
    };

    let request = Command::SetFlag {
        flag: "BUZZ".to_string(),
        state: "1".to_string(),
    }
    .to_request()?;
    assert_eq!(run(&config, &request, true).await?, "");
    assert_eq!(run(&config, &Request::Dump, true).await?, "");
    Ok(())
}

#[tokio::test]
async fn missing_device_fails() {
    common_setup();

    let config = Config {
        device: Device::Hidraw {
            path: "/nonexistent/hidraw".into(),
        },
        ..Config::default()
    };

    let result = run(&config, &Request::Dump, false).await;
    assert!(result.is_err());
}
