pub mod command;
pub mod config;
pub mod error;
pub mod options;
pub mod prelude;
pub mod print;
pub mod p18;
pub mod utils;
pub mod validation;
pub mod voltronic;

pub use error::Error;

use crate::prelude::*;

use std::io::Write;
use std::process::ExitCode;

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nothing was sent: bad arguments, options or config.
pub const EXIT_USAGE: u8 = 1;
/// The device could not be reached or answered badly.
pub const EXIT_FAILURE: u8 = 2;

pub async fn app() -> ExitCode {
    let options = Options::new();

    let config = Config::load(options.config_file.as_deref()).and_then(|mut config| {
        config.merge(&options)?;
        Ok(config)
    });

    let loglevel = if options.verbose {
        "debug"
    } else {
        config.as_ref().map(Config::loglevel).unwrap_or("warn")
    };
    init_logging(loglevel);

    let format = match &config {
        Ok(config) => config.format(),
        Err(_) => options.format.unwrap_or_default(),
    };

    let result = config.and_then(|config| {
        let request = options.command.to_request()?;
        Ok((config, request))
    });
    let (config, request) = match result {
        Ok(prepared) => prepared,
        Err(err) => return fail(&err, format, EXIT_USAGE),
    };

    debug!("voltronic-p18 {} using {}", CARGO_PKG_VERSION, config.device());

    match run(&config, &request, options.pretend).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err, format, EXIT_FAILURE),
    }
}

fn init_logging(level: &str) {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .write_style(env_logger::WriteStyle::Never)
        .try_init();

    if let Err(e) = result {
        eprintln!("failed to initialise logging: {}", e);
    }
}

fn fail(err: &anyhow::Error, format: Format, code: u8) -> ExitCode {
    if let Some(Error::SetCommandFailure) = err.downcast_ref::<Error>() {
        println!("{}", print::render_set_result(false, format));
        return ExitCode::from(code);
    }

    error!("{:#}", err);
    if let Some(json) = print::render_error(&format!("{:#}", err), format) {
        println!("{}", json);
    }
    ExitCode::from(code)
}

/// Builds and, unless pretending, executes one request against the configured device.
///
/// Returns what should be printed on success.
pub async fn run(config: &Config, request: &Request, pretend: bool) -> Result<String> {
    if pretend {
        match request.wire_command()? {
            Some(command) => log_pretend(&command),
            None => {
                for query in dump_queries() {
                    log_pretend(&p18::builder::build_command(query.into(), &[])?);
                }
            }
        }
        return Ok(String::new());
    }

    // commands are built before the device is opened so bad input never reaches it
    let wire = request.wire_command()?;

    let mut transport = config
        .device()
        .open(config.crc(), config.timeout())
        .await
        .with_context(|| format!("failed to open {}", config.device()))?;

    match wire {
        Some(command) => execute(transport.as_mut(), request, &command, config).await,
        None => dump(transport.as_mut(), config).await,
    }
}

fn log_pretend(command: &str) {
    debug!(
        "would write {}+3 {}:\n{}",
        command.len(),
        if command.len() > 1 { "bytes" } else { "byte" },
        Utils::hexdump(command.as_bytes())
    );
}

fn dump_queries() -> impl Iterator<Item = QueryCommand> {
    QueryCommand::ALL
        .into_iter()
        .filter(|query| !query.takes_arguments())
}

/// Sends `command` and turns the reply into printable output for `request`.
pub async fn execute(
    transport: &mut dyn Transport,
    request: &Request,
    command: &str,
    config: &Config,
) -> Result<String> {
    let reply = transport
        .execute(command.as_bytes(), config.timeout())
        .await
        .with_context(|| format!("failed to execute {}", command))?;

    let output = match request {
        Request::Raw(_) | Request::Dump => reply.text(),
        Request::Execute { command, .. } => match command {
            p18::Command::Query(query) => {
                let response = p18::decode_frame(*query, reply.as_bytes(), reply.received)?;
                response.render(config.format())
            }
            p18::Command::Set(_) => {
                p18::validate_set_ack(reply.as_bytes(), reply.received)?.into_result()?;
                print::render_set_result(true, config.format())
            }
        },
    };

    Ok(output)
}

/// Runs every query without arguments, stopping at the first failure.
pub async fn dump(transport: &mut dyn Transport, config: &Config) -> Result<String> {
    let mut results = Vec::new();
    for query in dump_queries() {
        let command = p18::builder::build_command(query.into(), &[])?;
        let reply = transport
            .execute(command.as_bytes(), config.timeout())
            .await
            .with_context(|| format!("failed to execute {}", command))?;
        let response = p18::decode_frame(query, reply.as_bytes(), reply.received)
            .with_context(|| format!("invalid response to {}", query.name()))?;
        results.push((query, response));
    }

    Ok(print::render_dump(&results, config.format()))
}
