use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    voltronic_p18::app().await
}
