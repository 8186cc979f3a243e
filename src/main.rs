use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    tailbuffer::app::startup::startup().await
}
