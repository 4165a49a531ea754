use entra_token_fetch::{auth::fetch_from_env, utils::tracing::init_tracing};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let mut stdout = std::io::stdout().lock();
    fetch_from_env(&mut stdout).await.into()
}
