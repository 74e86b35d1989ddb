//! Command dispatch: bridges CLI args -> sync controller -> output formatting.

pub mod browse;
pub mod config_cmd;
pub mod health;
pub mod issues;
pub mod util;

use trackly_core::ClientConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client_config: &ClientConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = trackly_core::connect(client_config)?;
    match cmd {
        Command::Issues(args) => issues::handle(client, client_config, args, global).await,
        Command::Browse(args) => browse::handle(client, client_config, args, global).await,
        Command::Health => health::handle(&client, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
