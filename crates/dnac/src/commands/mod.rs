//! Command dispatch: bridges CLI args -> API calls -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod devices;
pub mod interfaces;
pub mod util;

use dnac_api::DnacClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::menu;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &mut DnacClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Menu => {
            let stdin = std::io::stdin();
            menu::run_menu(client, global, stdin.lock(), std::io::stdout()).await
        }
        Command::Auth => auth::handle(client, global).await,
        Command::Devices => devices::handle(client, global).await,
        Command::Interfaces(args) => interfaces::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
