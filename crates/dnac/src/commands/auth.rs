//! Authentication handler.

use secrecy::{ExposeSecret, SecretString};

use dnac_api::DnacClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

/// Request a token and describe the result.
///
/// The raw token is only included when `--show-token` was given.
pub async fn authenticate(client: &mut DnacClient, global: &GlobalOpts) -> Result<String, CliError> {
    let token = util::with_spinner("Authenticating...", global.quiet, client.authenticate())
        .await?;
    Ok(report(token, global))
}

fn report(token: &SecretString, global: &GlobalOpts) -> String {
    let color = output::should_color(&global.color);
    let mut lines = Vec::new();
    if global.show_token {
        let rule = "-".repeat(50);
        lines.push("Here is your auth token (keep it secret):".to_owned());
        lines.push(rule.clone());
        lines.push(token.expose_secret().to_owned());
        lines.push(rule);
    }
    lines.push(output::success("Authentication success.", color));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &mut DnacClient, global: &GlobalOpts) -> Result<(), CliError> {
    let out = authenticate(client, global).await?;
    output::print_output(&out, global.quiet);
    Ok(())
}
