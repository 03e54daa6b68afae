//! Interface command handlers.

use tabled::Tabled;

use dnac_api::{DnacClient, Interface};

use crate::cli::{GlobalOpts, InterfacesArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{auth, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Interface")]
    port: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Speed")]
    speed: String,
}

impl From<&Interface> for InterfaceRow {
    fn from(i: &Interface) -> Self {
        Self {
            port: output::or_missing(i.port_name.as_deref()),
            status: output::or_missing(i.status.as_deref()),
            vlan: output::or_missing(i.vlan_id.as_deref()),
            speed: output::or_missing(i.speed.as_deref()),
        }
    }
}

/// Render an interface list; `plain` prints one port name per line.
pub fn render(format: &OutputFormat, interfaces: &[Interface]) -> String {
    output::render_list(
        format,
        interfaces,
        "No interfaces found.",
        |i| InterfaceRow::from(i),
        |i| output::or_missing(i.port_name.as_deref()),
    )
}

/// Resolve `ip` to a device, fetch its interfaces and render them.
pub async fn list(client: &DnacClient, ip: &str, global: &GlobalOpts) -> Result<String, CliError> {
    let interfaces = util::with_spinner(
        "Fetching interfaces...",
        global.quiet,
        client.list_interfaces(ip),
    )
    .await?;
    tracing::info!(ip, count = interfaces.len(), "fetched interfaces");
    Ok(render(global.output_format(), &interfaces))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &mut DnacClient,
    args: InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    auth::authenticate(client, global).await?;
    let out = list(client, &args.ip, global).await?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn table_rows_follow_controller_order() {
        let interfaces: Vec<Interface> = serde_json::from_value(json!([
            { "portName": "TenGigabitEthernet1/1/1", "status": "up", "vlanId": "1", "speed": "10000000" },
            { "portName": "GigabitEthernet0/0", "status": "down" }
        ]))
        .unwrap();

        let out = render(&OutputFormat::Table, &interfaces);
        for header in ["Interface", "Status", "VLAN", "Speed"] {
            assert!(out.contains(header), "missing {header} in:\n{out}");
        }
        assert!(out.find("TenGigabitEthernet1/1/1") < out.find("GigabitEthernet0/0"));
        let row = out.lines().find(|l| l.contains("GigabitEthernet0/0")).unwrap();
        assert_eq!(row.matches("N/A").count(), 2, "{row}");
    }

    #[test]
    fn empty_interfaces_message() {
        assert_eq!(render(&OutputFormat::Table, &[]), "No interfaces found.");
    }
}
