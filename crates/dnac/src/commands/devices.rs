//! Device command handlers.

use tabled::Tabled;

use dnac_api::{Device, DnacClient};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{auth, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "IP Address")]
    ip: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            hostname: output::or_missing(d.hostname.as_deref()),
            ip: output::or_missing(d.management_ip_address.as_deref()),
            platform: output::or_missing(d.platform_id.as_deref()),
            status: output::or_missing(d.reachability_status.as_deref()),
        }
    }
}

/// Render a device list; `plain` prints one management IP per line.
pub fn render(format: &OutputFormat, devices: &[Device]) -> String {
    output::render_list(
        format,
        devices,
        "No devices found.",
        |d| DeviceRow::from(d),
        |d| output::or_missing(d.management_ip_address.as_deref()),
    )
}

/// Fetch the inventory with the cached token and render it.
pub async fn list(client: &DnacClient, global: &GlobalOpts) -> Result<String, CliError> {
    let devices = util::with_spinner("Fetching devices...", global.quiet, client.list_devices())
        .await?;
    tracing::info!(count = devices.len(), "fetched devices");
    Ok(render(global.output_format(), &devices))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &mut DnacClient, global: &GlobalOpts) -> Result<(), CliError> {
    auth::authenticate(client, global).await?;
    let out = list(client, global).await?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn devices() -> Vec<Device> {
        serde_json::from_value(json!([
            {
                "id": "1",
                "hostname": "spine-1",
                "managementIpAddress": "10.10.20.81",
                "platformId": "C9500-40X",
                "reachabilityStatus": "Reachable"
            },
            { "id": "2", "managementIpAddress": "10.10.20.82" }
        ]))
        .unwrap()
    }

    #[test]
    fn table_has_columns_in_order() {
        let out = render(&OutputFormat::Table, &devices());
        let header = out.lines().find(|l| l.contains("Hostname")).unwrap();
        let cols: Vec<_> = ["Hostname", "IP Address", "Platform", "Status"]
            .iter()
            .map(|c| header.find(c).unwrap())
            .collect();
        assert!(cols.windows(2).all(|w| w[0] < w[1]), "{header}");
    }

    #[test]
    fn missing_fields_render_as_na() {
        let out = render(&OutputFormat::Table, &devices());
        let row = out.lines().find(|l| l.contains("10.10.20.82")).unwrap();
        assert_eq!(row.matches("N/A").count(), 3, "{row}");
    }

    #[test]
    fn plain_lists_management_ips() {
        let out = render(&OutputFormat::Plain, &devices());
        assert_eq!(out, "10.10.20.81\n10.10.20.82");
    }

    #[test]
    fn json_passes_records_through() {
        let out = render(&OutputFormat::JsonCompact, &devices());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[1], json!({ "id": "2", "managementIpAddress": "10.10.20.82" }));
    }

    #[test]
    fn empty_inventory_message() {
        assert_eq!(render(&OutputFormat::Table, &[]), "No devices found.");
    }
}
