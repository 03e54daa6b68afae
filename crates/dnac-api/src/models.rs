// Intent API response types
//
// List endpoints wrap their payload as `{"response": [...]}`. Records are
// passed through for display: the fields the CLI renders are modelled
// explicitly as optional, everything else lands in `extra` so structured
// output reproduces what the controller sent.

use serde::{Deserialize, Deserializer, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard intent API list envelope. A missing or `null` `response` reads
/// as empty.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    response: Option<Vec<T>>,
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        self.response.unwrap_or_default()
    }
}

// ── Device ───────────────────────────────────────────────────────────

/// A managed network device from `GET /dna/intent/api/v1/network-device`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Controller-assigned device UUID; the `deviceId` for interface lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<String>,
    /// "Reachable", "Unreachable", "Ping Reachable", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reachability_status: Option<String>,
    /// Catch-all for the other inventory fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Interface ────────────────────────────────────────────────────────

/// A device interface from `GET /api/v1/interface?deviceId=...`.
///
/// Controllers disagree on whether `vlanId` and `speed` are strings or
/// numbers; both are accepted and held as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_name: Option<String>,
    /// "up" / "down"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub vlan_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn device_keeps_unmodelled_fields() {
        let device: Device = serde_json::from_value(json!({
            "id": "dev-1",
            "hostname": "cat9k-1",
            "managementIpAddress": "10.10.20.81",
            "platformId": "C9300-24U",
            "reachabilityStatus": "Reachable",
            "serialNumber": "FCW2214L0VK",
            "upTime": "20 days, 3:31:12.00"
        }))
        .unwrap();

        assert_eq!(device.id.as_deref(), Some("dev-1"));
        assert_eq!(device.hostname.as_deref(), Some("cat9k-1"));
        assert_eq!(device.management_ip_address.as_deref(), Some("10.10.20.81"));
        assert_eq!(device.extra["serialNumber"], json!("FCW2214L0VK"));

        let back = serde_json::to_value(&device).unwrap();
        assert_eq!(back["managementIpAddress"], json!("10.10.20.81"));
        assert_eq!(back["upTime"], json!("20 days, 3:31:12.00"));
    }

    #[test]
    fn device_fields_are_optional() {
        let device: Device = serde_json::from_value(json!({})).unwrap();
        assert_eq!(device, Device::default());
    }

    #[test]
    fn device_null_id_is_none() {
        let device: Device = serde_json::from_value(json!({
            "id": null,
            "managementIpAddress": "10.0.0.1"
        }))
        .unwrap();
        assert_eq!(device.id, None);
        assert!(serde_json::to_value(&device).unwrap().get("id").is_none());
    }

    #[test]
    fn interface_accepts_numeric_vlan_and_speed() {
        let iface: Interface = serde_json::from_value(json!({
            "portName": "GigabitEthernet1/0/1",
            "status": "up",
            "vlanId": 10,
            "speed": "1000000"
        }))
        .unwrap();

        assert_eq!(iface.vlan_id.as_deref(), Some("10"));
        assert_eq!(iface.speed.as_deref(), Some("1000000"));
    }

    #[test]
    fn interface_null_fields_are_none() {
        let iface: Interface = serde_json::from_value(json!({
            "portName": "Vlan1",
            "vlanId": null
        }))
        .unwrap();

        assert_eq!(iface.vlan_id, None);
        assert_eq!(iface.speed, None);
        assert_eq!(iface.status, None);
    }

    #[test]
    fn missing_response_reads_as_empty() {
        let list: ListResponse<Interface> =
            serde_json::from_value(json!({"version": "1.0"})).unwrap();
        assert!(list.into_items().is_empty());
    }

    #[test]
    fn null_response_reads_as_empty() {
        let list: ListResponse<Device> =
            serde_json::from_value(json!({"response": null})).unwrap();
        assert!(list.into_items().is_empty());
    }
}
