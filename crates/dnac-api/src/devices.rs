// Device inventory endpoint
//
// `GET /dna/intent/api/v1/network-device` returns every managed device in
// controller order. Nothing is sorted or filtered client-side.

use tracing::debug;

use crate::client::DnacClient;
use crate::error::Error;
use crate::models::Device;

const NETWORK_DEVICE_PATH: &str = "/dna/intent/api/v1/network-device";

impl DnacClient {
    /// List all managed devices.
    ///
    /// `GET /dna/intent/api/v1/network-device`
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        let url = self.endpoint(NETWORK_DEVICE_PATH)?;
        debug!("listing devices");
        self.get_list(url, &[]).await
    }
}

/// First device whose management IP equals `ip` exactly.
///
/// Inventories are small, so a linear scan is all this needs.
pub fn find_device_by_ip<'a>(devices: &'a [Device], ip: &str) -> Option<&'a Device> {
    devices
        .iter()
        .find(|d| d.management_ip_address.as_deref() == Some(ip))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, ip: Option<&str>) -> Device {
        Device {
            id: Some(id.into()),
            management_ip_address: ip.map(String::from),
            ..Device::default()
        }
    }

    #[test]
    fn first_match_wins() {
        let devices = [
            device("a", Some("10.0.0.2")),
            device("b", Some("10.0.0.1")),
            device("c", Some("10.0.0.1")),
        ];
        let found = find_device_by_ip(&devices, "10.0.0.1").and_then(|d| d.id.as_deref());
        assert_eq!(found, Some("b"));
    }

    #[test]
    fn match_is_exact() {
        let devices = [device("a", Some("10.0.0.10")), device("b", None)];
        assert!(find_device_by_ip(&devices, "10.0.0.1").is_none());
        assert!(find_device_by_ip(&devices, " 10.0.0.10").is_none());
        assert!(find_device_by_ip(&devices, "").is_none());
    }
}
