// Interface endpoint
//
// `GET /api/v1/interface?deviceId=<id>`. Callers usually know a device by its
// management IP, so `list_interfaces` resolves the IP through the device
// inventory first and pays for a full device listing on every call.

use tracing::debug;

use crate::client::DnacClient;
use crate::devices::find_device_by_ip;
use crate::error::Error;
use crate::models::Interface;

const INTERFACE_PATH: &str = "/api/v1/interface";

impl DnacClient {
    /// List the interfaces of the device managed at `device_ip`.
    ///
    /// Fails with [`Error::DeviceNotFound`] without querying the interface
    /// endpoint when no device has that management IP, and with
    /// [`Error::MissingField`] when the matching device carries no `id`.
    pub async fn list_interfaces(&self, device_ip: &str) -> Result<Vec<Interface>, Error> {
        let devices = self.list_devices().await?;
        let device = find_device_by_ip(&devices, device_ip).ok_or_else(|| {
            Error::DeviceNotFound {
                ip: device_ip.to_owned(),
            }
        })?;

        let device_id = device
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingField { field: "id" })?;

        debug!(device_ip, device_id, "resolved device");
        self.list_interfaces_for_device(device_id).await
    }

    /// List interfaces for a known device id.
    ///
    /// `GET /api/v1/interface?deviceId={device_id}`
    pub async fn list_interfaces_for_device(
        &self,
        device_id: &str,
    ) -> Result<Vec<Interface>, Error> {
        let url = self.endpoint(INTERFACE_PATH)?;
        debug!(device_id, "listing interfaces");
        self.get_list(url, &[("deviceId", device_id)]).await
    }
}
