// Wireless network endpoints

use serde_json::Value;
use tracing::debug;

use crate::client::OmadaClient;
use crate::error::Error;

impl OmadaClient {
    /// List the WLAN groups configured for a site.
    ///
    /// This is the "WLAN Group" list on Settings > Wireless Networks.
    ///
    /// `GET /sites/{site}/setting/wlans`
    pub async fn get_wireless_groups(&self, site: Option<&str>) -> Result<Vec<Value>, Error> {
        let site = self.site_or_default(site);
        debug!(site, "fetching wireless groups");
        let result = self
            .get(&format!("/sites/{site}/setting/wlans"), None)
            .await?;
        Self::unwrap_data(result)
    }

    /// List the wireless networks (SSIDs) belonging to one WLAN group.
    ///
    /// This is the main SSID list on Settings > Wireless Networks.
    ///
    /// `GET /sites/{site}/setting/wlans/{group}/ssids`
    pub async fn get_wireless_networks(
        &self,
        group: &str,
        site: Option<&str>,
    ) -> Result<Vec<Value>, Error> {
        let site = self.site_or_default(site);
        debug!(site, group, "fetching wireless networks");
        let result = self
            .get(&format!("/sites/{site}/setting/wlans/{group}/ssids"), None)
            .await?;
        Self::unwrap_data(result)
    }
}
