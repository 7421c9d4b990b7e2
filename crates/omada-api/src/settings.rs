// Site settings endpoints
//
// GET and PATCH of the per-site settings object, with the `beaconControl`
// workaround applied in both directions.

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::OmadaClient;
use crate::error::Error;

/// The controller rejects PATCH bodies containing this key with
/// `errorCode -1001`, so it is removed from settings in both directions.
const BEACON_CONTROL_KEY: &str = "beaconControl";

impl OmadaClient {
    /// Fetch the settings for a site.
    ///
    /// `GET /sites/{site}/setting`
    ///
    /// `beaconControl` is stripped from the result so the object can be fed
    /// back through [`set_site_settings`](Self::set_site_settings) without
    /// tripping the controller's `-1001` rejection. Each strip emits a
    /// warning unless warnings are suppressed.
    pub async fn get_site_settings(&self, site: Option<&str>) -> Result<Value, Error> {
        let site = self.site_or_default(site);
        debug!(site, "fetching site settings");
        let result = self.get(&format!("/sites/{site}/setting"), None).await?;

        let mut settings = Self::result_or_null(result);
        self.strip_beacon_control(&mut settings);
        Ok(settings)
    }

    /// Push back the settings for a site, applying the same
    /// `beaconControl` strip to the input before sending.
    ///
    /// `PATCH /sites/{site}/setting`
    pub async fn set_site_settings(
        &self,
        mut settings: Value,
        site: Option<&str>,
    ) -> Result<Value, Error> {
        let site = self.site_or_default(site);
        debug!(site, "updating site settings");

        self.strip_beacon_control(&mut settings);
        let result = self
            .patch(&format!("/sites/{site}/setting"), None, Some(&settings))
            .await?;
        Ok(Self::result_or_null(result))
    }

    /// Remove the `beaconControl` key, warning when one was present.
    fn strip_beacon_control(&self, settings: &mut Value) {
        if let Some(obj) = settings.as_object_mut() {
            if obj.remove(BEACON_CONTROL_KEY).is_some() && self.warnings() {
                warn!(
                    "removed `{BEACON_CONTROL_KEY}` from site settings: \
                     the controller rejects it with errorCode -1001"
                );
            }
        }
    }
}
