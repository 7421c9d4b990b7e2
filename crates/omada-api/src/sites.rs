// Site-scoped resource endpoints
//
// Profile groups, portal candidates, RADIUS profiles, scenarios, devices,
// clients, and time-range profiles. Payload shapes vary by controller
// firmware, so results stay loosely typed.

use serde_json::Value;
use tracing::debug;

use crate::client::OmadaClient;
use crate::error::Error;
use crate::models::GroupType;

impl OmadaClient {
    /// List the profile groups for a site, optionally narrowed to a single
    /// [`GroupType`].
    ///
    /// `GET /sites/{site}/setting/profiles/groups[/{type}]`
    pub async fn get_site_groups(
        &self,
        site: Option<&str>,
        group_type: Option<GroupType>,
    ) -> Result<Vec<Value>, Error> {
        let site = self.site_or_default(site);
        let path = match group_type {
            Some(t) => format!("/sites/{site}/setting/profiles/groups/{}", t.code()),
            None => format!("/sites/{site}/setting/profiles/groups"),
        };
        debug!(site, ?group_type, "listing profile groups");
        let result = self.get(&path, None).await?;
        Self::unwrap_data(result)
    }

    /// List the portal candidates for a site.
    ///
    /// This is the "SSID & Network" list on Settings > Authentication >
    /// Portal > Basic Info.
    ///
    /// `GET /sites/{site}/setting/portal/candidates`
    pub async fn get_portal_candidates(&self, site: Option<&str>) -> Result<Value, Error> {
        let site = self.site_or_default(site);
        debug!(site, "listing portal candidates");
        let result = self
            .get(&format!("/sites/{site}/setting/portal/candidates"), None)
            .await?;
        Ok(Self::result_or_null(result))
    }

    /// List the RADIUS profiles for a site.
    ///
    /// `GET /sites/{site}/setting/radiusProfiles`
    pub async fn get_radius_profiles(&self, site: Option<&str>) -> Result<Value, Error> {
        let site = self.site_or_default(site);
        debug!(site, "listing RADIUS profiles");
        let result = self
            .get(&format!("/sites/{site}/setting/radiusProfiles"), None)
            .await?;
        Ok(Self::result_or_null(result))
    }

    /// List the scenarios (controller-level, not site-scoped).
    ///
    /// `GET /scenarios`
    pub async fn get_scenarios(&self) -> Result<Value, Error> {
        debug!("listing scenarios");
        let result = self.get("/scenarios", None).await?;
        Ok(Self::result_or_null(result))
    }

    /// List the devices for a site.
    ///
    /// `GET /sites/{site}/devices`
    pub async fn get_site_devices(&self, site: Option<&str>) -> Result<Value, Error> {
        let site = self.site_or_default(site);
        debug!(site, "listing devices");
        let result = self.get(&format!("/sites/{site}/devices"), None).await?;
        Ok(Self::result_or_null(result))
    }

    /// List the active clients for a site.
    ///
    /// Pagination is pinned to a single 999-entry page of active clients.
    /// The parameters ride in the path so the auth parameters are still
    /// injected alongside them.
    ///
    /// `GET /sites/{site}/clients?currentPageSize=999&currentPage=1&filters.active=true`
    pub async fn get_site_clients(&self, site: Option<&str>) -> Result<Value, Error> {
        let site = self.site_or_default(site);
        debug!(site, "listing active clients");
        let path =
            format!("/sites/{site}/clients?currentPageSize=999&currentPage=1&filters.active=true");
        let result = self.get(&path, None).await?;
        Ok(Self::result_or_null(result))
    }

    /// List the time-range profiles for a site.
    ///
    /// `GET /sites/{site}/setting/profiles/timeranges`
    pub async fn get_time_ranges(&self, site: Option<&str>) -> Result<Value, Error> {
        let site = self.site_or_default(site);
        debug!(site, "listing time-range profiles");
        let result = self
            .get(&format!("/sites/{site}/setting/profiles/timeranges"), None)
            .await?;
        Ok(Self::result_or_null(result))
    }
}
