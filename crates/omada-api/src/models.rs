// Wire types for the Omada v2 API.
//
// Every response is wrapped in the `Envelope`. Payload shapes vary by
// endpoint and firmware version, so `result` stays loosely typed --
// resource accessors hand back `serde_json::Value` rather than modeling
// each resource.

use serde::Deserialize;
use serde_json::Value;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard Omada API response envelope.
///
/// Every endpoint wraps its payload:
/// ```json
/// { "errorCode": 0, "msg": "Success.", "result": { ... } }
/// ```
/// `errorCode == 0` means success; anything else is a domain error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub error_code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

// ── Paginated list payload ───────────────────────────────────────────

/// List result whose entries nest one level down under `data`.
///
/// Only some endpoints wrap lists this way (profile groups, WLAN groups,
/// SSIDs); the rest return their list directly as `result`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataList {
    pub data: Vec<Value>,
}

// ── Profile group types ──────────────────────────────────────────────

/// Profile group kind, selected by numeric code in the groups URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupType {
    /// "IP Group"
    Ip,
    /// "IP-Port Group"
    IpPort,
    /// "MAC Group"
    Mac,
}

impl GroupType {
    /// The numeric code the controller expects in the URL path.
    pub fn code(self) -> u8 {
        match self {
            Self::Ip => 0,
            Self::IpPort => 1,
            Self::Mac => 2,
        }
    }
}
