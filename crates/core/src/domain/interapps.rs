// Interactive app settings shared by every step of a job

use serde::{Deserialize, Serialize};

/// Settings for interactive apps. Passive configuration, nothing is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveApps {
    /// Image for the reverse proxy that runs next to the job steps
    pub proxy_image: String,
    /// Container name for the reverse proxy
    pub proxy_name: String,
    /// Frontend URL, prefixed with the job id when exposed
    pub frontend_url: String,
    /// Base URL of the CAS server
    pub cas_url: String,
    /// Path of the CAS validate endpoint
    pub cas_validate: String,
    /// SSL cert path on the execution nodes
    pub ssl_cert_path: String,
    /// SSL key path on the execution nodes
    pub ssl_key_path: String,
}
