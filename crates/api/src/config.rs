use serde::{Deserialize, Serialize};

/// Editor-facing configuration for the navigation feature.
///
/// Read once per navigation request and copied into the request, never
/// cached across requests.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationConfig {
    /// Route "go to definition" through the external resolver proxy instead
    /// of opening the indexed preview URI directly.
    pub enable_resolver_proxy: bool,
}
