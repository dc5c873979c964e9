//! deno.land registry adapter
//!
//! Fetches module version listings from the deno.land CDN.
//! API endpoint: https://cdn.deno.land/{module}/meta/versions.json

use crate::domain::{RegistryKind, DENO_LAND_HOST};
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use serde::Deserialize;

/// deno.land CDN base URL
const DENO_CDN_URL: &str = "https://cdn.deno.land";

/// Adapter for the standard library and third-party modules
pub struct DenoLandAdapter {
    client: HttpClient,
    kind: RegistryKind,
}

/// versions.json response
#[derive(Debug, Deserialize)]
struct VersionsResponse {
    /// Every published version, newest first
    versions: Vec<String>,
}

impl DenoLandAdapter {
    /// Adapter for `deno.land/std`
    pub fn std(client: HttpClient) -> Self {
        Self {
            client,
            kind: RegistryKind::Std,
        }
    }

    /// Adapter for `deno.land/x/*`
    pub fn x(client: HttpClient) -> Self {
        Self {
            client,
            kind: RegistryKind::X,
        }
    }

    /// Module name as used by the CDN (`std`, `hono`, ...)
    fn module_name<'a>(&self, name: &'a str) -> &'a str {
        let name = name
            .strip_prefix(DENO_LAND_HOST)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(name);
        name.strip_prefix("x/").unwrap_or(name)
    }

    /// Build the versions.json URL for a module
    fn build_url(&self, name: &str) -> String {
        format!(
            "{}/{}/meta/versions.json",
            DENO_CDN_URL,
            self.module_name(name)
        )
    }
}

#[async_trait]
impl RegistryAdapter for DenoLandAdapter {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    fn registry_name(&self) -> &'static str {
        self.kind.registry_name()
    }

    async fn fetch_versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.build_url(name);
        let response: VersionsResponse = self
            .client
            .get_json(&url, name, self.registry_name())
            .await?;
        Ok(response.versions)
    }
}
