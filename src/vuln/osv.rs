//! OSV advisory client
//!
//! Queries https://api.osv.dev/v1/query for one package version at a time and
//! counts the returned advisories by severity.

use crate::domain::VulnInfo;
use crate::error::VulnError;
use crate::vuln::{HttpClient, VulnClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OSV query endpoint
const OSV_QUERY_URL: &str = "https://api.osv.dev/v1/query";

#[derive(Debug, Serialize)]
struct OsvPackage<'a> {
    name: &'a str,
    ecosystem: &'a str,
}

#[derive(Debug, Serialize)]
struct OsvQuery<'a> {
    package: OsvPackage<'a>,
    version: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OsvResponse {
    #[serde(default)]
    vulns: Vec<OsvVuln>,
}

#[derive(Debug, Deserialize)]
struct OsvVuln {
    #[serde(default)]
    database_specific: Option<DatabaseSpecific>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSpecific {
    #[serde(default)]
    severity: Option<String>,
}

/// Tally advisories by `database_specific.severity`
pub(crate) fn count_severities(response: &OsvResponse) -> VulnInfo {
    let mut info = VulnInfo::default();
    for vuln in &response.vulns {
        info.total += 1;
        let severity = vuln
            .database_specific
            .as_ref()
            .and_then(|d| d.severity.as_deref())
            .map(str::to_ascii_uppercase);
        match severity.as_deref() {
            Some("LOW") => info.low += 1,
            Some("MODERATE") | Some("MEDIUM") => info.medium += 1,
            Some("HIGH") => info.high += 1,
            Some("CRITICAL") => info.critical += 1,
            _ => {}
        }
    }
    info
}

/// Advisory client backed by the OSV database
pub struct OsvClient {
    client: HttpClient,
    ecosystem: &'static str,
    endpoint: String,
}

impl OsvClient {
    /// Create a client for one OSV ecosystem ("Go", "npm", "PyPI")
    pub fn new(client: HttpClient, ecosystem: &'static str) -> Self {
        Self {
            client,
            ecosystem,
            endpoint: OSV_QUERY_URL.to_string(),
        }
    }

    /// Override the query endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Version string as OSV expects it; Go versions drop the `v` prefix
    fn query_version<'a>(&self, version: &'a str) -> &'a str {
        if self.ecosystem == "Go" {
            version.strip_prefix('v').unwrap_or(version)
        } else {
            version
        }
    }
}

#[async_trait]
impl VulnClient for OsvClient {
    async fn check_module(&self, name: &str, version: &str) -> Result<VulnInfo, VulnError> {
        let query = OsvQuery {
            package: OsvPackage {
                name,
                ecosystem: self.ecosystem,
            },
            version: self.query_version(version),
        };
        let response: OsvResponse = self.client.post_json(&self.endpoint, &query, name).await?;
        Ok(count_severities(&response))
    }
}
