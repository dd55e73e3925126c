//! Vulnerability enrichment
//!
//! This module provides:
//! - The `VulnClient` capability for advisory lookups
//! - An OSV-backed implementation
//! - `enrich`, which attaches advisory counts to modules one lookup at a time
//!
//! A failed lookup is logged and leaves the counts at zero.

mod client;
mod osv;

pub use client::HttpClient;
pub use osv::OsvClient;

use crate::domain::{Module, PackageManager, VulnInfo};
use crate::error::VulnError;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Trait for advisory lookups
#[async_trait]
pub trait VulnClient: Send + Sync {
    /// Advisory counts for one version of a package
    async fn check_module(&self, name: &str, version: &str) -> Result<VulnInfo, VulnError>;
}

/// Create the OSV client for a package manager's ecosystem
pub fn create_client(manager: PackageManager) -> Result<Box<dyn VulnClient>, VulnError> {
    let client = HttpClient::new()?;
    Ok(Box::new(OsvClient::new(client, manager.osv_ecosystem())))
}

async fn lookup(client: &dyn VulnClient, name: &str, version: &str) -> VulnInfo {
    match client.check_module(name, version).await {
        Ok(info) => info,
        Err(e) => {
            warn!(package = name, version, error = %e, "vulnerability lookup failed");
            VulnInfo::default()
        }
    }
}

/// Attach advisory counts for the current and candidate version of each module
pub async fn enrich<'a>(modules: impl IntoIterator<Item = &'a mut Module>, client: &dyn VulnClient) {
    for module in modules {
        module.vuln_current = lookup(client, &module.name, &module.version).await;
        if let Some(update) = module.update_version().map(str::to_string) {
            module.vuln_update = lookup(client, &module.name, &update).await;
        }
        debug!(
            package = %module.name,
            current = module.vuln_current.total,
            update = module.vuln_update.total,
            "checked vulnerabilities"
        );
    }
}
