//! Core domain models for faro
//!
//! This module contains the fundamental types used throughout the application:
//! - Module records with their candidate update and vulnerability counts
//! - The manifest-derived dependency index
//! - Scan options shared by all adapters
//! - The closed set of supported package managers

mod index;
mod module;
mod options;
mod package_manager;

pub use index::{normalize_python_name, DependencyIndex, DependencyInfo, NameMatching};
pub use module::{Module, UpdateInfo, VulnInfo};
pub use options::ScanOptions;
pub use package_manager::{PackageManager, SectionLabels};
