//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ScanError: Package manager subprocess or output parsing failures
//! - ManifestError: Issues reading or parsing manifest files
//! - ConfigError: Issues with CLI configuration and package manager selection
//! - UpdateError: Failures while applying updates
//! - VulnError: Advisory lookup failures (never escape enrichment)

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Scanner related errors
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Update related errors
    #[error(transparent)]
    Update(#[from] UpdateError),

    /// Advisory client setup errors
    #[error(transparent)]
    Vuln(#[from] VulnError),

    /// Terminal or output stream errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while discovering updates
#[derive(Error, Debug)]
pub enum ScanError {
    /// The package manager command could not be run or exited with an error
    #[error("failed to run {tool}: {message}")]
    CommandFailed { tool: String, message: String },

    /// The package manager produced output that could not be parsed
    #[error("failed to parse {tool} output: {message}")]
    InvalidOutput { tool: String, message: String },

    /// A filter pattern that must compile as a regular expression did not
    #[error("invalid filter pattern '{pattern}': {message}")]
    InvalidFilter { pattern: String, message: String },

    /// The manifest backing the scan could not be read
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error (for package.json)
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// TOML parsing error (for pyproject.toml)
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown token in the --format list
    #[error("invalid format option '{value}': expected 'group', 'lines' or 'time'")]
    InvalidFormat { value: String },

    /// Unknown package manager name
    #[error("unsupported package manager: {value} (supported: go, npm, yarn, pnpm, pip, poetry, uv)")]
    UnsupportedManager { value: String },

    /// Nothing recognisable in the working directory
    #[error("no supported package manager detected in {dir}")]
    NoPackageManager { dir: PathBuf },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },
}

/// Errors raised while applying updates
#[derive(Error, Debug)]
pub enum UpdateError {
    /// An update command exited unsuccessfully
    #[error("{command} failed: {output}")]
    CommandFailed { command: String, output: String },

    /// The manifest could not be rewritten after installing
    #[error("failed to update {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the vulnerability advisory service
#[derive(Error, Debug)]
pub enum VulnError {
    /// Network request failed
    #[error("advisory lookup for '{package}' failed: {message}")]
    Network { package: String, message: String },

    /// The advisory service answered with something unexpected
    #[error("invalid advisory response for '{package}': {message}")]
    InvalidResponse { package: String, message: String },
}

impl ScanError {
    /// Creates a new CommandFailed error
    pub fn command_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        ScanError::CommandFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidOutput error
    pub fn invalid_output(tool: impl Into<String>, message: impl Into<String>) -> Self {
        ScanError::InvalidOutput {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidFilter error
    pub fn invalid_filter(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        ScanError::InvalidFilter {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl UpdateError {
    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, output: impl Into<String>) -> Self {
        UpdateError::CommandFailed {
            command: command.into(),
            output: output.into(),
        }
    }
}

impl VulnError {
    /// Creates a new Network error
    pub fn network(package: impl Into<String>, message: impl Into<String>) -> Self {
        VulnError::Network {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(package: impl Into<String>, message: impl Into<String>) -> Self {
        VulnError::InvalidResponse {
            package: package.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_command_failed() {
        let err = ScanError::command_failed("go list", "exit status 1");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to run go list"));
        assert!(msg.contains("exit status 1"));
    }

    #[test]
    fn test_scan_error_invalid_output() {
        let err = ScanError::invalid_output("npm outdated", "expected value at line 1");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse npm outdated output"));
    }

    #[test]
    fn test_scan_error_invalid_filter() {
        let err = ScanError::invalid_filter("[", "unclosed character class");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid filter pattern '['"));
        assert!(msg.contains("unclosed"));
    }

    #[test]
    fn test_manifest_error_json_parse() {
        let err = ManifestError::json_parse_error("/path/to/package.json", "unexpected token");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse JSON"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_manifest_error_toml_parse() {
        let err = ManifestError::toml_parse_error("/path/to/pyproject.toml", "invalid key");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse TOML"));
        assert!(msg.contains("pyproject.toml"));
    }

    #[test]
    fn test_config_error_invalid_format() {
        let err = ConfigError::InvalidFormat {
            value: "table".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid format option 'table'"));
    }

    #[test]
    fn test_config_error_unsupported_manager() {
        let err = ConfigError::UnsupportedManager {
            value: "cargo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported package manager: cargo (supported: go, npm, yarn, pnpm, pip, poetry, uv)"
        );
    }

    #[test]
    fn test_config_error_no_package_manager() {
        let err = ConfigError::NoPackageManager {
            dir: PathBuf::from("/tmp/empty"),
        };
        assert!(err.to_string().contains("no supported package manager detected"));
    }

    #[test]
    fn test_update_error_includes_output() {
        let err = UpdateError::command_failed("go get", "module not found");
        assert_eq!(err.to_string(), "go get failed: module not found");
    }

    #[test]
    fn test_vuln_error_network() {
        let err = VulnError::network("lodash", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("lodash"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_app_error_from_scan_error() {
        let app_err: AppError = ScanError::command_failed("pip", "not found").into();
        assert!(app_err.to_string().contains("failed to run pip"));
    }

    #[test]
    fn test_app_error_from_manifest_error() {
        let scan_err: ScanError = ManifestError::json_parse_error("package.json", "eof").into();
        let app_err: AppError = scan_err.into();
        assert!(app_err.to_string().contains("failed to parse JSON"));
    }

    #[test]
    fn test_app_error_from_update_error() {
        let app_err: AppError = UpdateError::command_failed("npm install", "ERESOLVE").into();
        assert!(app_err.to_string().contains("ERESOLVE"));
    }

    #[test]
    fn test_app_error_from_vuln_error() {
        let app_err: AppError = VulnError::network("osv", "tls init failed").into();
        assert!(matches!(app_err, AppError::Vuln(_)));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = ScanError::command_failed("yarn", "boom");
        let debug = format!("{:?}", err);
        assert!(debug.contains("CommandFailed"));
    }
}
