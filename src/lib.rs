//! faro - Cross-ecosystem dependency update checker library
//!
//! This library finds outdated dependencies by asking each project's own
//! package manager, then lists them or applies them:
//! - Go (go.mod)
//! - Node.js through npm, yarn or pnpm (package.json)
//! - Python through pip, Poetry or uv (requirements.txt, pyproject.toml)

pub mod classify;
pub mod cli;
pub mod command;
pub mod detector;
pub mod domain;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod picker;
pub mod progress;
pub mod scanner;
pub mod updater;
pub mod vuln;
