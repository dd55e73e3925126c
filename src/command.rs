//! Subprocess execution for package manager tools
//!
//! This module provides:
//! - A `CommandRunner` seam so scanners and updaters can be driven by scripted output in tests
//! - `SystemCommandRunner`, which executes real commands with `std::process::Command`

use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tracing::debug;

/// Captured result of one command invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output with the given exit code and streams
    pub fn failed(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr, trimmed, for error messages
    pub fn combined(&self) -> String {
        let mut out = self.stdout.trim().to_string();
        let err = self.stderr.trim();
        if !err.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(err);
        }
        out
    }
}

/// Trait for running package manager commands
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` in `working_dir` and capture its output
    fn run(&self, program: &str, args: &[&str], working_dir: &Path) -> io::Result<CommandOutput>;
}

/// Shared handle used by adapters
pub type SharedRunner = Arc<dyn CommandRunner>;

/// Default runner that executes real commands
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Wrap a new system runner in a shared handle
    pub fn shared() -> SharedRunner {
        Arc::new(Self)
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str], working_dir: &Path) -> io::Result<CommandOutput> {
        debug!(program, ?args, dir = %working_dir.display(), "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .output()?;

        let result = CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        debug!(program, code = ?result.code, "command finished");
        Ok(result)
    }
}

/// Render a command line for messages and logs
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned outputs in order and records every invocation
    #[derive(Default)]
    pub struct ScriptedRunner {
        responses: Mutex<VecDeque<io::Result<CommandOutput>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, output: CommandOutput) -> Self {
            if let Ok(mut r) = self.responses.lock() {
                r.push_back(Ok(output));
            }
            self
        }

        pub fn respond_err(self, kind: io::ErrorKind) -> Self {
            if let Ok(mut r) = self.responses.lock() {
                r.push_back(Err(io::Error::new(kind, "spawn failed")));
            }
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        pub fn shared(self) -> Arc<Self> {
            Arc::new(self)
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, program: &str, args: &[&str], _working_dir: &Path) -> io::Result<CommandOutput> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(display_command(program, args));
            }
            self.responses
                .lock()
                .ok()
                .and_then(|mut r| r.pop_front())
                .unwrap_or_else(|| Ok(CommandOutput::ok("")))
        }
    }
}
