// Rust guideline compliant 2026-02-06

//! Per-identifier work: run an external command with the identifier appended.

use anyhow::Result;
use hookbatch_core::WorkError;
use std::fmt;
use std::process::Command;

/// External command invoked once per identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecWork {
    program: String,
    args: Vec<String>,
}

impl ExecWork {
    /// Parses a whitespace-separated command line.
    ///
    /// Quoting is not interpreted; wrap complex commands in a script.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is empty.
    pub fn parse(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            anyhow::bail!("--exec command cannot be empty");
        };
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Runs the command for one identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits unsuccessfully.
    pub fn call(&self, id: &str) -> std::result::Result<(), WorkError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(id)
            .status()?;
        if !status.success() {
            return Err(format!("`{} {}` exited with {}", self, id, status).into());
        }
        Ok(())
    }
}

impl fmt::Display for ExecWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
