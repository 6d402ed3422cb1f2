//! Command line assembly for external tools.

use std::fmt;
use std::path::{Path, PathBuf};

/// A fully-resolved external command invocation: program plus argv.
///
/// Arguments are plain strings; nothing here goes through a shell, so
/// no quoting or escaping is applied on execution. `Display` quotes
/// arguments containing whitespace for readable logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: impl AsRef<Path>) -> Self {
        let rendered = path.as_ref().display().to_string();
        self.arg(rendered)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.chars().any(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
