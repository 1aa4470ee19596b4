use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// Description of one external tool run. Built by a panel from its form
/// values and handed to the [`Launcher`](crate::execution::Launcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub executable: String,
    pub arguments: Vec<String>,
    pub privilege_elevation: bool,
}

impl InvocationRequest {
    pub fn new(executable: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            arguments,
            privilege_elevation: false,
        }
    }

    #[must_use]
    pub fn elevated(mut self) -> Self {
        self.privilege_elevation = true;
        self
    }

    /// Resolves the program and argument list actually handed to the OS.
    ///
    /// With elevation the wrapper becomes the program and the target
    /// executable is its first argument.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyExecutable`] if no executable is set.
    pub fn command_line(&self, elevation_wrapper: &str) -> Result<(String, Vec<String>)> {
        if self.executable.trim().is_empty() {
            return Err(Error::EmptyExecutable);
        }

        if self.privilege_elevation {
            let mut arguments = Vec::with_capacity(self.arguments.len() + 1);
            arguments.push(self.executable.clone());
            arguments.extend(self.arguments.iter().cloned());
            Ok((elevation_wrapper.to_string(), arguments))
        } else {
            Ok((self.executable.clone(), self.arguments.clone()))
        }
    }
}

impl Display for InvocationRequest {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.executable)?;
        for argument in &self.arguments {
            write!(formatter, " {}", argument)?;
        }

        Ok(())
    }
}
