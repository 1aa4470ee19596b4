//! Form models for the wrapped tools.
//!
//! Each form holds the raw values a panel collects and knows how to turn
//! them into an [`InvocationRequest`]. Validation happens there, so both
//! front-ends report the same errors for the same input.

pub mod nbtscan;
pub mod rtgen;

pub use nbtscan::NbtscanForm;
pub use rtgen::RtgenForm;

use crate::config::PanelsConfig;
use crate::error::{Error, Result};
use crate::invocation::InvocationRequest;

/// A wrapped command-line tool and its user guide.
pub trait Tool {
    /// Executable name, also used as the tool's id.
    fn id(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn steps(&self) -> &'static str;
    fn source_link(&self) -> &'static str;

    /// Walkthrough of the tool, when one exists.
    fn tutorial(&self) -> Option<&'static str> {
        None
    }

    /// Commands that must be installed for the tool to work.
    fn dependencies(&self) -> Vec<String> {
        vec![self.id().to_string()]
    }

    /// Builds the argument list from the form values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`], [`Error::InvalidNumber`] or
    /// [`Error::InvalidRange`] when the form is incomplete or malformed.
    fn arguments(&self) -> Result<Vec<String>>;

    fn privilege_elevation(&self) -> bool {
        false
    }

    /// Builds the request, honouring any executable override in `config`.
    ///
    /// # Errors
    ///
    /// Same as [`Tool::arguments`].
    fn to_request(&self, config: &PanelsConfig) -> Result<InvocationRequest> {
        let mut request = InvocationRequest::new(config.executable_for(self.id()), self.arguments()?);
        request.privilege_elevation = self.privilege_elevation();
        Ok(request)
    }
}

/// Trims `value` and fails if nothing is left.
pub(crate) fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::MissingField(field.to_string()));
    }

    Ok(value)
}

/// Parses an unsigned number, or `None` for an empty value.
pub(crate) fn optional_number(field: &str, value: &str) -> Result<Option<u64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<u64>()
        .map(Some)
        .map_err(|_| Error::invalid_number(field, value))
}

pub(crate) fn required_number(field: &str, value: &str) -> Result<u64> {
    optional_number(field, required(field, value)?)?.ok_or_else(|| Error::MissingField(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("subnet", " 10.0.0.0/8 ").unwrap(), "10.0.0.0/8");
        assert!(matches!(required("subnet", "   "), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_optional_number() {
        assert_eq!(optional_number("timeout", "").unwrap(), None);
        assert_eq!(optional_number("timeout", " 250 ").unwrap(), Some(250));
        assert!(matches!(
            optional_number("timeout", "fast"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(optional_number("timeout", "-1").is_err());
    }

    #[test]
    fn test_required_number() {
        assert_eq!(required_number("chain length", "1000").unwrap(), 1000);
        assert!(matches!(
            required_number("chain length", ""),
            Err(Error::MissingField(_))
        ));
    }
}
