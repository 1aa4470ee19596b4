use crate::error::{Error, Result};
use crate::tools::{optional_number, Tool};

const DEFAULT_TIMEOUT_MS: &str = "1000";

/// Values collected by the nbtscan panel. Advanced values may stay empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NbtscanForm {
    pub subnet: String,
    pub dump_packets: bool,
    pub scan_range: String,
    pub timeout: String,
    pub bandwidth: String,
    pub retransmits: String,
}

impl Default for NbtscanForm {
    fn default() -> Self {
        Self {
            subnet: String::new(),
            dump_packets: false,
            scan_range: String::new(),
            timeout: DEFAULT_TIMEOUT_MS.to_string(),
            bandwidth: String::new(),
            retransmits: String::new(),
        }
    }
}

impl Tool for NbtscanForm {
    fn id(&self) -> &'static str {
        "nbtscan"
    }

    fn title(&self) -> &'static str {
        "Nbtscan Tool"
    }

    fn description(&self) -> &'static str {
        "Nbtscan scans a network for NetBIOS information. It identifies devices, workgroups \
         and NetBIOS names, which is useful for reconnaissance and for finding legacy systems \
         that still rely on NetBIOS. It accepts single addresses as well as address ranges."
    }

    fn steps(&self) -> &'static str {
        "Step 1: Enter a Target Subnet to scan.\n\
         \x20      Eg: 192.168.1.0/24\n\n\
         Step 2: Click Scan Subnet to start the scan.\n\n\
         Step 3: Watch the output block below for the results.\n\n\
         Switch to Advanced Mode for further options."
    }

    fn source_link(&self) -> &'static str {
        "https://www.kali.org/tools/nbtscan/"
    }

    fn arguments(&self) -> Result<Vec<String>> {
        let subnet = self.subnet.trim();
        let scan_range = self.scan_range.trim();
        if subnet.is_empty() && scan_range.is_empty() {
            return Err(Error::MissingField("subnet".to_string()));
        }

        let mut arguments = Vec::new();

        if !subnet.is_empty() {
            arguments.push(subnet.to_string());
        }

        if self.dump_packets {
            arguments.push("-d".to_string());
        }

        if !scan_range.is_empty() {
            arguments.push(scan_range.to_string());
        }

        if let Some(timeout) = optional_number("timeout", &self.timeout)?.filter(|t| *t > 0) {
            arguments.extend(["-t".to_string(), timeout.to_string()]);
        }

        if let Some(bandwidth) = optional_number("bandwidth", &self.bandwidth)?.filter(|b| *b > 0) {
            arguments.extend(["-b".to_string(), bandwidth.to_string()]);
        }

        if let Some(retransmits) = optional_number("retransmits", &self.retransmits)?.filter(|r| *r > 0) {
            arguments.extend(["-m".to_string(), retransmits.to_string()]);
        }

        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelsConfig;

    fn form_for(subnet: &str) -> NbtscanForm {
        NbtscanForm {
            subnet: subnet.to_string(),
            ..NbtscanForm::default()
        }
    }

    #[test]
    fn test_basic_scan_uses_default_timeout() {
        let arguments = form_for("192.168.1.0/24").arguments().unwrap();
        assert_eq!(arguments, vec!["192.168.1.0/24", "-t", "1000"]);
    }

    #[test]
    fn test_advanced_options() {
        let form = NbtscanForm {
            subnet: "10.0.0.0/24".to_string(),
            dump_packets: true,
            scan_range: "10.0.1.1-20".to_string(),
            timeout: "500".to_string(),
            bandwidth: "64".to_string(),
            retransmits: "2".to_string(),
        };

        assert_eq!(
            form.arguments().unwrap(),
            vec!["10.0.0.0/24", "-d", "10.0.1.1-20", "-t", "500", "-b", "64", "-m", "2"]
        );
    }

    #[test]
    fn test_zero_and_empty_values_are_skipped() {
        let form = NbtscanForm {
            timeout: String::new(),
            retransmits: "0".to_string(),
            ..form_for("192.168.1.0/24")
        };
        assert_eq!(form.arguments().unwrap(), vec!["192.168.1.0/24"]);
    }

    #[test]
    fn test_scan_range_alone_is_a_target() {
        let form = NbtscanForm {
            scan_range: "192.168.1.1-50".to_string(),
            timeout: String::new(),
            ..NbtscanForm::default()
        };
        assert_eq!(form.arguments().unwrap(), vec!["192.168.1.1-50"]);
    }

    #[test]
    fn test_missing_target() {
        assert!(matches!(
            NbtscanForm::default().arguments(),
            Err(Error::MissingField(_))
        ));
    }

    #[test]
    fn test_invalid_timeout() {
        let form = NbtscanForm {
            timeout: "soon".to_string(),
            ..form_for("192.168.1.0/24")
        };
        assert!(matches!(form.arguments(), Err(Error::InvalidNumber { .. })));
    }

    #[test]
    fn test_no_tutorial() {
        assert_eq!(NbtscanForm::default().tutorial(), None);
    }

    #[test]
    fn test_request_is_not_elevated() {
        let request = form_for("192.168.1.0/24")
            .to_request(&PanelsConfig::default())
            .unwrap();
        assert_eq!(request.executable, "nbtscan");
        assert!(!request.privilege_elevation);
    }
}
