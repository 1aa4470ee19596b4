//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate. Each wrapped tool is a subcommand whose options mirror the fields of
//! its panel form.

use clap::{Parser, Subcommand};
use tool_panels_core::tools::{NbtscanForm, RtgenForm};

/// Command-line arguments for the `tp` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use tool_panels_cli::cli_args::Args;
///
/// let args = Args::parse_from(["tp", "nbtscan", "192.168.1.0/24"]);
/// assert!(!args.dry_run);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the configuration YAML.
    ///
    /// If not provided, defaults to `~/.tool-panels/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Save the final output to this file once the tool has finished.
    #[arg(long, short = 'o')]
    pub output_path: Option<String>,

    /// Perform a dry run, which just prints out the command but does not execute it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub tool: ToolCommand,
}

#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// Scan a network for NetBIOS name information.
    Nbtscan(NbtscanArgs),

    /// Generate a rainbow table (runs through the elevation wrapper).
    Rtgen(RtgenArgs),

    /// Check that the wrapped tools are installed.
    ///
    /// Checks every known tool when none are named.
    Check {
        tools: Vec<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct NbtscanArgs {
    /// Target subnet, e.g. 192.168.1.0/24.
    pub subnet: Option<String>,

    /// Dump packets mode.
    #[arg(long, action)]
    pub dump_packets: bool,

    /// Range to scan, as xxx.xxx.xxx.xxx/xx or xxx.xxx.xxx.xxx-xxx.
    #[arg(long, short = 'r')]
    pub range: Option<String>,

    /// Timeout delay in milliseconds.
    #[arg(long, short = 't', default_value = "1000")]
    pub timeout: String,

    /// Bandwidth in kilobytes per second.
    #[arg(long, short = 'b')]
    pub bandwidth: Option<String>,

    /// Number of retransmits.
    #[arg(long, short = 'm')]
    pub retransmits: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RtgenArgs {
    /// Hash algorithm, e.g. md5 or sha1.
    pub hash_algorithm: String,
    /// Character set, e.g. loweralpha-numeric.
    pub charset: String,
    pub plaintext_length_min: String,
    pub plaintext_length_max: String,
    pub table_index: String,
    pub chain_length: String,
    pub chain_count: String,
    pub part_index: String,
}

impl From<&NbtscanArgs> for NbtscanForm {
    fn from(args: &NbtscanArgs) -> Self {
        Self {
            subnet: args.subnet.clone().unwrap_or_default(),
            dump_packets: args.dump_packets,
            scan_range: args.range.clone().unwrap_or_default(),
            timeout: args.timeout.clone(),
            bandwidth: args.bandwidth.clone().unwrap_or_default(),
            retransmits: args.retransmits.clone().unwrap_or_default(),
        }
    }
}

impl From<&RtgenArgs> for RtgenForm {
    fn from(args: &RtgenArgs) -> Self {
        Self {
            hash_algorithm: args.hash_algorithm.clone(),
            charset: args.charset.clone(),
            plaintext_length_min: args.plaintext_length_min.clone(),
            plaintext_length_max: args.plaintext_length_max.clone(),
            table_index: args.table_index.clone(),
            chain_length: args.chain_length.clone(),
            chain_count: args.chain_count.clone(),
            part_index: args.part_index.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["tp", "nbtscan", "10.0.0.0/24"]);

        assert!(args.config_path.is_none());
        assert!(args.output_path.is_none());
        assert!(!args.dry_run);

        let ToolCommand::Nbtscan(nbtscan) = args.tool else {
            panic!("Expected nbtscan subcommand");
        };
        assert_eq!(nbtscan.subnet, Some("10.0.0.0/24".to_string()));
        assert_eq!(nbtscan.timeout, "1000");
        assert!(!nbtscan.dump_packets);
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "tp",
            "-c",
            "/custom/config.yml",
            "-o",
            "/tmp/out.txt",
            "-d",
            "nbtscan",
            "-r",
            "10.0.0.1-20",
            "-t",
            "500",
            "-b",
            "64",
            "-m",
            "3",
        ]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert_eq!(args.output_path, Some("/tmp/out.txt".to_string()));
        assert!(args.dry_run);

        let ToolCommand::Nbtscan(nbtscan) = args.tool else {
            panic!("Expected nbtscan subcommand");
        };
        assert!(nbtscan.subnet.is_none());
        assert_eq!(nbtscan.range, Some("10.0.0.1-20".to_string()));
        assert_eq!(nbtscan.timeout, "500");
        assert_eq!(nbtscan.bandwidth, Some("64".to_string()));
        assert_eq!(nbtscan.retransmits, Some("3".to_string()));
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "tp",
            "--config-path",
            "/custom/config.yml",
            "--output-path",
            "/tmp/out.txt",
            "--dry-run",
            "nbtscan",
            "192.168.1.0/24",
            "--dump-packets",
        ]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert!(args.dry_run);
        let ToolCommand::Nbtscan(nbtscan) = args.tool else {
            panic!("Expected nbtscan subcommand");
        };
        assert!(nbtscan.dump_packets);
    }

    #[test]
    fn test_rtgen_positionals() {
        let args = Args::parse_from([
            "tp", "rtgen", "md5", "loweralpha", "1", "7", "0", "1000", "100000", "0",
        ]);

        let ToolCommand::Rtgen(rtgen) = args.tool else {
            panic!("Expected rtgen subcommand");
        };
        let form = RtgenForm::from(&rtgen);
        assert_eq!(form.hash_algorithm, "md5");
        assert_eq!(form.charset, "loweralpha");
        assert_eq!(form.chain_count, "100000");
        assert_eq!(form.part_index, "0");
    }

    #[test]
    fn test_rtgen_requires_all_positionals() {
        let result = Args::try_parse_from(["tp", "rtgen", "md5", "loweralpha"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_without_tools() {
        let args = Args::parse_from(["tp", "check"]);
        let ToolCommand::Check { tools } = args.tool else {
            panic!("Expected check subcommand");
        };
        assert!(tools.is_empty());
    }

    #[test]
    fn test_nbtscan_form_conversion() {
        let args = Args::parse_from(["tp", "nbtscan", "192.168.1.0/24", "-m", "2"]);
        let ToolCommand::Nbtscan(nbtscan) = args.tool else {
            panic!("Expected nbtscan subcommand");
        };

        let form = NbtscanForm::from(&nbtscan);
        assert_eq!(form.subnet, "192.168.1.0/24");
        assert_eq!(form.scan_range, "");
        assert_eq!(form.timeout, "1000");
        assert_eq!(form.retransmits, "2");
    }
}
