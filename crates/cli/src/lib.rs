//! Tool Panels CLI Library
//!
//! This crate provides the terminal front-end for tool-panels. It runs one
//! wrapped tool per invocation, streams the tool's output to stdout, turns
//! Ctrl-C into a cancellation request and optionally saves the final output.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing, one subcommand per tool
//! - [`console`]: Rendering of output chunks, status lines and exit codes
//!
//! # Examples
//!
//! ```bash
//! # Scan a subnet
//! tp nbtscan 192.168.1.0/24
//!
//! # Advanced options, saving the output
//! tp -o ~/scan.txt nbtscan 192.168.1.0/24 --dump-packets -t 500
//!
//! # Generate a rainbow table through the elevation wrapper
//! tp rtgen md5 loweralpha 1 7 0 1000 100000 0
//!
//! # Dry run (don't execute, just show what would run)
//! tp --dry-run rtgen md5 loweralpha 1 7 0 1000 100000 0
//!
//! # Check which tools are installed
//! tp check
//! ```

pub mod cli_args;
pub mod console;
