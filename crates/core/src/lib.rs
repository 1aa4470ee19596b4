//! Tool Panels Core Library
//!
//! This crate provides the core functionality for tool-panels, a front-end
//! that runs command-line security tools (nbtscan, rtgen) from form panels,
//! streams their output, lets the user cancel them and saves the result.
//!
//! # Key Features
//!
//! - **Process Sessions**: Launch a tool, receive its output chunk by chunk and
//!   exactly one termination result
//! - **Cancellation**: Ask a running tool to stop with SIGTERM
//! - **Panel State**: The loading flag, output buffer, process handle and save
//!   state owned by one panel
//! - **Tool Forms**: Argument construction and validation for each tool
//! - **Configuration Management**: Elevation wrapper, output directory and
//!   executable overrides
//!
//! # Examples
//!
//! Running a scan and collecting its output:
//!
//! ```no_run
//! use tool_panels_core::config::PanelsConfig;
//! use tool_panels_core::panel::PanelState;
//! use tool_panels_core::tools::{NbtscanForm, Tool};
//!
//! # async fn run() -> tool_panels_core::error::Result<()> {
//! let config = PanelsConfig::default();
//! let form = NbtscanForm {
//!     subnet: "192.168.1.0/24".to_string(),
//!     ..NbtscanForm::default()
//! };
//!
//! let mut panel = PanelState::default();
//! panel.begin()?;
//! let mut session = config.launcher().spawn(&form.to_request(&config)?)?;
//! panel.started(session.handle());
//! while let Some(event) = session.next_event().await {
//!     panel.apply(event);
//! }
//! println!("{}", panel.output());
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod invocation;
pub mod panel;
pub mod termination;
pub mod tools;
