use clap::Parser;
use log::{debug, info, warn};
use std::io::stdout;
use std::process::ExitCode;
use tool_panels_core::availability;
use tool_panels_core::config::{self, PanelsConfig};
use tool_panels_core::error::Result;
use tool_panels_core::execution::{cancel, CancelOutcome, SessionEvent};
use tool_panels_core::file_handling;
use tool_panels_core::panel::PanelState;
use tool_panels_core::termination::Outcome;
use tool_panels_core::tools::{NbtscanForm, RtgenForm, Tool};

use tool_panels_cli::cli_args::{Args, ToolCommand};
use tool_panels_cli::console::{self, ConsoleWriter};

/// Load the configuration named on the command line, or the default one
fn initialize_config(args: &Args) -> Result<PanelsConfig> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);

    file_handling::get_config(&config_path)
}

async fn check_tools(tools: &[String]) -> Result<ExitCode> {
    let tools: Vec<String> = if tools.is_empty() {
        [NbtscanForm::default().dependencies(), RtgenForm::default().dependencies()].concat()
    } else {
        tools.to_vec()
    };

    let mut results = Vec::with_capacity(tools.len());
    for tool in tools {
        let available = availability::is_command_available(&tool).await;
        results.push((tool, available));
    }

    println!("{}", console::format_availability(&results));

    if results.iter().all(|(_, available)| *available) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Run one tool to completion, streaming its output and cancelling on Ctrl-C
async fn run_tool(args: &Args, config: &PanelsConfig, tool: &impl Tool) -> Result<ExitCode> {
    let request = tool.to_request(config)?;
    let launcher = config.launcher();

    println!(
        "Executing command:\n{}",
        console::describe_invocation(&request, &launcher)
    );

    if args.dry_run {
        println!("Dry run is specified, exiting without executing.");
        return Ok(ExitCode::SUCCESS);
    }

    let dependencies: Vec<String> = tool
        .dependencies()
        .iter()
        .map(|dependency| config.executable_for(dependency))
        .collect();
    let missing = availability::missing_commands(&dependencies).await;
    if !missing.is_empty() {
        warn!(
            "{} does not appear to be installed (missing: {}). See {}",
            tool.title(),
            missing.join(", "),
            tool.source_link()
        );
    }

    let mut stdout = stdout();
    let mut console = ConsoleWriter::default();
    let mut panel = PanelState::default();
    panel.begin()?;

    let mut session = match launcher.spawn(&request) {
        Ok(session) => session,
        Err(e) => {
            panel.spawn_failed(&e);
            console.write_status(&mut stdout, &format!("Error: {e}"), None)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let handle = session.handle();
    panel.started(handle);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut outcome = None;
    let mut cancel_requested = false;
    loop {
        tokio::select! {
            event = session.next_event() => match event {
                Some(SessionEvent::Output(chunk)) => {
                    console.write_chunk(&mut stdout, &chunk)?;
                    panel.append_output(chunk);
                }
                Some(SessionEvent::Terminated(result)) => {
                    let finished = panel.terminated(result);
                    console.write_status(&mut stdout, &result.marker(), Some(finished))?;
                    outcome = Some(finished);
                }
                None => break,
            },
            _ = &mut ctrl_c => {
                ctrl_c.set(tokio::signal::ctrl_c());
                if cancel_requested {
                    warn!("Interrupted again, no longer waiting for pid {}", handle);
                    break;
                }

                cancel_requested = true;
                match cancel(&handle) {
                    CancelOutcome::Signalled => info!("Cancellation requested for pid {}", handle),
                    CancelOutcome::NotFound => debug!("Pid {} already exited", handle),
                    CancelOutcome::Denied => {
                        warn!(
                            "Could not signal pid {}; elevated processes may need to be stopped manually",
                            handle
                        );
                        break;
                    }
                }
            }
        }
    }

    if outcome.is_none() {
        console.write_status(
            &mut stdout,
            &format!("Stopped waiting for process {handle}."),
            cancel_requested.then_some(Outcome::Cancelled),
        )?;
    }

    if let Some(output_path) = &args.output_path {
        if panel.can_save() {
            file_handling::save_output(output_path, &mut panel)?;
            println!("Output saved to {}", config::expand_path(output_path));
        } else {
            warn!("The tool did not finish, output was not saved");
        }
    }

    // Returning drops the session task, and with it the child (`kill_on_drop`)
    Ok(ExitCode::from(console::final_exit_status(outcome, cancel_requested)))
}

async fn execute() -> Result<ExitCode> {
    let args = Args::parse();
    let config = initialize_config(&args)?;

    match &args.tool {
        ToolCommand::Check { tools } => check_tools(tools).await,
        ToolCommand::Nbtscan(nbtscan) => run_tool(&args, &config, &NbtscanForm::from(nbtscan)).await,
        ToolCommand::Rtgen(rtgen) => run_tool(&args, &config, &RtgenForm::from(rtgen)).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match execute().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
