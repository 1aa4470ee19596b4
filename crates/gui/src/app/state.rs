use iced::{Element, Task};
use log::{info, warn};
use tool_panels_core::config::PanelsConfig;
use tool_panels_core::execution::{self, CancelOutcome, Launcher};
use tool_panels_core::panel::PanelState;
use tool_panels_core::tools::{NbtscanForm, RtgenForm, Tool};
use tool_panels_core::{availability, config, file_handling};

use crate::app::{Message, NbtscanField, PanelId, RtgenField};
use crate::execution::session_stream;

/// Console, save target and install notice of one tool panel.
#[derive(Debug, Default)]
pub struct Panel {
    pub session: PanelState,
    pub save_path: String,
    pub missing_dependencies: Vec<String>,
    pub notice_dismissed: bool,
    /// Last validation, cancel or save message shown under the form.
    pub status: Option<String>,
}

impl Panel {
    fn new(save_path: String) -> Self {
        Self {
            save_path,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn show_install_notice(&self) -> bool {
        !self.missing_dependencies.is_empty() && !self.notice_dismissed
    }
}

pub struct ToolPanels {
    pub config: PanelsConfig,
    pub launcher: Launcher,
    pub selected: PanelId,
    pub advanced: bool,
    pub nbtscan_form: NbtscanForm,
    pub rtgen_form: RtgenForm,
    pub nbtscan: Panel,
    pub rtgen: Panel,
}

impl ToolPanels {
    pub fn new() -> (Self, Task<Message>) {
        let config_path = config::get_config_path(&None);
        let config = file_handling::get_config(&config_path).unwrap_or_else(|e| {
            warn!("Using the default configuration: {}", e);
            PanelsConfig::default()
        });

        let app = Self::with_config(config);
        let task = Task::batch([
            app.check_availability(PanelId::Nbtscan),
            app.check_availability(PanelId::Rtgen),
        ]);

        (app, task)
    }

    pub fn with_config(config: PanelsConfig) -> Self {
        let nbtscan_form = NbtscanForm::default();
        let rtgen_form = RtgenForm::default();

        Self {
            launcher: config.launcher(),
            selected: PanelId::Nbtscan,
            advanced: false,
            nbtscan: Panel::new(config.default_output_path(nbtscan_form.id())),
            rtgen: Panel::new(config.default_output_path(rtgen_form.id())),
            nbtscan_form,
            rtgen_form,
            config,
        }
    }

    pub fn title(&self) -> String {
        format!("Tool Panels - {}", self.tool(self.selected).title())
    }

    pub fn tool(&self, id: PanelId) -> &dyn Tool {
        match id {
            PanelId::Nbtscan => &self.nbtscan_form,
            PanelId::Rtgen => &self.rtgen_form,
        }
    }

    pub fn panel(&self, id: PanelId) -> &Panel {
        match id {
            PanelId::Nbtscan => &self.nbtscan,
            PanelId::Rtgen => &self.rtgen,
        }
    }

    fn panel_mut(&mut self, id: PanelId) -> &mut Panel {
        match id {
            PanelId::Nbtscan => &mut self.nbtscan,
            PanelId::Rtgen => &mut self.rtgen,
        }
    }

    fn check_availability(&self, id: PanelId) -> Task<Message> {
        let commands: Vec<String> = self
            .tool(id)
            .dependencies()
            .iter()
            .map(|dependency| self.config.executable_for(dependency))
            .collect();

        Task::perform(
            async move { availability::missing_commands(&commands).await },
            move |missing| Message::AvailabilityChecked(id, missing),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PanelSelected(id) => {
                self.selected = id;
                Task::none()
            }
            Message::AdvancedToggled(advanced) => {
                self.advanced = advanced;
                Task::none()
            }
            Message::DumpPacketsToggled(dump_packets) => {
                self.nbtscan_form.dump_packets = dump_packets;
                Task::none()
            }
            Message::NbtscanChanged(field, value) => {
                let form = &mut self.nbtscan_form;
                let target = match field {
                    NbtscanField::Subnet => &mut form.subnet,
                    NbtscanField::ScanRange => &mut form.scan_range,
                    NbtscanField::Timeout => &mut form.timeout,
                    NbtscanField::Bandwidth => &mut form.bandwidth,
                    NbtscanField::Retransmits => &mut form.retransmits,
                };
                *target = value;
                Task::none()
            }
            Message::RtgenChanged(field, value) => {
                let form = &mut self.rtgen_form;
                let target = match field {
                    RtgenField::HashAlgorithm => &mut form.hash_algorithm,
                    RtgenField::Charset => &mut form.charset,
                    RtgenField::PlaintextLengthMin => &mut form.plaintext_length_min,
                    RtgenField::PlaintextLengthMax => &mut form.plaintext_length_max,
                    RtgenField::TableIndex => &mut form.table_index,
                    RtgenField::ChainLength => &mut form.chain_length,
                    RtgenField::ChainCount => &mut form.chain_count,
                    RtgenField::PartIndex => &mut form.part_index,
                };
                *target = value;
                Task::none()
            }
            Message::Submit(id) => self.submit(id),
            Message::Started(id, Ok(handle)) => {
                self.panel_mut(id).session.started(handle);
                Task::none()
            }
            Message::Started(id, Err(error)) => {
                warn!("Failed to start {:?}: {}", id, error);
                self.panel_mut(id).session.spawn_failed(&error);
                Task::none()
            }
            Message::Session(id, event) => {
                if let Some(outcome) = self.panel_mut(id).session.apply(event) {
                    info!("{:?} finished: {:?}", id, outcome);
                }
                Task::none()
            }
            Message::Cancel(id) => {
                let panel = self.panel_mut(id);
                if let Some(handle) = panel.session.handle() {
                    panel.status = match execution::cancel(&handle) {
                        CancelOutcome::Signalled => None,
                        CancelOutcome::NotFound => {
                            Some(format!("Process {handle} is no longer running."))
                        }
                        CancelOutcome::Denied => Some(format!("Not allowed to stop process {handle}.")),
                    };
                }
                Task::none()
            }
            Message::ClearOutput(id) => {
                let panel = self.panel_mut(id);
                panel.session.clear_output();
                panel.status = None;
                Task::none()
            }
            Message::SavePathChanged(id, path) => {
                self.panel_mut(id).save_path = path;
                Task::none()
            }
            Message::Save(id) => {
                let panel = self.panel_mut(id);
                panel.status = Some(match file_handling::save_output(&panel.save_path, &mut panel.session) {
                    Ok(()) => format!("Output saved to {}", panel.save_path),
                    Err(e) => e.to_string(),
                });
                Task::none()
            }
            Message::AvailabilityChecked(id, missing) => {
                if !missing.is_empty() {
                    warn!("Missing dependencies for {:?}: {}", id, missing.join(", "));
                }
                self.panel_mut(id).missing_dependencies = missing;
                Task::none()
            }
            Message::DismissInstallNotice(id) => {
                self.panel_mut(id).notice_dismissed = true;
                Task::none()
            }
        }
    }

    fn submit(&mut self, id: PanelId) -> Task<Message> {
        let request = match self.tool(id).to_request(&self.config) {
            Ok(request) => request,
            Err(e) => {
                self.panel_mut(id).status = Some(e.to_string());
                return Task::none();
            }
        };

        let panel = self.panel_mut(id);
        if let Err(e) = panel.session.begin() {
            panel.status = Some(e.to_string());
            return Task::none();
        }
        panel.status = None;

        info!("Executing command: {}", request);
        Task::run(session_stream(id, self.launcher.clone(), request), |message| message)
    }

    pub fn view(&self) -> Element<Message> {
        crate::ui::views::main_view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tool_panels_core::execution::{ProcessHandle, SessionEvent};
    use tool_panels_core::panel::SessionState;
    use tool_panels_core::termination::TerminationResult;

    fn app() -> ToolPanels {
        ToolPanels::with_config(PanelsConfig {
            output_directory: Some("/tmp/panels".to_string()),
            ..PanelsConfig::default()
        })
    }

    #[test]
    fn test_default_save_paths() {
        let app = app();
        assert_eq!(app.nbtscan.save_path, "/tmp/panels/nbtscan-output.txt");
        assert_eq!(app.rtgen.save_path, "/tmp/panels/rtgen-output.txt");
    }

    #[test]
    fn test_field_changes_update_forms() {
        let mut app = app();
        let _ = app.update(Message::NbtscanChanged(NbtscanField::Subnet, "10.0.0.0/24".to_string()));
        let _ = app.update(Message::RtgenChanged(RtgenField::ChainCount, "5000".to_string()));
        let _ = app.update(Message::DumpPacketsToggled(true));

        assert_eq!(app.nbtscan_form.subnet, "10.0.0.0/24");
        assert_eq!(app.rtgen_form.chain_count, "5000");
        assert!(app.nbtscan_form.dump_packets);
    }

    #[test]
    fn test_invalid_form_does_not_start() {
        let mut app = app();
        let _ = app.update(Message::Submit(PanelId::Nbtscan));

        assert!(!app.nbtscan.session.is_loading());
        assert!(app.nbtscan.status.is_some());
    }

    #[test]
    fn test_second_submit_is_rejected_while_running() {
        let mut app = app();
        let _ = app.update(Message::NbtscanChanged(NbtscanField::Subnet, "10.0.0.0/24".to_string()));
        let _ = app.update(Message::Submit(PanelId::Nbtscan));
        assert!(app.nbtscan.session.is_loading());
        assert!(app.nbtscan.status.is_none());

        let _ = app.update(Message::Submit(PanelId::Nbtscan));
        assert!(app.nbtscan.session.is_loading());
        assert!(app.nbtscan.status.is_some());
    }

    #[test]
    fn test_session_events_reach_only_their_panel() {
        let mut app = app();
        let _ = app.update(Message::RtgenChanged(RtgenField::HashAlgorithm, "md5".to_string()));
        app.rtgen.session.begin().unwrap();

        let _ = app.update(Message::Started(PanelId::Rtgen, Ok(ProcessHandle::from_pid(55))));
        let _ = app.update(Message::Session(
            PanelId::Rtgen,
            SessionEvent::Output("rainbow table generated\n".to_string()),
        ));
        let _ = app.update(Message::Session(
            PanelId::Rtgen,
            SessionEvent::Terminated(TerminationResult::new(Some(0), None)),
        ));

        assert_eq!(app.rtgen.session.state(), SessionState::Completed);
        assert!(app.rtgen.session.output().starts_with("rainbow table generated\n"));
        assert_eq!(app.nbtscan.session.output(), "");
        assert_eq!(app.nbtscan.session.state(), SessionState::Idle);
    }

    #[test]
    fn test_spawn_failure_is_shown_in_console() {
        let mut app = app();
        app.nbtscan.session.begin().unwrap();
        let _ = app.update(Message::Started(
            PanelId::Nbtscan,
            Err("Failed to start `nbtscan`: No such file or directory".to_string()),
        ));

        assert!(!app.nbtscan.session.is_loading());
        assert!(app.nbtscan.session.output().contains("Error: Failed to start `nbtscan`"));
        assert!(!app.nbtscan.session.can_save());
    }

    #[test]
    fn test_save_before_run_reports_error() {
        let mut app = app();
        let _ = app.update(Message::Save(PanelId::Nbtscan));
        assert!(app.nbtscan.status.is_some());
        assert!(!app.nbtscan.session.save_state().has_saved);
    }

    #[test]
    fn test_install_notice() {
        let mut app = app();
        let _ = app.update(Message::AvailabilityChecked(PanelId::Rtgen, vec!["rtgen".to_string()]));
        assert!(app.rtgen.show_install_notice());
        assert!(!app.nbtscan.show_install_notice());

        let _ = app.update(Message::DismissInstallNotice(PanelId::Rtgen));
        assert!(!app.rtgen.show_install_notice());
    }
}
