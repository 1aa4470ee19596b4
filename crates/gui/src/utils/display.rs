use iced::Color;
use tool_panels_core::panel::{PanelState, SessionState};

pub fn session_status(panel: &PanelState) -> String {
    match (panel.state(), panel.handle()) {
        (SessionState::Idle, _) => "Ready".to_string(),
        (SessionState::Running, Some(handle)) => format!("Running (pid {handle})"),
        (SessionState::Running, None) => "Starting...".to_string(),
        (SessionState::Completed, _) => "Completed".to_string(),
        (SessionState::Cancelled, _) => "Cancelled".to_string(),
        (SessionState::Failed, _) => "Failed".to_string(),
    }
}

pub fn status_color(state: SessionState) -> Option<Color> {
    match state {
        SessionState::Completed => Some(Color::from_rgb(0.2, 0.6, 0.2)),
        SessionState::Cancelled => Some(Color::from_rgb(0.8, 0.6, 0.1)),
        SessionState::Failed => Some(Color::from_rgb(0.8, 0.2, 0.2)),
        SessionState::Idle | SessionState::Running => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tool_panels_core::execution::ProcessHandle;
    use tool_panels_core::termination::TerminationResult;

    #[test]
    fn test_session_status() {
        let mut panel = PanelState::default();
        assert_eq!(session_status(&panel), "Ready");

        panel.begin().unwrap();
        assert_eq!(session_status(&panel), "Starting...");

        panel.started(ProcessHandle::from_pid(812));
        assert_eq!(session_status(&panel), "Running (pid 812)");

        panel.terminated(TerminationResult::new(None, Some(15)));
        assert_eq!(session_status(&panel), "Cancelled");
        assert!(status_color(panel.state()).is_some());
    }
}
