//! Checks whether the executables a panel depends on are installed.

use std::process::Stdio;

use log::debug;
use tokio::process::Command;

#[cfg(windows)]
const LOOKUP_COMMAND: &str = "where";
#[cfg(not(windows))]
const LOOKUP_COMMAND: &str = "which";

/// Whether `command` resolves to an executable on this host.
pub async fn is_command_available(command: &str) -> bool {
    if command.trim().is_empty() {
        return false;
    }

    let status = Command::new(LOOKUP_COMMAND)
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) => status.success(),
        Err(e) => {
            debug!("Could not run `{}` to look up `{}`: {}", LOOKUP_COMMAND, command, e);
            false
        }
    }
}

/// The subset of `commands` that could not be found, in the given order.
pub async fn missing_commands(commands: &[String]) -> Vec<String> {
    let mut missing = Vec::new();
    for command in commands {
        if !is_command_available(command).await {
            missing.push(command.clone());
        }
    }

    missing
}

/// True when every command in `commands` is installed.
pub async fn check_all_commands_availability(commands: &[String]) -> bool {
    missing_commands(commands).await.is_empty()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shell_is_available() {
        assert!(is_command_available("sh").await);
    }

    #[tokio::test]
    async fn test_unknown_command_is_missing() {
        let commands = vec!["sh".to_string(), "definitely-not-a-real-tool-7f3a".to_string()];
        assert_eq!(
            missing_commands(&commands).await,
            vec!["definitely-not-a-real-tool-7f3a".to_string()]
        );
        assert!(!check_all_commands_availability(&commands).await);
    }

    #[tokio::test]
    async fn test_empty_list_is_available() {
        assert!(check_all_commands_availability(&[]).await);
    }

    #[tokio::test]
    async fn test_blank_name_is_missing() {
        assert!(!is_command_available("  ").await);
    }
}
