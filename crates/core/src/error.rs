use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to start `{}`: {}", .executable, .source)]
    Spawn {
        executable: String,
        source: std::io::Error,
    },

    #[error("No executable was given to run.")]
    EmptyExecutable,

    #[error("A process is already running in this panel.")]
    AlreadyRunning,

    #[error("Missing required value: {}", .0)]
    MissingField(String),

    #[error("Invalid number for {}: \"{}\"", .field, .value)]
    InvalidNumber { field: String, value: String },

    #[error("Invalid range: {}", .0)]
    InvalidRange(String),

    #[error("Output cannot be saved until the process has finished, or it has already been saved.")]
    SaveNotAllowed,

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn spawn_error(executable: String, source: std::io::Error) -> Self {
        Self::Spawn { executable, source }
    }

    pub fn invalid_number(field: &str, value: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
