use thiserror::Error;

/// Fallos que el pipeline sí propaga. Decodificación, asociación y expansión
/// degradan a un fallback y nunca llegan aquí.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("required flag `{0}` is missing or empty")]
    MissingField(&'static str),

    #[error("decoded command is empty: nothing to execute")]
    NothingToExecute,

    #[error("failed to create process for `{command_line}`: {source}")]
    Spawn {
        command_line: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecError {
    /// Código de salida del launcher para este error
    pub fn exit_status(&self) -> u8 {
        match self {
            ExecError::MissingField(_) | ExecError::NothingToExecute => 1,
            ExecError::Spawn { .. } => 3,
        }
    }

    /// Errores de entrada: no se llegó a crear ningún proceso por culpa de los flags
    pub fn is_input_error(&self) -> bool {
        matches!(self, ExecError::MissingField(_) | ExecError::NothingToExecute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_exit_with_one() {
        assert_eq!(ExecError::MissingField("cmd").exit_status(), 1);
        assert_eq!(ExecError::NothingToExecute.exit_status(), 1);
        assert!(ExecError::NothingToExecute.is_input_error());
    }

    #[test]
    fn test_spawn_error_message_keeps_command_line() {
        let err = ExecError::Spawn {
            command_line: "C:\\missing.exe".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("C:\\missing.exe"));
        assert!(!err.is_input_error());
        assert_eq!(err.exit_status(), 3);
    }
}
