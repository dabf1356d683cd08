use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

/// Setup del logging multi-target
/// - Console (stderr): todos los niveles según RUST_LOG
/// - File: solo warnings y errores, en rdp-exec.log
///
/// Si no se puede abrir ningún directorio de logs se sigue solo con la consola
/// y el error del archivo se reporta por ella. El guard devuelto debe vivir
/// hasta el final de `main` para vaciar el archivo.
pub fn setup_logging(log_to_file: bool) -> Result<Option<WorkerGuard>> {
    let (appender, file_error) = if log_to_file {
        match open_log_appender_in(log_directory_candidates()) {
            Ok(appender) => (Some(appender), None),
            Err(e) => (None, Some(e)),
        }
    } else {
        (None, None)
    };

    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false) // No ANSI codes en archivos
                .with_target(true)
                .with_filter(EnvFilter::new("warn"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let file_enabled = file_layer.is_some();

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(get_console_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    if let Some(e) = file_error {
        tracing::warn!("⚠️ Log a archivo desactivado, solo consola: {:#}", e);
    }

    tracing::debug!("📋 Logging configurado (archivo: {})", file_enabled);
    Ok(guard)
}

/// Abrir rdp-exec.log en el primer directorio escribible de `candidates`.
/// Prioridad: carpeta del ejecutable > cache del usuario > directorio actual
fn open_log_appender_in(candidates: Vec<PathBuf>) -> Result<RollingFileAppender> {
    let mut last_error = None;

    for dir in candidates {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            last_error = Some(anyhow!("{}: {}", dir.display(), e));
            continue;
        }

        match RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix("rdp-exec")
            .filename_suffix("log")
            .build(&dir)
        {
            Ok(appender) => return Ok(appender),
            Err(e) => last_error = Some(anyhow!("{}: {}", dir.display(), e)),
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow!("no log directory available")))
}

fn log_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.to_path_buf());
        }
    }

    if let Some(cache_dir) = dirs::cache_dir() {
        candidates.push(cache_dir.join("rdp-exec"));
    }

    candidates.push(PathBuf::from("."));
    candidates
}

/// Filtro para console según environment
fn get_console_filter() -> EnvFilter {
    // En development: debug, en production: info
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_candidates_end_with_current_dir() {
        let candidates = log_directory_candidates();
        assert!(!candidates.is_empty());
        assert_eq!(candidates.last(), Some(&PathBuf::from(".")));
    }

    #[test]
    fn test_unusable_log_directories_are_an_error() {
        // Un archivo normal no sirve como directorio de logs
        let blocker = env::temp_dir().join(format!("rdp-exec-blocker-{}", uuid::Uuid::new_v4()));
        std::fs::write(&blocker, b"").unwrap();
        let nested = blocker.join("logs");

        let result = open_log_appender_in(vec![blocker.clone(), nested]);
        std::fs::remove_file(&blocker).ok();

        let err = result.err().expect("no directory should be usable");
        assert!(err.to_string().contains("rdp-exec-blocker"), "{:#}", err);
        assert!(open_log_appender_in(Vec::new()).is_err());
    }

    #[test]
    fn test_falls_back_to_next_log_directory() {
        let blocker = env::temp_dir().join(format!("rdp-exec-blocker-{}", uuid::Uuid::new_v4()));
        std::fs::write(&blocker, b"").unwrap();
        let usable = env::temp_dir().join(format!("rdp-exec-logs-{}", uuid::Uuid::new_v4()));

        let result = open_log_appender_in(vec![blocker.clone(), usable.clone()]);
        let created = usable.join("rdp-exec.log").exists();
        drop(result);
        std::fs::remove_file(&blocker).ok();
        std::fs::remove_dir_all(&usable).ok();

        assert!(created);
    }
}
