// Release en Windows: subsistema GUI para que no aparezca una consola en la sesión remota
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::process::ExitCode;
use tracing::{error, info, info_span, warn};

mod cli;
mod core;
mod logging;
mod system;

use cli::Cli;
use crate::core::{pipeline, LaunchConfig};
use logging::setup_logging;
use system::NativePlatform;

/// Entry point: flags → configuración → logging → pipeline
fn main() -> ExitCode {
    let cli = match Cli::parse_compat(std::env::args_os()) {
        Ok(cli) => cli,
        // --help / --version salen con 0, errores de flags con 2
        Err(e) => e.exit(),
    };

    let (config, config_error) = match LaunchConfig::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (LaunchConfig::default(), Some(e)),
    };

    // El launcher tiene que intentar ejecutar aunque no haya logging
    let _log_guard = match setup_logging(config.log_to_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("rdp-exec: logging disabled: {:#}", e);
            None
        }
    };

    if let Some(e) = config_error {
        warn!("⚠️ Configuración inválida, usando valores por defecto: {:#}", e);
    }

    let span = info_span!("launch", run = %uuid::Uuid::new_v4());
    let _enter = span.enter();

    match pipeline::run(&NativePlatform, &cli.invocation()) {
        Ok(outcome) => {
            info!("✅ Completado: PID {} (código: {:?})", outcome.pid, outcome.exit_code);
            ExitCode::from(config.exit_status_for(&outcome))
        }
        Err(e) if e.is_input_error() => {
            warn!("⚠️ Nada que ejecutar: {}", e);
            ExitCode::from(e.exit_status())
        }
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::from(e.exit_status())
        }
    }
}
