use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::system::LaunchOutcome;

/// Directorio de trabajo de todo proceso lanzado: rutas relativas del target
/// se resuelven siempre contra el directorio del sistema
pub const SYSTEM_DIRECTORY: &str = "C:\\Windows\\System32";

/// Nombre del archivo de configuración junto al ejecutable
const CONFIG_FILE_NAME: &str = "rdp-exec.json";

/// Configuración del launcher - JSON opcional junto al ejecutable.
/// Se construye una vez al arrancar y se pasa al pipeline.
/// El directorio de trabajo del hijo no es configurable: siempre SYSTEM_DIRECTORY.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LaunchConfig {
    /// Salir con el código del hijo en vez de 0
    pub propagate_exit_code: bool,
    /// Escribir warnings/errores en rdp-exec.log
    pub log_to_file: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            propagate_exit_code: false,
            log_to_file: true,
        }
    }
}

impl LaunchConfig {
    /// Cargar configuración desde `explicit` o, si no se indicó, desde rdp-exec.json
    /// en la carpeta del ejecutable. El archivo implícito es opcional y nunca se crea.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = get_config_path();
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Error leyendo configuración: {}", config_path.display()))?;

        let config: LaunchConfig = serde_json::from_str(&config_content)
            .with_context(|| format!("Error parseando {} - JSON inválido", config_path.display()))?;

        Ok(config)
    }

    /// Código de salida del launcher tras un lanzamiento correcto
    pub fn exit_status_for(&self, outcome: &LaunchOutcome) -> u8 {
        if !self.propagate_exit_code {
            return 0;
        }

        match outcome.exit_code {
            Some(code) => u8::try_from(code).unwrap_or(1),
            None => 1,
        }
    }
}

/// Ruta de rdp-exec.json (carpeta del ejecutable)
fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(CONFIG_FILE_NAME);
        }
    }

    // Fallback a directorio actual
    PathBuf::from(CONFIG_FILE_NAME)
}
