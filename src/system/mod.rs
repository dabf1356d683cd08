//! Capa de integración con Windows: registro de asociaciones, variables de entorno
//! y creación de procesos, detrás del trait `HostPlatform`.

pub mod environment;
pub mod process;
pub mod registry;

#[cfg(test)]
pub mod testing;

use crate::core::ExecError;
pub use process::LaunchOutcome;

/// Capacidades del SO que usa el pipeline. El pipeline solo habla con este trait,
/// así la lógica de resolución se puede probar con un fake.
pub trait HostPlatform {
    /// Ejecutable registrado para abrir `extension` (ya normalizada, p.ej. ".docx")
    fn query_executable(&self, extension: &str) -> Option<String>;

    /// Expandir referencias `%NAME%`; ante cualquier fallo devuelve `text` sin cambios
    fn expand_environment(&self, text: &str) -> String;

    /// Crear el proceso, esperar a que termine y liberar sus handles
    fn launch_and_wait(
        &self,
        command_line: &str,
        working_directory: &str,
    ) -> Result<LaunchOutcome, ExecError>;
}

/// Implementación real: llamadas directas a la API de Windows
pub struct NativePlatform;

impl HostPlatform for NativePlatform {
    fn query_executable(&self, extension: &str) -> Option<String> {
        registry::query_executable(extension)
    }

    fn expand_environment(&self, text: &str) -> String {
        environment::expand(text)
    }

    fn launch_and_wait(
        &self,
        command_line: &str,
        working_directory: &str,
    ) -> Result<LaunchOutcome, ExecError> {
        process::launch_and_wait(command_line, working_directory)
    }
}
