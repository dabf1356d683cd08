/// Resolución del ejecutable asociado a una extensión (Association Resolver)

use tracing::{debug, info};

use crate::system::HostPlatform;

/// Resultado de consultar el registro de asociaciones para una extensión.
/// `handler == None` significa "sin handler": el llamador cae a ejecución directa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// Extensión normalizada: minúsculas y con punto inicial
    pub extension: String,
    /// Ruta del ejecutable registrado, si la consulta tuvo éxito
    pub handler: Option<String>,
}

impl Association {
    pub fn is_resolved(&self) -> bool {
        self.handler.is_some()
    }
}

/// Normalizar extensión: minúsculas y punto inicial garantizado
pub fn normalize_extension(extension: &str) -> String {
    let lower = extension.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

/// Consultar el handler por defecto. Sin caché: cada llamada vuelve a preguntar al SO.
pub fn resolve_default_handler(platform: &dyn HostPlatform, extension: &str) -> Association {
    let extension = normalize_extension(extension);

    let handler = platform
        .query_executable(&extension)
        .filter(|path| !path.is_empty());

    match &handler {
        Some(path) => info!("🔗 Handler para {}: {}", extension, path),
        None => debug!("⚠️ Sin handler registrado para {}", extension),
    }

    Association { extension, handler }
}
