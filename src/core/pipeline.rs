/// Pipeline completo: decode → asociación → ensamblado → expansión → lanzamiento

use tracing::{debug, info};

use crate::core::assemble::{assemble, extension_needing_handler};
use crate::core::association::resolve_default_handler;
use crate::core::config::SYSTEM_DIRECTORY;
use crate::core::decode::decode;
use crate::core::ExecError;
use crate::system::{HostPlatform, LaunchOutcome};

/// Flags tal como llegan del agente remoto, todavía codificados
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub cmd: String,
    pub cmd_args: String,
    pub dummy: String,
}

impl Invocation {
    /// `cmd` y `dummy` son obligatorios y no pueden estar vacíos
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.cmd.is_empty() {
            return Err(ExecError::MissingField("cmd"));
        }
        if self.dummy.is_empty() {
            return Err(ExecError::MissingField("dummy"));
        }
        Ok(())
    }
}

/// Línea de comando lista para CreateProcessW
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommandLine {
    /// Target decodificado, sin tocar
    pub target: String,
    /// Handler usado, si el target es un documento con asociación
    pub handler: Option<String>,
    /// Línea antes de expandir variables
    pub assembled: String,
    /// Línea final tras expandir variables
    pub expanded: String,
}

/// Resolver los flags a una línea de comando. No lanza nada.
pub fn resolve_command_line(
    platform: &dyn HostPlatform,
    invocation: &Invocation,
) -> Result<ResolvedCommandLine, ExecError> {
    invocation.validate()?;

    let target = decode(&invocation.cmd);
    if target.split_whitespace().next().is_none() {
        return Err(ExecError::NothingToExecute);
    }
    debug!("🔧 Target decodificado: {}", target);

    let handler = match extension_needing_handler(&target) {
        Some(ext) => {
            let association = resolve_default_handler(platform, &ext);
            if !association.is_resolved() {
                debug!("↩️ {} sin handler: se lanza el target directamente", association.extension);
            }
            association.handler
        }
        None => None,
    };

    // Se respeta el flag codificado: si vino, se añade aunque decodifique a vacío
    let arguments = (!invocation.cmd_args.is_empty()).then(|| decode(&invocation.cmd_args));

    let assembled = assemble(&target, arguments.as_deref(), handler.as_deref());
    let expanded = platform.expand_environment(&assembled);

    Ok(ResolvedCommandLine {
        target,
        handler,
        assembled,
        expanded,
    })
}

/// Resolver y lanzar en SYSTEM_DIRECTORY, bloqueando hasta que el hijo termine
pub fn run(platform: &dyn HostPlatform, invocation: &Invocation) -> Result<LaunchOutcome, ExecError> {
    let resolved = resolve_command_line(platform, invocation)?;
    if let Some(handler) = &resolved.handler {
        info!("📄 Abriendo {} con {}", resolved.target, handler);
    }
    debug!("🔧 Línea ensamblada: {}", resolved.assembled);
    info!("📋 Línea de comando: {}", resolved.expanded);

    platform.launch_and_wait(&resolved.expanded, SYSTEM_DIRECTORY)
}
