/// Process Supervisor: CreateProcessW → WaitForSingleObject → CloseHandle
/// Created → Running → Waiting → Released, o fallo terminal si la creación falla

use tracing::error;
#[cfg(target_os = "windows")]
use tracing::{debug, info, warn};

use crate::core::ExecError;

/// Resultado de un lanzamiento completo (proceso creado y esperado)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub pid: u32,
    /// None si GetExitCodeProcess falló tras la espera
    pub exit_code: Option<u32>,
}

#[cfg(target_os = "windows")]
#[derive(Debug, Clone, Copy)]
enum Stage {
    Created,
    Running,
    Waiting,
    Released,
}

/// Dueño exclusivo de los handles de proceso e hilo; Drop los cierra en cualquier salida
#[cfg(target_os = "windows")]
struct ProcessHandles {
    pid: u32,
    process: windows::Win32::Foundation::HANDLE,
    thread: windows::Win32::Foundation::HANDLE,
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandles {
    fn drop(&mut self) {
        use windows::Win32::Foundation::CloseHandle;

        unsafe {
            if let Err(e) = CloseHandle(self.process) {
                warn!("⚠️ CloseHandle(process) falló para PID {}: {}", self.pid, e);
            }
            if let Err(e) = CloseHandle(self.thread) {
                warn!("⚠️ CloseHandle(thread) falló para PID {}: {}", self.pid, e);
            }
        }
        debug!(pid = self.pid, stage = ?Stage::Released, "handles liberados");
    }
}

/// Lanzar `command_line` con `working_directory` como directorio actual y bloquear
/// sin timeout hasta que el hijo termine.
#[cfg(target_os = "windows")]
pub fn launch_and_wait(command_line: &str, working_directory: &str) -> Result<LaunchOutcome, ExecError> {
    use windows::core::{PCWSTR, PWSTR};
    use windows::Win32::Foundation::WAIT_OBJECT_0;
    use windows::Win32::System::Threading::{
        CreateProcessW, GetExitCodeProcess, WaitForSingleObject, INFINITE, PROCESS_CREATION_FLAGS,
        PROCESS_INFORMATION, STARTUPINFOW,
    };

    // CreateProcessW puede escribir en el buffer de la línea de comando
    let mut cmd_wide: Vec<u16> = command_line.encode_utf16().chain(std::iter::once(0)).collect();
    let dir_wide: Vec<u16> = working_directory.encode_utf16().chain(std::iter::once(0)).collect();

    let si = STARTUPINFOW {
        cb: std::mem::size_of::<STARTUPINFOW>() as u32,
        ..Default::default()
    };
    let mut pi = PROCESS_INFORMATION::default();

    info!("🚀 Ejecutando: {}", command_line);
    debug!("📁 Directorio de trabajo: {}", working_directory);

    let created = unsafe {
        CreateProcessW(
            PCWSTR::null(),
            Some(PWSTR(cmd_wide.as_mut_ptr())),
            None,
            None,
            false,
            PROCESS_CREATION_FLAGS(0),
            None,
            PCWSTR(dir_wide.as_ptr()),
            &si,
            &mut pi,
        )
    };

    if let Err(e) = created {
        error!("❌ CreateProcessW falló: {}", e);
        // HRESULT_FROM_WIN32: los 16 bits bajos son el código Win32 original
        let source = std::io::Error::from_raw_os_error((e.code().0 & 0xFFFF) as i32);
        return Err(ExecError::Spawn {
            command_line: command_line.to_string(),
            source,
        });
    }

    let handles = ProcessHandles {
        pid: pi.dwProcessId,
        process: pi.hProcess,
        thread: pi.hThread,
    };
    debug!(pid = handles.pid, stage = ?Stage::Created, "proceso creado");
    info!("✅ Proceso iniciado con PID {}", handles.pid);
    debug!(pid = handles.pid, stage = ?Stage::Running, "esperando terminación");

    let wait = unsafe { WaitForSingleObject(handles.process, INFINITE) };
    debug!(pid = handles.pid, stage = ?Stage::Waiting, "espera completada");
    if wait != WAIT_OBJECT_0 {
        warn!("⚠️ WaitForSingleObject devolvió {:?} para PID {}", wait, handles.pid);
    }

    let mut code = 0u32;
    let exit_code = match unsafe { GetExitCodeProcess(handles.process, &mut code) } {
        Ok(()) => Some(code),
        Err(e) => {
            warn!("⚠️ No se pudo leer el código de salida de PID {}: {}", handles.pid, e);
            None
        }
    };

    let outcome = LaunchOutcome {
        pid: handles.pid,
        exit_code,
    };
    drop(handles);

    info!("👋 Proceso {} terminado (código: {:?})", outcome.pid, outcome.exit_code);
    Ok(outcome)
}

#[cfg(not(target_os = "windows"))]
pub fn launch_and_wait(command_line: &str, working_directory: &str) -> Result<LaunchOutcome, ExecError> {
    error!(
        "❌ launch_and_wait called on non-windows OS - refusing `{}` in {}",
        command_line, working_directory
    );
    Err(ExecError::Spawn {
        command_line: command_line.to_string(),
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "process creation requires Windows",
        ),
    })
}

#[cfg(all(test, target_os = "windows"))]
mod tests {
    use super::*;
    use crate::core::config::SYSTEM_DIRECTORY;

    #[test]
    fn test_launch_waits_and_reports_exit_code() {
        let outcome = launch_and_wait("cmd.exe /c exit 7", SYSTEM_DIRECTORY).unwrap();
        assert!(outcome.pid > 0);
        assert_eq!(outcome.exit_code, Some(7));
    }

    #[test]
    fn test_launch_runs_in_working_directory() {
        // cmd.exe expande %CD% con el directorio actual del hijo
        let line = format!("cmd.exe /c if /i \"%CD%\"==\"{}\" (exit 0) else (exit 1)", SYSTEM_DIRECTORY);
        let outcome = launch_and_wait(&line, SYSTEM_DIRECTORY).unwrap();
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[test]
    fn test_launch_missing_executable_is_spawn_error() {
        let err = launch_and_wait("C:\\definitely\\not\\here.exe", SYSTEM_DIRECTORY).unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }
}
