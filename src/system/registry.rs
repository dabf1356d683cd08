use tracing::debug;

/// Capacity used by the association query, in UTF-16 units (MAX_PATH)
#[cfg(target_os = "windows")]
const ASSOC_BUFFER_LEN: u32 = 260;

/// Query the executable registered to open files with `extension` (e.g. ".docx").
/// Any failure, including a handler path longer than MAX_PATH, yields `None`.
#[cfg(target_os = "windows")]
pub fn query_executable(extension: &str) -> Option<String> {
    query_executable_with_capacity(extension, ASSOC_BUFFER_LEN)
}

/// Same query with an explicit buffer capacity. A handler that does not fit
/// makes AssocQueryStringW fail (E_POINTER) and yields `None`, never a truncated path.
#[cfg(target_os = "windows")]
fn query_executable_with_capacity(extension: &str, capacity: u32) -> Option<String> {
    use windows::core::{PCWSTR, PWSTR};
    use windows::Win32::UI::Shell::{AssocQueryStringW, ASSOCF_NONE, ASSOCSTR_EXECUTABLE};

    let ext_wide: Vec<u16> = extension.encode_utf16().chain(std::iter::once(0)).collect();
    let mut buf = vec![0u16; capacity as usize];
    let mut len = capacity;

    let hr = unsafe {
        AssocQueryStringW(
            ASSOCF_NONE,
            ASSOCSTR_EXECUTABLE,
            PCWSTR(ext_wide.as_ptr()),
            PCWSTR::null(),
            Some(PWSTR(buf.as_mut_ptr())),
            &mut len,
        )
    };

    if hr.is_err() {
        debug!("AssocQueryStringW({}) failed: {:?}", extension, hr);
        return None;
    }

    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    Some(String::from_utf16_lossy(&buf[..end]))
}

#[cfg(not(target_os = "windows"))]
pub fn query_executable(extension: &str) -> Option<String> {
    debug!("query_executable({}) called on non-windows OS - no associations", extension);
    None
}
