use tracing::debug;

/// Expand `%NAME%` references with ExpandEnvironmentStringsW.
/// A zero size report, or a second call that disagrees with the first, returns `text` unchanged.
#[cfg(target_os = "windows")]
pub fn expand(text: &str) -> String {
    use windows::core::PCWSTR;
    use windows::Win32::System::Environment::ExpandEnvironmentStringsW;

    let src: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();

    // First call: required size in UTF-16 units, terminator included
    let needed = unsafe { ExpandEnvironmentStringsW(PCWSTR(src.as_ptr()), None) };

    let mut buf = vec![0u16; needed as usize];
    let written = if needed == 0 {
        0
    } else {
        unsafe { ExpandEnvironmentStringsW(PCWSTR(src.as_ptr()), Some(&mut buf)) }
    };

    expansion_result(text, needed, written, &buf)
}

#[cfg(not(target_os = "windows"))]
pub fn expand(text: &str) -> String {
    debug!("expand called on non-windows OS - using process environment");
    crate::core::expand::expand_with(text, crate::core::expand::lookup_process_env)
}

/// Interpret the two ExpandEnvironmentStringsW results. `needed` and `written`
/// count UTF-16 units including the terminator; `buf` holds the second call's output.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn expansion_result(text: &str, needed: u32, written: u32, buf: &[u16]) -> String {
    if needed == 0 {
        debug!("ExpandEnvironmentStringsW reported size 0, keeping input");
        return text.to_string();
    }
    if written == 0 || written > needed || written as usize > buf.len() {
        debug!("ExpandEnvironmentStringsW failed on second call ({} > {}), keeping input", written, needed);
        return text.to_string();
    }

    let filled = &buf[..written as usize];
    let end = filled.iter().position(|&c| c == 0).unwrap_or(filled.len());
    String::from_utf16_lossy(&filled[..end])
}
