//! Expansión de referencias `%NAME%` con la semántica nativa de Windows:
//! nombres case-insensitive, variables no definidas quedan tal cual.
//! En Windows el trabajo real lo hace ExpandEnvironmentStringsW (ver system::environment);
//! esta versión sirve al stand-in no-Windows y a los tests.
#![cfg_attr(target_os = "windows", allow(dead_code))]

/// Expandir `text` resolviendo cada nombre con `lookup`
pub fn expand_with<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('%') {
            Some(end) => {
                let name = &after[..end];
                match (!name.is_empty()).then(|| lookup(name)).flatten() {
                    Some(value) => {
                        out.push_str(&value);
                        rest = &after[end + 1..];
                    }
                    None => {
                        // El '%' de cierre puede abrir la siguiente referencia
                        out.push('%');
                        out.push_str(name);
                        rest = &after[end..];
                    }
                }
            }
            None => {
                out.push('%');
                rest = after;
                break;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Buscar una variable del proceso ignorando mayúsculas/minúsculas
pub fn lookup_process_env(name: &str) -> Option<String> {
    std::env::vars()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}
