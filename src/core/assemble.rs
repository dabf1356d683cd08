//! Command Assembler: target + handler + argumentos → línea de comando

/// Extensiones que el loader de Windows ejecuta directamente
pub const DIRECT_EXTENSIONS: [&str; 3] = [".exe", ".bat", ".cmd"];

/// Extensión del último elemento de la ruta, incluyendo el punto.
/// `\` y `/` separan elementos; sin punto en el último elemento → "".
pub fn extension_of(target: &str) -> &str {
    let name_start = target
        .rfind(|c| c == '\\' || c == '/')
        .map(|i| i + 1)
        .unwrap_or(0);

    match target[name_start..].rfind('.') {
        Some(dot) => &target[name_start + dot..],
        None => "",
    }
}

/// Si el target necesita un handler, devuelve su extensión en minúsculas
pub fn extension_needing_handler(target: &str) -> Option<String> {
    let ext = extension_of(target).to_lowercase();
    if ext.is_empty() || DIRECT_EXTENSIONS.contains(&ext.as_str()) {
        None
    } else {
        Some(ext)
    }
}

/// Componer la línea de comando antes de expandir variables.
/// Con handler: `"<handler>" "<target>"`; sin handler: el target tal cual.
pub fn assemble(target: &str, arguments: Option<&str>, handler: Option<&str>) -> String {
    let mut line = match handler {
        Some(handler) => format!("\"{}\" \"{}\"", handler, target),
        None => target.to_string(),
    };

    if let Some(args) = arguments {
        line.push(' ');
        line.push_str(args);
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("C:\\file.docx"), ".docx");
        assert_eq!(extension_of("C:\\dir.v2\\tool"), "");
        assert_eq!(extension_of("C:/dir/archive.tar.gz"), ".gz");
        assert_eq!(extension_of("notepad"), "");
        assert_eq!(extension_of("C:\\dir\\.hidden"), ".hidden");
        assert_eq!(extension_of(""), "");
    }

    #[test]
    fn test_direct_extensions_skip_handler() {
        for target in ["C:\\tool.exe", "C:\\TOOL.EXE", "run.Bat", "C:\\x\\setup.CMD", "calc"] {
            assert_eq!(extension_needing_handler(target), None, "{}", target);
        }
    }

    #[test]
    fn test_documents_need_handler() {
        assert_eq!(extension_needing_handler("C:\\file.DOCX"), Some(".docx".to_string()));
        assert_eq!(extension_needing_handler("C:\\a.xyz"), Some(".xyz".to_string()));
    }

    #[test]
    fn test_assemble_with_handler_quotes_both() {
        assert_eq!(
            assemble("C:\\file.docx", None, Some("C:\\Program Files\\Word\\WINWORD.EXE")),
            "\"C:\\Program Files\\Word\\WINWORD.EXE\" \"C:\\file.docx\""
        );
    }

    #[test]
    fn test_assemble_appends_arguments() {
        assert_eq!(
            assemble("C:\\tool.exe", Some("--flag %TEMP%"), None),
            "C:\\tool.exe --flag %TEMP%"
        );
        assert_eq!(
            assemble("C:\\a.pdf", Some("/p"), Some("C:\\r.exe")),
            "\"C:\\r.exe\" \"C:\\a.pdf\" /p"
        );
    }

    #[test]
    fn test_assemble_without_handler_is_raw_target() {
        assert_eq!(assemble("C:\\a.xyz", None, None), "C:\\a.xyz");
    }
}
