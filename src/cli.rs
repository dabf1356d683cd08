use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::core::Invocation;

/// Flags que acepta el launcher. `cmd` y `cmd_args` llegan en base64.
#[derive(Parser, Debug, Default)]
#[command(name = "rdp-exec", version, about = "Resolve an encoded command and run it on this Windows guest")]
pub struct Cli {
    /// Command to run (base64)
    #[arg(long, default_value = "")]
    pub cmd: String,

    /// Command args (base64)
    #[arg(long = "cmd_args", default_value = "")]
    pub cmd_args: String,

    /// Dummy info; must be non-empty
    #[arg(long, default_value = "")]
    pub dummy: String,

    /// Path to a rdp-exec.json; defaults to the one next to the executable
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Flags largos que el agente puede pasar con un solo guion (`-cmd X`, `-cmd=X`)
const LONG_FLAGS: [&str; 4] = ["cmd", "cmd_args", "dummy", "config"];

impl Cli {
    /// Parsear argumentos aceptando también el estilo de un solo guion
    pub fn parse_compat<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_single_dash(args))
    }

    /// Valores que consume el pipeline
    pub fn invocation(&self) -> Invocation {
        Invocation {
            cmd: self.cmd.clone(),
            cmd_args: self.cmd_args.clone(),
            dummy: self.dummy.clone(),
        }
    }
}

/// Reescribir `-name` / `-name=value` a `--name` para los flags conocidos.
/// El primer argumento (nombre del binario) y los valores no se tocan.
fn normalize_single_dash<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut expecting_value = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || expecting_value {
            expecting_value = false;
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
            let name = rest.split('=').next().unwrap_or(rest);
            LONG_FLAGS.contains(&name).then(|| (format!("-{}", s), !rest.contains('=')))
        });

        match rewritten {
            Some((long, takes_next)) => {
                expecting_value = takes_next;
                out.push(OsString::from(long));
            }
            None => {
                // `--name` sin '=' también consume el siguiente argumento como valor
                expecting_value = arg
                    .to_str()
                    .and_then(|s| s.strip_prefix("--"))
                    .map_or(false, |name| LONG_FLAGS.contains(&name));
                out.push(arg);
            }
        }
    }

    out
}
