/// Decodificador del transport encoding (base64 estándar con padding)
/// Nunca falla: entrada corrupta devuelve lo que se pudo recuperar

use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use tracing::debug;

/// Alfabeto estándar, padding canónico, pero tolera bits sobrantes en el último quantum
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decodificar un flag del agente a texto
pub fn decode(text: &str) -> String {
    // CR/LF se ignoran en cualquier posición
    let cleaned: String = text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();

    let bytes = match LENIENT.decode(&cleaned) {
        Ok(bytes) => bytes,
        Err(e) => {
            let prefix = recoverable_prefix(&cleaned);
            debug!(
                "⚠️ base64 inválido ({}), recuperando {} de {} caracteres",
                e,
                prefix,
                cleaned.len()
            );
            LENIENT.decode(&cleaned[..prefix]).unwrap_or_default()
        }
    };

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Longitud del prefijo formado por quanta completos antes del primer carácter inválido
fn recoverable_prefix(text: &str) -> usize {
    let bytes = text.as_bytes();
    let valid = bytes.iter().take_while(|b| is_alphabet(**b)).count();

    // Un quantum con padding correcto también cuenta aunque siga basura detrás
    let pad = match valid % 4 {
        2 => 2,
        3 => 1,
        _ => 0,
    };
    if pad > 0 && bytes[valid..].starts_with(&b"=="[..pad]) {
        valid + pad
    } else {
        valid - valid % 4
    }
}

fn is_alphabet(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
}
