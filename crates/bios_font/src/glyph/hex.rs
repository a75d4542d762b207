//! Free-form hex text to glyph bytes, and back.

/// Normalizes pasted hex into a space-separated list of 1-2 digit tokens.
///
/// `0x`/`0X` prefixes are removed, commas and line breaks count as
/// whitespace, and every token that is not 1-2 hex digits is dropped.
pub fn normalize(raw: &str) -> String {
    let clean = raw.replace([',', '\n', '\r'], " ").replace("0x", "").replace("0X", "");
    clean
        .split_whitespace()
        .filter(|token| token.len() <= 2 && token.chars().all(|c| c.is_ascii_hexdigit()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses free-form hex text straight into bytes.
pub fn parse_bytes(raw: &str) -> Vec<u8> {
    normalize(raw)
        .split_whitespace()
        // Tokens are at most two hex digits, so this cannot fail.
        .filter_map(|token| u8::from_str_radix(token, 16).ok())
        .collect()
}

/// Encodes bytes as `0xXX, 0xXX, ...`.
pub fn dump(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("0x{byte:02X}")).collect::<Vec<_>>().join(", ")
}
