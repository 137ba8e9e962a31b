// Tue Jan 13 2026 - Alex

/// Turns an arbitrary reflected name into a valid C/C++ identifier.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if out.is_empty() {
        out.push('_');
    } else if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("Health"), "Health");
        assert_eq!(sanitize_identifier("Max Speed"), "Max_Speed");
        assert_eq!(sanitize_identifier("3DWidget"), "_3DWidget");
        assert_eq!(sanitize_identifier("Pawn-Ref?"), "Pawn_Ref_");
        assert_eq!(sanitize_identifier(""), "_");
    }
}
