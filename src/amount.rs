//! Monetary amount normalization and sign policy.

/// Strip `$` symbols, `,` separators, and `-` signs from a raw amount string,
/// padding a bare leading decimal point with a zero.
///
/// No numeric validation happens here; malformed text passes through
/// unchanged and is left for the consuming software to reject on import.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '$' | ',' | '-'))
        .collect();
    if stripped.starts_with('.') {
        format!("0{stripped}")
    } else {
        stripped
    }
}

/// Sign policy for expense amounts: everything except a literal `0.00` is
/// written negative.
///
/// The comparison is against the exact string `0.00`, not a numeric zero;
/// `0.000` or ` 0.00` still pick up a minus sign.
pub fn expense(raw: &str) -> String {
    let amount = normalize(raw);
    if amount == "0.00" {
        amount
    } else {
        format!("-{amount}")
    }
}

/// Sign policy for income amounts: always unsigned.
pub fn income(raw: &str) -> String {
    normalize(raw)
}
