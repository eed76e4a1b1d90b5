/// Normalizes a phone number into the canonical `+<country_code>` form
/// used for matching against historical data.
///
/// Formatting characters (whitespace, hyphens, parentheses) are removed
/// and leading zeros stripped before the country-code rules apply. Inputs
/// that match none of the known shapes still get the country code
/// prefixed, so a malformed value normalizes to a malformed result rather
/// than an error. Empty input normalizes to `None`.
pub fn normalize_phone(raw: &str, country_code: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '(' | ')'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let stripped = cleaned.trim_start_matches('0');
    if stripped.starts_with(country_code) {
        return Some(format!("+{stripped}"));
    }

    let prefix = format!("+{country_code}");
    if stripped.starts_with(&prefix) {
        return Some(stripped.to_string());
    }

    // Covers bare local numbers (9 digits once the trunk zero is gone)
    // and everything else the branches above did not recognize.
    Some(format!("{prefix}{stripped}"))
}

/// Last nine digits of the input, non-digits removed. This is the suffix
/// legacy rows are matched on when their stored formatting differs from
/// the query.
pub fn phone_match_suffix(raw: &str) -> String {
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(9);
    digits[start..].to_string()
}

/// The set of spellings a single logical number may have been stored
/// under: the raw input itself, its canonical form, and the local
/// (`0…`), bare, and `<country_code>…` renderings of its digit suffix.
/// Duplicates and empty strings are dropped; order carries no meaning.
pub fn phone_variants(raw: &str, country_code: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let last9 = phone_match_suffix(raw);
    let candidates = [
        Some(raw.to_string()),
        normalize_phone(raw, country_code),
        Some(format!("0{last9}")),
        Some(last9.clone()),
        Some(format!("{country_code}{last9}")),
    ];

    let mut variants: Vec<String> = Vec::new();
    for candidate in candidates.into_iter().flatten() {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}
