/// Fixed-point rendering with `,` thousands separators.
///
/// Non-finite values are rendered as-is (`NaN`, `inf`).
#[must_use]
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    if !value.is_finite() {
        return fixed;
    }
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    // "-0" after rounding a tiny negative reads as zero
    let nonzero = |s: &str| s.bytes().any(|b| b != b'0');
    if nonzero(int_part) || frac_part.is_some_and(nonzero) {
        out.push_str(sign);
    }
    let lead = int_part.len() % 3;
    for (i, ch) in int_part.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Percentage with a fixed number of decimals and a trailing `%`.
#[must_use]
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}
