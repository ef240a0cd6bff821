use regex::Regex;
use std::sync::LazyLock;

static NON_DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9.]").unwrap());

/// Reduce free text to a decimal with at most two fractional digits.
///
/// Everything except ASCII digits and `.` is dropped. When more than one dot
/// remains, only the first two dot-separated segments survive and the second
/// is cut to two characters.
///
/// ```
/// use web_widgets::normalize_decimal;
///
/// assert_eq!(normalize_decimal("CHF 1'234.567"), "1234.56");
/// assert_eq!(normalize_decimal("1.2.3"), "1.2");
/// ```
pub fn normalize_decimal(input: &str) -> String {
    let cleaned = NON_DECIMAL.replace_all(input, "");

    let mut parts = cleaned.split('.');
    let whole = parts.next().unwrap_or_default();
    match parts.next() {
        Some(fraction) => {
            let fraction: String = fraction.chars().take(2).collect();
            format!("{whole}.{fraction}")
        }
        None => whole.to_string(),
    }
}
