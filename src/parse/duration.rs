//! Free-form duration string parsing

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Parse a free-form duration string into total seconds.
///
/// The input is scanned left to right for tokens of the form
/// `<digits><unit>` where the unit is one of the lowercase letters `h`,
/// `m` or `s`. Matching tokens accumulate (`"1h1h"` is two hours); every
/// other character, including whitespace, separators, uppercase letters
/// and digit runs with no unit attached, is silently skipped.
///
/// Parsing is total: there is no error case. A return value of `0` means
/// the input contained no usable duration (empty, garbage, or tokens that
/// sum to zero such as `"0h0m0s"`) and callers must treat it as invalid.
/// Arithmetic saturates, so arbitrarily long digit runs cannot overflow.
pub fn parse_duration(text: &str) -> u64 {
    let mut total: u64 = 0;
    let mut pending: Option<u64> = None;

    for ch in text.chars() {
        if let Some(digit) = ch.to_digit(10) {
            let value = pending.unwrap_or(0);
            pending = Some(value.saturating_mul(10).saturating_add(digit as u64));
        } else if let Some(value) = pending.take() {
            // A digit run ends here; it only counts if this is a unit letter.
            let seconds = match ch {
                'h' => value.saturating_mul(SECONDS_PER_HOUR),
                'm' => value.saturating_mul(SECONDS_PER_MINUTE),
                's' => value,
                _ => 0,
            };
            total = total.saturating_add(seconds);
        }
    }

    total
}
