/// Decodes a number lexeme (already isolated by the tokenizer) to an
/// `f64`, or `None` if it doesn't conform to the grammar — the caller then
/// falls back to treating the lexeme as a quoteless string.
pub fn parse_number(token: &str, decimals: i32) -> Option<f64> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == "-." || trimmed == "+." {
        return None;
    }

    let mut s = trimmed;
    let mut sign = 1.0_f64;
    if let Some(rest) = s.strip_prefix('-') {
        sign = -1.0;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s.is_empty() {
        return None;
    }

    let (base, base_digits, rest) = detect_base(s);
    if rest.is_empty() {
        return None;
    }
    // An underscore immediately after the base prefix is accepted (`0b_100`);
    // everywhere else an underscore must sit strictly between two digits.
    let prefix_allows_leading_underscore = base != 10;

    let (mantissa_part, exponent_part) = split_exponent(rest, base_digits);
    if !valid_digit_run_group(mantissa_part, prefix_allows_leading_underscore) {
        return None;
    }
    if let Some(exp) = exponent_part {
        if !contains_any_digit(mantissa_part, base_digits) {
            return None;
        }
        if exp.is_empty() || !contains_any_digit(exp, base_digits) {
            return None;
        }
        if !valid_digit_run_group(exp, false) {
            return None;
        }
    }

    let mantissa_digits = strip_underscores(mantissa_part);
    let mantissa = parse_fractional(&mantissa_digits, base, base_digits, false)?;

    let (scaled, used_fractional_exponent) = match exponent_part {
        None => (mantissa, false),
        Some(exp_str) => {
            // The exponent's digits are read using the mantissa's own base
            // (so a hex exponent may contain a-f), but the scale it produces
            // is always a power of 10, never a power of the mantissa's base.
            let exponent_digits = strip_underscores(exp_str);
            let exponent = parse_fractional(&exponent_digits, base, base_digits, true)?;
            if exponent.fract() == 0.0 && exponent.is_finite() {
                (mantissa * 10f64.powi(exponent as i32), false)
            } else {
                let scale = (exponent * std::f64::consts::LN_10).exp();
                (mantissa * scale, true)
            }
        }
    };

    let mut out = sign * scaled;
    if used_fractional_exponent {
        let factor = 10f64.powi(decimals);
        out = (out * factor).round() / factor;
    }
    Some(out)
}

fn strip_underscores(s: &str) -> String {
    s.chars().filter(|&c| c != '_').collect()
}

/// Validates underscore placement across a (possibly dotted) digit run —
/// `"123"`, `"123.456"`, or a signed exponent run like `"+1_2"`. Each half
/// must not start with `_` (unless `allow_leading_underscore` permits it,
/// the "right after the base prefix" exception, which only ever applies to
/// the run's whole-number half) and must not end with `_`.
fn valid_digit_run_group(digits: &str, allow_leading_underscore: bool) -> bool {
    let unsigned = digits.strip_prefix('-').or_else(|| digits.strip_prefix('+')).unwrap_or(digits);
    match unsigned.split_once('.') {
        Some((whole, frac)) => {
            digit_run_edges_ok(whole, allow_leading_underscore) && digit_run_edges_ok(frac, false)
        }
        None => digit_run_edges_ok(unsigned, allow_leading_underscore),
    }
}

fn digit_run_edges_ok(run: &str, allow_leading_underscore: bool) -> bool {
    let chars: Vec<char> = run.chars().collect();
    match (chars.first(), chars.last()) {
        (None, _) => true,
        (Some('_'), _) if !allow_leading_underscore => false,
        (_, Some('_')) => false,
        _ => true,
    }
}

fn detect_base(s: &str) -> (u32, &'static str, &str) {
    if s.len() >= 2 && s.as_bytes()[0] == b'0' && matches!(s.as_bytes()[1], b'x' | b'X') {
        (16, "0123456789abcdef", &s[2..])
    } else if s.len() >= 2 && s.as_bytes()[0] == b'0' && matches!(s.as_bytes()[1], b'b' | b'B') {
        (2, "01", &s[2..])
    } else if s.len() >= 2 && s.as_bytes()[0] == b'0' && matches!(s.as_bytes()[1], b'o' | b'O') {
        (8, "01234567", &s[2..])
    } else {
        (10, "0123456789", s)
    }
}

/// Splits `digits` into mantissa/exponent at the first `e`/`E`. For hex
/// (whose digit alphabet already contains `e`), only a `e`/`E` that's
/// immediately followed by `+`/`-` counts as an exponent marker.
fn split_exponent<'a>(digits: &'a str, base_digits: &str) -> (&'a str, Option<&'a str>) {
    let hex_like = base_digits.contains('e');
    let chars: Vec<(usize, char)> = digits.char_indices().collect();
    for &(i, c) in &chars {
        if c != 'e' && c != 'E' {
            continue;
        }
        if hex_like {
            let next = digits[i + 1..].chars().next();
            if matches!(next, Some('+') | Some('-')) {
                return (&digits[..i], Some(&digits[i + 1..]));
            }
        } else {
            return (&digits[..i], Some(&digits[i + 1..]));
        }
    }
    (digits, None)
}

fn contains_any_digit(text: &str, base_digits: &str) -> bool {
    text.chars().any(|c| base_digits.contains(c.to_ascii_lowercase()))
}

fn parse_fractional(digits: &str, base: u32, base_digits: &str, allow_sign: bool) -> Option<f64> {
    let mut s = digits.trim();
    if s.is_empty() {
        return None;
    }
    let mut local_sign = 1.0_f64;
    if allow_sign {
        if let Some(rest) = s.strip_prefix('-') {
            local_sign = -1.0;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('+') {
            s = rest;
        }
        if s.is_empty() {
            return None;
        }
    }
    match s.split_once('.') {
        None => {
            let whole = parse_whole(s, base, base_digits, false)?;
            Some(whole * local_sign)
        }
        Some((whole_s, frac_s)) => {
            let whole = parse_whole(whole_s, base, base_digits, true)?;
            let frac = parse_whole_fraction(frac_s, base, base_digits)?;
            Some((whole + frac) * local_sign)
        }
    }
}

fn parse_whole(digits: &str, base: u32, base_digits: &str, allow_empty: bool) -> Option<f64> {
    let s = digits.trim();
    if s.is_empty() {
        return if allow_empty { Some(0.0) } else { None };
    }
    let mut value = 0.0_f64;
    for c in s.chars() {
        let lower = c.to_ascii_lowercase();
        if !base_digits.contains(lower) {
            return None;
        }
        let d = lower.to_digit(36)? as f64;
        value = value * base as f64 + d;
    }
    Some(value)
}

fn parse_whole_fraction(digits: &str, base: u32, base_digits: &str) -> Option<f64> {
    let s = digits.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    let mut value = 0.0_f64;
    let mut scale = 1.0_f64 / base as f64;
    for c in s.chars() {
        let lower = c.to_ascii_lowercase();
        if !base_digits.contains(lower) {
            return None;
        }
        let d = lower.to_digit(36)? as f64;
        value += d * scale;
        scale /= base as f64;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0.0)]
    #[case("100__000", 100000.0)]
    #[case("-0x5", -5.0)]
    #[case("0b_100", 4.0)]
    #[case("0x5e+3", 5000.0)]
    #[case("1.5", 1.5)]
    #[case("-1.5", -1.5)]
    fn parses_expected_integers_and_decimals(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse_number(input, 15).unwrap(), expected);
    }

    #[test]
    fn fractional_exponent_rounds_to_decimals() {
        let value = parse_number("1.2e3.4", 15).unwrap();
        assert_eq!(value.trunc(), 3014.0);
    }

    #[rstest]
    #[case(".")]
    #[case("-.")]
    #[case("0e")]
    #[case("")]
    #[case("e+2")]
    #[case("0x0e+")]
    // The underscore in the exponent immediately follows the sign, not a
    // digit, so this doesn't conform to the grammar's `digits` production.
    #[case("0b0e+_1")]
    #[case("1_.5")]
    #[case("1._5")]
    #[case("1.5_")]
    #[case("_100")]
    fn rejects_invalid_lexemes(#[case] input: &str) {
        assert_eq!(parse_number(input, 15), None);
    }

    #[test]
    fn hex_number_without_exponent_marker_keeps_trailing_e_as_digit() {
        assert_eq!(parse_number("0x5e3", 15).unwrap(), (0x5e3) as f64);
    }
}
