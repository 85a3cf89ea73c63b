//! Formatting utilities used for CLI and export outputs.

use crate::models::Score;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Whole currency units with thousands separators: `12,345`, `-1,080`.
pub fn money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    if amount < 0 { format!("-{out}") } else { out }
}

pub fn opt_money(amount: Option<i64>) -> String {
    amount.map(money).unwrap_or_else(|| "--".to_string())
}

pub fn opt_score(score: Option<Score>) -> String {
    score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Cut `s` to at most `max` chars, ending with `...` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0), "0");
        assert_eq!(money(999), "999");
        assert_eq!(money(1000), "1,000");
        assert_eq!(money(1234567), "1,234,567");
        assert_eq!(money(-1080), "-1,080");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdefgh", 6), "abc...");
    }

    #[test]
    fn missing_values_render_as_dashes() {
        assert_eq!(opt_money(None), "--");
        assert_eq!(opt_score(Score::new(88).ok()), "88");
    }
}
