//! Masking rules for column-level security.
//!
//! Rules are a closed enum rather than string dispatch, but the stored
//! string forms (`"email"`, `"phone"`, `"ssn"`, `"partial"`) are
//! preserved exactly for compatibility with existing policy records;
//! anything else deserializes to [`MaskingRule::Other`] and masks fully.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder returned when a value is masked without a usable rule.
pub const MASKED: &str = "[MASKED]";

/// How a masked column value is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskingRule {
    /// `john@example.com` → `j***@e***`.
    Email,
    /// Reveal only the last four characters.
    Phone,
    /// `123-45-6789` → `***-**-6789`.
    Ssn,
    /// Reveal the first and last two characters when longer than four.
    Partial,
    /// Any custom or unrecognized rule: full `[MASKED]` replacement.
    #[serde(other)]
    Other,
}

impl MaskingRule {
    /// The stored string form of this rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Ssn => "ssn",
            Self::Partial => "partial",
            Self::Other => "other",
        }
    }

    /// Apply this rule to a column value.
    ///
    /// Non-string values are masked over their JSON rendering; the
    /// result is always a string value.
    pub fn apply(&self, value: &Value) -> Value {
        let s = render(value);
        let masked = match self {
            Self::Email => mask_email(&s),
            Self::Phone => mask_tail(&s, 4),
            Self::Ssn => mask_ssn(&s),
            Self::Partial => mask_partial(&s),
            Self::Other => MASKED.to_string(),
        };
        Value::String(masked)
    }
}

/// Apply an optional rule; a missing rule masks fully.
pub fn apply_rule(value: &Value, rule: Option<&MaskingRule>) -> Value {
    match rule {
        Some(rule) => rule.apply(value),
        None => Value::String(MASKED.to_string()),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Show only the first `show` characters, then `***`. Values no longer
/// than `show` are fully masked.
pub fn mask_string(s: &str, show: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= show {
        return "***".to_string();
    }
    let head: String = chars[..show].iter().collect();
    format!("{head}***")
}

fn mask_email(s: &str) -> String {
    match s.split_once('@') {
        Some((local, domain)) => format!("{}@{}", mask_string(local, 1), mask_string(domain, 1)),
        None => mask_string(s, 3),
    }
}

/// Mask everything but the last `keep` characters.
fn mask_tail(s: &str, keep: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= keep {
        return "***".to_string();
    }
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("***{tail}")
}

fn mask_ssn(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() < 4 {
        return "***-**-***".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***-**-{tail}")
}

fn mask_partial(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > 4 {
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{head}***{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mask_string_shows_leading_chars() {
        assert_eq!(mask_string("hello", 2), "he***");
        assert_eq!(mask_string("hi", 3), "***");
        assert_eq!(mask_string("", 0), "***");
    }

    #[test]
    fn email_rule() {
        assert_eq!(
            MaskingRule::Email.apply(&json!("john@example.com")),
            json!("j***@e***")
        );
        // No '@': mask the whole string showing three leading characters.
        assert_eq!(MaskingRule::Email.apply(&json!("notanemail")), json!("not***"));
    }

    #[test]
    fn email_rule_short_parts() {
        assert_eq!(MaskingRule::Email.apply(&json!("a@b")), json!("***@***"));
    }

    #[test]
    fn phone_rule_reveals_last_four() {
        assert_eq!(
            MaskingRule::Phone.apply(&json!("(123) 456-7890")),
            json!("***7890")
        );
        assert_eq!(MaskingRule::Phone.apply(&json!("7890")), json!("***"));
    }

    #[test]
    fn ssn_rule() {
        assert_eq!(
            MaskingRule::Ssn.apply(&json!("123-45-6789")),
            json!("***-**-6789")
        );
        assert_eq!(MaskingRule::Ssn.apply(&json!("78")), json!("***-**-***"));
    }

    #[test]
    fn partial_rule() {
        assert_eq!(
            MaskingRule::Partial.apply(&json!("confidential")),
            json!("co***al")
        );
        assert_eq!(MaskingRule::Partial.apply(&json!("abcd")), json!("***"));
    }

    #[test]
    fn missing_or_unknown_rule_masks_fully() {
        assert_eq!(apply_rule(&json!("secret"), None), json!("[MASKED]"));
        assert_eq!(MaskingRule::Other.apply(&json!("secret")), json!("[MASKED]"));
    }

    #[test]
    fn non_string_values_are_rendered_first() {
        assert_eq!(MaskingRule::Partial.apply(&json!(1234567)), json!("12***67"));
    }

    #[test]
    fn stored_rule_strings_are_preserved() {
        for (rule, s) in [
            (MaskingRule::Email, "\"email\""),
            (MaskingRule::Phone, "\"phone\""),
            (MaskingRule::Ssn, "\"ssn\""),
            (MaskingRule::Partial, "\"partial\""),
        ] {
            assert_eq!(serde_json::to_string(&rule).unwrap(), s);
            assert_eq!(serde_json::from_str::<MaskingRule>(s).unwrap(), rule);
        }
        // Custom rule names stored by older policies fall through.
        assert_eq!(
            serde_json::from_str::<MaskingRule>("\"credit_card\"").unwrap(),
            MaskingRule::Other
        );
    }
}
