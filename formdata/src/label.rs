//! Human-readable labels derived from field names.

use regex::Regex;
use std::sync::LazyLock;

static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Z])").expect("valid regex"));

/// Label for a schema field: first letter capitalized and a space before
/// every later uppercase letter (`someFieldName` -> `Some Field Name`).
pub fn from_path(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str();
            format!("{}{}", first.to_uppercase(), UPPERCASE.replace_all(rest, " $1"))
        }
        None => String::new(),
    }
}

/// Label for a value-only field. A run of uppercase letters or digits starts
/// one word (`billingAddress2` -> `Billing Address 2`, `userID` -> `User ID`).
pub fn title_case(name: &str) -> String {
    let mut title = String::with_capacity(name.len() + 4);
    let mut in_run = false;

    for c in name.chars() {
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            if !in_run && !title.is_empty() {
                title.push(' ');
            }
            in_run = true;
        } else {
            in_run = false;
        }
        title.push(c);
    }

    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
