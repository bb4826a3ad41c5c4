//! Display-name resolution.

use crate::models::EmployeeProfile;

/// Resolves the name shown for an employee in reports and paystubs.
///
/// The first usable source wins:
///
/// 1. first and last name
/// 2. the username, title-cased
/// 3. the local part of the email address, title-cased
/// 4. `placeholder`
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use workforce_engine::aggregation::display_name;
/// use workforce_engine::models::{AccountKind, EmployeeProfile, Role};
///
/// let profile = EmployeeProfile {
///     id: "emp_001".to_string(),
///     first_name: None,
///     last_name: None,
///     username: None,
///     email: Some("jane.doe@example.com".to_string()),
///     department: None,
///     role: Role::Employee,
///     annual_salary: Decimal::from(60000),
///     account_kind: AccountKind::Employee,
/// };
/// assert_eq!(display_name(&profile, "Unknown Employee"), "Jane Doe");
/// ```
pub fn display_name(profile: &EmployeeProfile, placeholder: &str) -> String {
    if let Some(full_name) = profile.full_name() {
        return full_name;
    }

    let username = profile.username.as_deref().and_then(title_case);
    let email_local = profile
        .email
        .as_deref()
        .map(|email| email.split('@').next().unwrap_or(email))
        .and_then(title_case);

    username
        .or(email_local)
        .unwrap_or_else(|| placeholder.to_string())
}

/// Splits on separators and upper-cases the first letter of each word.
/// Returns `None` if nothing is left.
fn title_case(raw: &str) -> Option<String> {
    let words: Vec<String> = raw
        .split(|c: char| c == '.' || c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
