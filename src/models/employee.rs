//! Employee profile model and related types.
//!
//! Profiles are owned by the external roster; the engines only read them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The organizational role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular staff member.
    Employee,
    /// Line manager.
    Manager,
    /// Human-resources manager.
    HrManager,
    /// Human-resources administrator.
    HrAdmin,
    /// System administrator.
    Admin,
}

/// Whether an account represents a real employee.
///
/// Only [`AccountKind::Employee`] accounts take part in attendance
/// overviews and bulk payroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// A person on the payroll.
    #[default]
    Employee,
    /// A service or integration account.
    System,
    /// A test or demo account.
    Test,
}

/// Identity and compensation facts for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department: Option<String>,
    /// Organizational role.
    pub role: Role,
    /// Annual base salary.
    pub annual_salary: Decimal,
    /// Whether the account is a real employee.
    #[serde(default)]
    pub account_kind: AccountKind,
}

impl EmployeeProfile {
    /// Returns the first and last name joined by a space, or `None` when
    /// both are blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use workforce_engine::models::{AccountKind, EmployeeProfile, Role};
    ///
    /// let profile = EmployeeProfile {
    ///     id: "emp_001".to_string(),
    ///     first_name: Some("Ada".to_string()),
    ///     last_name: Some(" Lovelace ".to_string()),
    ///     username: None,
    ///     email: None,
    ///     department: None,
    ///     role: Role::Employee,
    ///     annual_salary: Decimal::from(60000),
    ///     account_kind: AccountKind::Employee,
    /// };
    /// assert_eq!(profile.full_name().as_deref(), Some("Ada Lovelace"));
    /// ```
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Returns true if the account counts towards overviews and payroll.
    pub fn is_eligible(&self) -> bool {
        self.account_kind == AccountKind::Employee
    }

    /// Returns true if the employee belongs to `department`.
    pub fn in_department(&self, department: &str) -> bool {
        self.department.as_deref() == Some(department)
    }
}
