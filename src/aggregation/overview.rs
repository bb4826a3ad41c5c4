//! Organization-wide attendance snapshot for one day.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    AttendanceOverview, AttendanceRecord, DayState, EmployeeProfile, OverviewEntry,
    OverviewSummary,
};
use crate::time::one_decimal;

use super::display_name;

/// Builds the attendance overview for `date`.
///
/// Only eligible roster members are listed, optionally restricted to an
/// exact `department`. Records for other days are ignored. A record that
/// has a check-out is reported as completed regardless of its stored
/// status.
pub fn attendance_overview(
    date: NaiveDate,
    roster: &[EmployeeProfile],
    records: &[AttendanceRecord],
    department: Option<&str>,
    placeholder: &str,
) -> AttendanceOverview {
    let by_employee: HashMap<&str, &AttendanceRecord> = records
        .iter()
        .filter(|record| record.date == date)
        .map(|record| (record.employee_id.as_str(), record))
        .collect();

    let mut employees: Vec<OverviewEntry> = roster
        .iter()
        .filter(|profile| profile.is_eligible())
        .filter(|profile| department.is_none_or(|dept| profile.in_department(dept)))
        .map(|profile| {
            overview_entry(
                profile,
                by_employee.get(profile.id.as_str()).copied(),
                placeholder,
            )
        })
        .collect();

    employees.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });

    let summary = summarize(&employees);

    AttendanceOverview {
        date,
        department: department.map(str::to_string),
        employees,
        summary,
    }
}

fn overview_entry(
    profile: &EmployeeProfile,
    record: Option<&AttendanceRecord>,
    placeholder: &str,
) -> OverviewEntry {
    let mut entry = OverviewEntry {
        employee_id: profile.id.clone(),
        name: display_name(profile, placeholder),
        department: profile.department.clone(),
        role: profile.role,
        status: DayState::Absent,
        check_in_time: None,
        check_out_time: None,
        total_hours: None,
    };

    if let Some(record) = record {
        entry.check_in_time = Some(record.check_in_time);
        match record.check_out_time {
            Some(check_out) => {
                entry.status = DayState::Completed;
                entry.check_out_time = Some(check_out);
                entry.total_hours = record.total_hours;
            }
            None => entry.status = record.status.into(),
        }
    }

    entry
}

fn summarize(entries: &[OverviewEntry]) -> OverviewSummary {
    let total_employees = entries.len();
    let absent_today = entries
        .iter()
        .filter(|e| e.status == DayState::Absent)
        .count();
    let late_today = entries.iter().filter(|e| e.status == DayState::Late).count();

    let completed_hours: Vec<Decimal> = entries
        .iter()
        .filter(|e| e.status == DayState::Completed)
        .map(|e| e.total_hours.unwrap_or(Decimal::ZERO))
        .collect();

    let average = if completed_hours.is_empty() {
        Decimal::ZERO
    } else {
        completed_hours.iter().sum::<Decimal>() / Decimal::from(completed_hours.len())
    };

    OverviewSummary {
        total_employees,
        present_today: total_employees - absent_today,
        absent_today,
        late_today,
        average_hours: one_decimal(average).to_string(),
    }
}
