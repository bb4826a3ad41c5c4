//! Integration tests for the workforce engine.
//!
//! Every scenario goes through the JSON action layer backed by the
//! in-memory store:
//! - Clock-in / clock-out lifecycle and conflicts
//! - Late detection across offsets
//! - Weekly statistics and the attendance overview
//! - Payroll records, paystubs, adjustments and runs
//! - Error codes for malformed and invalid requests

use std::sync::Arc;

use chrono::DateTime;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use workforce_engine::api::{ApiError, WorkforceService};
use workforce_engine::config::PolicyLoader;
use workforce_engine::models::{AccountKind, EmployeeProfile, Role};
use workforce_engine::store::MemoryStore;
use workforce_engine::time::FixedClock;

// =============================================================================
// Test Helpers
// =============================================================================

fn profile(
    id: &str,
    first: Option<&str>,
    last: Option<&str>,
    username: Option<&str>,
    department: &str,
    salary: &str,
) -> EmployeeProfile {
    EmployeeProfile {
        id: id.to_string(),
        first_name: first.map(str::to_string),
        last_name: last.map(str::to_string),
        username: username.map(str::to_string),
        email: Some(format!("{id}@example.com")),
        department: Some(department.to_string()),
        role: Role::Employee,
        annual_salary: Decimal::from_str(salary).unwrap(),
        account_kind: AccountKind::Employee,
    }
}

fn create_store() -> Arc<MemoryStore> {
    let mut service_account = profile("svc_bot", None, None, Some("bot"), "Engineering", "0");
    service_account.account_kind = AccountKind::System;

    Arc::new(MemoryStore::with_employees([
        profile("emp_001", Some("Jane"), Some("Doe"), None, "Engineering", "60000"),
        profile("emp_002", None, None, Some("bob_smith"), "Engineering", "48000"),
        profile("emp_003", Some("Carol"), None, None, "Sales", "72000"),
        service_account,
    ]))
}

fn create_service(now: &str) -> WorkforceService<MemoryStore> {
    let policy = PolicyLoader::load("./config/default").expect("Failed to load config");
    WorkforceService::new(create_store(), policy)
        .with_clock(FixedClock(DateTime::parse_from_rfc3339(now).unwrap()))
}

async fn call(service: &WorkforceService<MemoryStore>, body: Value) -> Result<Value, ApiError> {
    service.handle_json(&body.to_string()).await
}

async fn ok(service: &WorkforceService<MemoryStore>, body: Value) -> Value {
    match call(service, body.clone()).await {
        Ok(value) => value,
        Err(err) => panic!("Action {} failed: {:?}", body, err),
    }
}

async fn err(service: &WorkforceService<MemoryStore>, body: Value) -> ApiError {
    match call(service, body.clone()).await {
        Ok(value) => panic!("Action {} unexpectedly succeeded: {}", body, value),
        Err(err) => err,
    }
}

async fn clock_in(service: &WorkforceService<MemoryStore>, id: &str, at: &str) -> Value {
    ok(
        service,
        json!({"action": "clock_in", "employee_id": id, "at": at}),
    )
    .await
}

async fn clock_out(service: &WorkforceService<MemoryStore>, id: &str, at: &str) -> Value {
    ok(
        service,
        json!({"action": "clock_out", "employee_id": id, "at": at}),
    )
    .await
}

// =============================================================================
// Attendance lifecycle
// =============================================================================

#[tokio::test]
async fn test_full_day_lifecycle() {
    let service = create_service("2026-01-15T12:00:00+00:00");

    let status = ok(
        &service,
        json!({"action": "current_status", "employee_id": "emp_001"}),
    )
    .await;
    assert_eq!(status["state"], "absent");

    let record = clock_in(&service, "emp_001", "2026-01-15T08:55:00+00:00").await;
    assert_eq!(record["status"], "present");
    assert!(record["check_out_time"].is_null());

    let status = ok(
        &service,
        json!({"action": "current_status", "employee_id": "emp_001", "date": "2026-01-15"}),
    )
    .await;
    assert_eq!(status["state"], "recorded");
    assert_eq!(status["status"], "present");

    let outcome = clock_out(&service, "emp_001", "2026-01-15T17:25:00+00:00").await;
    assert_eq!(outcome["record"]["status"], "completed");
    // 8h 30m
    assert_eq!(
        Decimal::from_str(outcome["record"]["total_hours"].as_str().unwrap()).unwrap(),
        Decimal::from_str("8.5").unwrap()
    );
    assert_eq!(outcome["warnings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_late_detection_uses_local_time() {
    let service = create_service("2026-01-15T12:00:00+00:00");

    // 09:15 in +10:00 is 23:15 UTC the day before, still late locally
    let record = clock_in(&service, "emp_001", "2026-01-15T09:15:00+10:00").await;
    assert_eq!(record["status"], "late");
    assert_eq!(record["date"], "2026-01-15");

    // 08:59:59 local is on time
    let record = clock_in(&service, "emp_002", "2026-01-15T08:59:59-05:00").await;
    assert_eq!(record["status"], "present");
}

#[tokio::test]
async fn test_double_clock_in_and_out_conflict() {
    let service = create_service("2026-01-15T12:00:00+00:00");

    clock_in(&service, "emp_001", "2026-01-15T08:00:00+00:00").await;
    let error = err(
        &service,
        json!({"action": "clock_in", "employee_id": "emp_001", "at": "2026-01-15T08:05:00+00:00"}),
    )
    .await;
    assert_eq!(error.code, "ALREADY_CLOCKED_IN");

    clock_out(&service, "emp_001", "2026-01-15T16:00:00+00:00").await;
    let error = err(
        &service,
        json!({"action": "clock_out", "employee_id": "emp_001", "at": "2026-01-15T17:00:00+00:00"}),
    )
    .await;
    assert_eq!(error.code, "ALREADY_CLOCKED_OUT");
}

#[tokio::test]
async fn test_clock_out_without_clock_in() {
    let service = create_service("2026-01-15T12:00:00+00:00");
    let error = err(
        &service,
        json!({"action": "clock_out", "employee_id": "emp_001"}),
    )
    .await;
    assert_eq!(error.code, "NO_ACTIVE_CLOCK_IN");
}

#[tokio::test]
async fn test_clock_in_unknown_employee() {
    let service = create_service("2026-01-15T12:00:00+00:00");
    let error = err(
        &service,
        json!({"action": "clock_in", "employee_id": "emp_404"}),
    )
    .await;
    assert_eq!(error.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_non_positive_duration_is_flagged() {
    let service = create_service("2026-01-15T12:00:00+00:00");
    clock_in(&service, "emp_001", "2026-01-15T10:00:00+00:00").await;

    let outcome = clock_out(&service, "emp_001", "2026-01-15T10:00:00+00:00").await;
    assert_eq!(outcome["record"]["status"], "completed");
    assert_eq!(outcome["warnings"][0]["code"], "NON_POSITIVE_DURATION");
}

#[tokio::test]
async fn test_history_order_and_limit() {
    let service = create_service("2026-01-20T12:00:00+00:00");
    for day in 12..=16 {
        clock_in(&service, "emp_001", &format!("2026-01-{day}T08:30:00+00:00")).await;
    }

    let history = ok(
        &service,
        json!({"action": "history", "employee_id": "emp_001", "limit": 2}),
    )
    .await;
    let dates: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2026-01-16", "2026-01-15"]);

    let error = err(
        &service,
        json!({"action": "history", "employee_id": "emp_001", "limit": 0}),
    )
    .await;
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clock_in_single_record() {
    let service = Arc::new(create_service("2026-01-15T12:00:00+00:00"));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let at = format!("2026-01-15T08:{:02}:00+00:00", i);
                call(
                    &service,
                    json!({"action": "clock_in", "employee_id": "emp_002", "at": at}),
                )
                .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(error) => assert_eq!(error.code, "ALREADY_CLOCKED_IN"),
        }
    }
    assert_eq!(successes, 1);

    let history = ok(
        &service,
        json!({"action": "history", "employee_id": "emp_002"}),
    )
    .await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

// =============================================================================
// Aggregation
// =============================================================================

#[tokio::test]
async fn test_weekly_stats_with_overtime() {
    let service = create_service("2026-01-16T18:00:00+00:00");
    for day in 12..=16 {
        clock_in(&service, "emp_001", &format!("2026-01-{day}T08:00:00+00:00")).await;
        clock_out(&service, "emp_001", &format!("2026-01-{day}T17:15:00+00:00")).await;
    }

    let stats = ok(
        &service,
        json!({"action": "weekly_stats", "employee_id": "emp_001"}),
    )
    .await;
    // 5 x 9.25 = 46.25 -> 46.3
    assert_eq!(stats["total_hours"], "46.3");
    assert_eq!(stats["regular_hours"], "40.0");
    assert_eq!(stats["overtime_hours"], "6.3");
    assert_eq!(stats["days_present"], 5);
    assert_eq!(stats["days_late"], 0);
    assert_eq!(stats["window"]["start"], "2026-01-10");
}

#[tokio::test]
async fn test_overview_summary() {
    let service = create_service("2026-01-15T18:00:00+00:00");
    clock_in(&service, "emp_001", "2026-01-15T08:00:00+00:00").await;
    clock_out(&service, "emp_001", "2026-01-15T16:00:00+00:00").await;
    clock_in(&service, "emp_002", "2026-01-15T09:45:00+00:00").await;

    let overview = ok(&service, json!({"action": "overview"})).await;

    let summary = &overview["summary"];
    assert_eq!(summary["total_employees"], 3); // the system account is excluded
    assert_eq!(summary["present_today"], 2);
    assert_eq!(summary["absent_today"], 1);
    assert_eq!(summary["late_today"], 1);
    assert_eq!(summary["average_hours"], "8.0");

    let names: Vec<&str> = overview["employees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob Smith", "Carol", "Jane Doe"]);

    let carol = &overview["employees"][1];
    assert_eq!(carol["status"], "absent");
    assert!(carol["check_in_time"].is_null());
}

#[tokio::test]
async fn test_overview_department_filter() {
    let service = create_service("2026-01-15T18:00:00+00:00");
    let overview = ok(
        &service,
        json!({"action": "overview", "date": "2026-01-15", "department": "Sales"}),
    )
    .await;
    assert_eq!(overview["summary"]["total_employees"], 1);
    assert_eq!(overview["summary"]["average_hours"], "0.0");
}

// =============================================================================
// Payroll
// =============================================================================

#[tokio::test]
async fn test_compute_actions_match_reference_figures() {
    let service = create_service("2026-01-15T12:00:00+00:00");

    let base = ok(
        &service,
        json!({"action": "compute_gross_pay", "annual_salary": "60000", "overtime_hours": "0"}),
    )
    .await;
    assert_eq!(base["monthly_base"], "5000");
    assert_eq!(base["overtime_pay"], "0");
    assert_eq!(base["gross_pay"], "5000");

    let overtime = ok(
        &service,
        json!({"action": "compute_gross_pay", "annual_salary": 60000, "overtime_hours": 10}),
    )
    .await;
    assert_eq!(overtime["hourly_rate"], "31.25");
    assert_eq!(overtime["overtime_pay"], "469");
    assert_eq!(overtime["gross_pay"], "5469");

    let net = ok(
        &service,
        json!({"action": "compute_net_pay", "gross_pay": "5469"}),
    )
    .await;
    assert_eq!(net["deductions"], "1353");
    assert_eq!(net["net_pay"], "4116");
}

#[tokio::test]
async fn test_paystub_is_idempotent() {
    let service = create_service("2026-02-10T12:00:00+00:00");

    let first = ok(
        &service,
        json!({"action": "paystub", "employee_id": "emp_001"}),
    )
    .await;
    assert_eq!(first["status"], "processed");
    assert_eq!(first["employee_name"], "Jane Doe");
    assert_eq!(first["pay_period"]["start_date"], "2026-02-01");
    assert_eq!(first["pay_period"]["end_date"], "2026-02-28");
    assert_eq!(first["gross_pay"], "5000");
    assert_eq!(first["net_pay"], "3750");
    assert_eq!(first["deductions"]["total_deductions"], "1250");

    let second = ok(
        &service,
        json!({"action": "paystub", "employee_id": "emp_001", "date": "2026-02-27"}),
    )
    .await;
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_payroll_lifecycle() {
    let service = create_service("2026-01-31T12:00:00+00:00");

    let record = ok(
        &service,
        json!({"action": "ensure_payroll", "employee_id": "emp_001", "overtime_hours": "10"}),
    )
    .await;
    assert_eq!(record["status"], "pending");
    assert_eq!(record["gross_pay"], "5469");
    assert_eq!(record["net_pay"], "4116");

    let adjusted = ok(
        &service,
        json!({
            "action": "adjust_payroll",
            "employee_id": "emp_001",
            "period_start": "2026-01-01",
            "deductions": "1000"
        }),
    )
    .await;
    assert_eq!(adjusted["deductions"], "1000");
    assert_eq!(adjusted["net_pay"], "4469");

    let overview = ok(&service, json!({"action": "payroll_overview"})).await;
    assert_eq!(overview["summary"]["employee_count"], 3);
    assert_eq!(overview["summary"]["pending"], 3);

    let run = ok(&service, json!({"action": "run_payroll"})).await;
    assert_eq!(run.as_array().unwrap().len(), 3);

    let rerun = ok(&service, json!({"action": "run_payroll"})).await;
    assert!(rerun.as_array().unwrap().is_empty());

    let error = err(
        &service,
        json!({
            "action": "adjust_payroll",
            "employee_id": "emp_001",
            "period_start": "2026-01-01",
            "overtime_hours": "2"
        }),
    )
    .await;
    assert_eq!(error.code, "PAYROLL_ALREADY_PROCESSED");

    let overview = ok(&service, json!({"action": "payroll_overview"})).await;
    assert_eq!(overview["summary"]["processed"], 3);
    assert_eq!(overview["summary"]["pending"], 0);
}

#[tokio::test]
async fn test_adjust_missing_payroll() {
    let service = create_service("2026-01-31T12:00:00+00:00");
    let error = err(
        &service,
        json!({
            "action": "adjust_payroll",
            "employee_id": "emp_003",
            "period_start": "2026-01-01",
            "overtime_hours": "2"
        }),
    )
    .await;
    assert_eq!(error.code, "NOT_FOUND");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json() {
    let service = create_service("2026-01-15T12:00:00+00:00");
    let error = service.handle_json("{not json").await.unwrap_err();
    assert_eq!(error.code, "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_action() {
    let service = create_service("2026-01-15T12:00:00+00:00");
    let error = err(&service, json!({"action": "reset_everything"})).await;
    assert_eq!(error.code, "UNKNOWN_ACTION");
}

#[tokio::test]
async fn test_missing_required_field() {
    let service = create_service("2026-01-15T12:00:00+00:00");
    let error = err(&service, json!({"action": "compute_net_pay"})).await;
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert!(error.message.contains("gross_pay"));
}

#[tokio::test]
async fn test_blank_employee_id() {
    let service = create_service("2026-01-15T12:00:00+00:00");
    let error = err(
        &service,
        json!({"action": "clock_in", "employee_id": "  "}),
    )
    .await;
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_store_outage_is_upstream_failure() {
    let store = create_store();
    let service = WorkforceService::new(Arc::clone(&store), PolicyLoader::default())
        .with_clock(FixedClock(
            DateTime::parse_from_rfc3339("2026-01-15T12:00:00+00:00").unwrap(),
        ));
    store.set_unavailable(true);

    let error = service
        .handle_json(&json!({"action": "overview"}).to_string())
        .await
        .unwrap_err();
    assert_eq!(error.code, "UPSTREAM_FAILURE");
}
