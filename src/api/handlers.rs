//! Action dispatch.
//!
//! Turns an [`ActionRequest`] into one engine call and the engine's result
//! into an [`ActionResponse`] or [`ApiError`].

use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{PayPeriod, PayrollAdjustment};
use crate::payroll::{compute_deductions_and_net, compute_gross_pay};
use crate::store::{AttendanceRepository, PayrollRepository, RosterRepository};

use super::request::ActionRequest;
use super::response::{ActionResponse, ApiError};
use super::state::WorkforceService;

impl<S> WorkforceService<S>
where
    S: RosterRepository + AttendanceRepository + PayrollRepository,
{
    /// Handles one parsed request.
    pub async fn handle(&self, request: ActionRequest) -> Result<ActionResponse, ApiError> {
        // Generate correlation ID for request tracking
        let correlation_id = Uuid::new_v4();
        let action = request.name();
        info!(correlation_id = %correlation_id, action, "Processing action");

        let start_time = Instant::now();
        match self.dispatch(request).await {
            Ok(response) => {
                let duration = start_time.elapsed();
                info!(
                    correlation_id = %correlation_id,
                    action,
                    duration_us = duration.as_micros(),
                    "Action completed successfully"
                );
                Ok(response)
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    action,
                    kind = ?err.kind(),
                    error = %err,
                    "Action failed"
                );
                Err(err.into())
            }
        }
    }

    /// Parses a JSON request body, handles it and serializes the result.
    pub async fn handle_json(&self, body: &str) -> Result<serde_json::Value, ApiError> {
        let request: ActionRequest = serde_json::from_str(body).map_err(|err| {
            warn!(error = %err, "Rejected request body");
            ApiError::from_parse_error(&err)
        })?;

        let response = self.handle(request).await?;
        serde_json::to_value(&response)
            .map_err(|err| ApiError::new("SERIALIZATION_ERROR", err.to_string()))
    }

    async fn dispatch(&self, request: ActionRequest) -> EngineResult<ActionResponse> {
        let response = match request {
            ActionRequest::ClockIn { employee_id, at } => {
                let at = at.unwrap_or_else(|| self.clock.now());
                ActionResponse::ClockedIn(self.attendance.clock_in(&employee_id, at).await?)
            }
            ActionRequest::ClockOut { employee_id, at } => {
                let at = at.unwrap_or_else(|| self.clock.now());
                ActionResponse::ClockedOut(self.attendance.clock_out(&employee_id, at).await?)
            }
            ActionRequest::CurrentStatus { employee_id, date } => {
                let date = date.unwrap_or_else(|| self.clock.today());
                ActionResponse::Status(self.attendance.current_status(&employee_id, date).await?)
            }
            ActionRequest::History { employee_id, limit } => {
                ActionResponse::History(self.attendance.history(&employee_id, limit).await?)
            }
            ActionRequest::WeeklyStats { employee_id, today } => {
                let today = today.unwrap_or_else(|| self.clock.today());
                ActionResponse::WeeklyStats(
                    self.aggregation.weekly_stats(&employee_id, today).await?,
                )
            }
            ActionRequest::Overview { date, department } => {
                let date = date.unwrap_or_else(|| self.clock.today());
                ActionResponse::Overview(
                    self.aggregation
                        .overview(date, department.as_deref())
                        .await?,
                )
            }
            ActionRequest::EnsurePayroll {
                employee_id,
                date,
                overtime_hours,
            } => {
                let period = self.period(date);
                ActionResponse::Payroll(
                    self.payroll
                        .ensure_payroll(&employee_id, period, overtime_hours)
                        .await?,
                )
            }
            ActionRequest::AdjustPayroll {
                employee_id,
                period_start,
                overtime_hours,
                deductions,
            } => {
                let adjustment = PayrollAdjustment {
                    overtime_hours,
                    deductions,
                };
                ActionResponse::Payroll(
                    self.payroll
                        .adjust_payroll(&employee_id, period_start, adjustment)
                        .await?,
                )
            }
            ActionRequest::Paystub { employee_id, date } => {
                let period = self.period(date);
                ActionResponse::Paystub(self.payroll.generate_paystub(&employee_id, period).await?)
            }
            ActionRequest::PayrollOverview { date, department } => {
                let period = self.period(date);
                ActionResponse::PayrollOverview(
                    self.payroll
                        .payroll_overview(period, department.as_deref())
                        .await?,
                )
            }
            ActionRequest::RunPayroll { date } => {
                let period = self.period(date);
                ActionResponse::PayrollRun(self.payroll.run_payroll(period).await?)
            }
            ActionRequest::ComputeGrossPay {
                annual_salary,
                overtime_hours,
            } => ActionResponse::GrossPay(compute_gross_pay(
                annual_salary,
                overtime_hours,
                self.policy.payroll(),
                1,
            )?),
            ActionRequest::ComputeNetPay { gross_pay } => ActionResponse::NetPay(
                compute_deductions_and_net(gross_pay, self.policy.payroll(), 1)?,
            ),
        };

        Ok(response)
    }

    fn period(&self, date: Option<chrono::NaiveDate>) -> PayPeriod {
        PayPeriod::containing(date.unwrap_or_else(|| self.clock.today()))
    }
}
