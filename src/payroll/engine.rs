use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::{PayrollPolicy, RosterPolicy};
use crate::error::{EngineError, EngineResult, require_id};
use crate::models::{
    EmployeeProfile, PayPeriod, PayrollAdjustment, PayrollOverview, PayrollRecord, PayrollStatus,
    PayrollSummary, Paystub,
};
use crate::store::{PayrollFilter, PayrollRepository, RosterRepository, StoreError, composite_key};

use super::{apply_adjustment, build_payroll_record, build_paystub};

/// Creates, adjusts and processes payroll records.
///
/// One record exists per employee per pay period. Creation is
/// get-or-create: when two requests race, the store admits one insert and
/// the loser returns the winner's record.
#[derive(Debug)]
pub struct PayrollEngine<S> {
    store: Arc<S>,
    payroll: PayrollPolicy,
    roster: RosterPolicy,
}

impl<S> PayrollEngine<S>
where
    S: RosterRepository + PayrollRepository,
{
    /// Creates an engine over `store`.
    pub fn new(store: Arc<S>, payroll: PayrollPolicy, roster: RosterPolicy) -> Self {
        Self {
            store,
            payroll,
            roster,
        }
    }

    /// The policy the engine applies.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.payroll
    }

    /// Returns the employee's record for `period`, creating a pending one
    /// with `overtime_hours` if none exists. An existing record is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank employee id or negative overtime
    /// - `NotFound` if the employee is not on the roster
    pub async fn ensure_payroll(
        &self,
        employee_id: &str,
        period: PayPeriod,
        overtime_hours: Decimal,
    ) -> EngineResult<PayrollRecord> {
        require_id("employee_id", employee_id)?;
        if overtime_hours < Decimal::ZERO {
            return Err(EngineError::validation(
                "overtime_hours",
                "must not be negative",
            ));
        }

        if let Some(existing) = self.store.get_payroll(employee_id, period.start_date).await? {
            return Ok(existing);
        }

        let employee = self.employee(employee_id).await?;
        self.create_record(&employee, period, overtime_hours, PayrollStatus::Pending)
            .await
    }

    /// Builds the paystub for the employee's record in `period`.
    ///
    /// If no record exists yet, one is created with no overtime and status
    /// `Processed`. Repeated calls return the same figures.
    pub async fn generate_paystub(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Paystub> {
        require_id("employee_id", employee_id)?;

        let employee = self.employee(employee_id).await?;
        let record = match self.store.get_payroll(employee_id, period.start_date).await? {
            Some(existing) => existing,
            None => {
                self.create_record(&employee, period, Decimal::ZERO, PayrollStatus::Processed)
                    .await?
            }
        };

        Ok(build_paystub(
            &employee,
            &record,
            &self.payroll.itemized,
            &self.roster.placeholder_name,
        ))
    }

    /// Changes overtime hours or deductions of a pending record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record exists for the period
    /// - `PayrollAlreadyProcessed` if the record is processed, including
    ///   when it was processed while the adjustment was being computed
    /// - `PayrollModified` if another adjustment was stored first
    /// - `Validation` for an empty or negative adjustment
    pub async fn adjust_payroll(
        &self,
        employee_id: &str,
        period_start: NaiveDate,
        adjustment: PayrollAdjustment,
    ) -> EngineResult<PayrollRecord> {
        require_id("employee_id", employee_id)?;

        let period_start = PayPeriod::containing(period_start).start_date;
        let record = self
            .store
            .get_payroll(employee_id, period_start)
            .await?
            .ok_or_else(|| {
                EngineError::not_found("PayrollRecord", composite_key(employee_id, period_start))
            })?;

        if record.status == PayrollStatus::Processed {
            return Err(already_processed(employee_id, period_start));
        }

        let employee = self.employee(employee_id).await?;
        let adjusted = apply_adjustment(&record, &employee, &adjustment, &self.payroll)?;

        let updated = match self.store.update_payroll(&record, adjusted).await {
            Ok(updated) => updated,
            Err(StoreError::PreconditionFailed { .. }) => {
                return Err(self.adjustment_conflict(employee_id, period_start).await);
            }
            Err(other) => return Err(other.into()),
        };

        info!(
            employee_id = %employee_id,
            period_start = %period_start,
            gross_pay = %updated.gross_pay,
            net_pay = %updated.net_pay,
            "Payroll adjusted"
        );
        Ok(updated)
    }

    /// Reports every eligible employee's record for `period`, creating
    /// pending records for those that have none.
    pub async fn payroll_overview(
        &self,
        period: PayPeriod,
        department: Option<&str>,
    ) -> EngineResult<PayrollOverview> {
        let roster = self.store.list_employees().await?;

        let mut records = Vec::new();
        for employee in roster
            .iter()
            .filter(|e| e.is_eligible())
            .filter(|e| department.is_none_or(|dept| e.in_department(dept)))
        {
            let record = match self.store.get_payroll(&employee.id, period.start_date).await? {
                Some(existing) => existing,
                None => {
                    self.create_record(employee, period, Decimal::ZERO, PayrollStatus::Pending)
                        .await?
                }
            };
            records.push(record);
        }
        records.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

        let summary = summarize(&records);
        debug!(
            period_start = %period.start_date,
            department = ?department,
            employees = summary.employee_count,
            pending = summary.pending,
            "Payroll overview built"
        );

        Ok(PayrollOverview {
            pay_period: period,
            department: department.map(str::to_string),
            records,
            summary,
        })
    }

    /// Moves every pending record of `period` to `Processed` and returns
    /// the records that changed, with their figures as stored at that
    /// moment. Records processed concurrently by another run are skipped.
    pub async fn run_payroll(&self, period: PayPeriod) -> EngineResult<Vec<PayrollRecord>> {
        let pending = self
            .store
            .find_payroll(
                PayrollFilter::for_period(period.start_date).with_status(PayrollStatus::Pending),
            )
            .await?;

        let mut processed = Vec::with_capacity(pending.len());
        for record in pending {
            match self
                .store
                .mark_processed(&record.employee_id, record.pay_period_start)
                .await
            {
                Ok(updated) => processed.push(updated),
                Err(StoreError::PreconditionFailed { key, .. }) => {
                    debug!(key = %key, "Payroll already processed by another run");
                }
                Err(other) => return Err(other.into()),
            }
        }

        info!(
            period_start = %period.start_date,
            processed = processed.len(),
            "Payroll run complete"
        );
        Ok(processed)
    }

    /// Explains why a conditional write of an adjustment failed.
    async fn adjustment_conflict(&self, employee_id: &str, period_start: NaiveDate) -> EngineError {
        match self.store.get_payroll(employee_id, period_start).await {
            Ok(Some(current)) if current.status == PayrollStatus::Processed => {
                already_processed(employee_id, period_start)
            }
            Ok(_) => {
                warn!(
                    employee_id = %employee_id,
                    period_start = %period_start,
                    "Payroll changed during adjustment"
                );
                EngineError::PayrollModified {
                    employee_id: employee_id.to_string(),
                    period_start,
                }
            }
            Err(err) => err.into(),
        }
    }

    async fn employee(&self, employee_id: &str) -> EngineResult<EmployeeProfile> {
        self.store
            .get_employee(employee_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Employee", employee_id))
    }

    /// Inserts a new record, or returns the record that won a concurrent
    /// insert for the same key.
    async fn create_record(
        &self,
        employee: &EmployeeProfile,
        period: PayPeriod,
        overtime_hours: Decimal,
        status: PayrollStatus,
    ) -> EngineResult<PayrollRecord> {
        let (record, trail) =
            build_payroll_record(employee, period, overtime_hours, status, &self.payroll)?;

        match self.store.insert_payroll(record).await {
            Ok(created) => {
                info!(
                    employee_id = %created.employee_id,
                    period_start = %created.pay_period_start,
                    status = ?created.status,
                    gross_pay = %created.gross_pay,
                    net_pay = %created.net_pay,
                    steps = trail.len(),
                    "Payroll record created"
                );
                Ok(created)
            }
            Err(StoreError::Duplicate { .. }) => {
                warn!(
                    employee_id = %employee.id,
                    period_start = %period.start_date,
                    "Lost payroll insert race, re-reading"
                );
                self.store
                    .get_payroll(&employee.id, period.start_date)
                    .await?
                    .ok_or_else(|| EngineError::DuplicatePayrollPeriod {
                        employee_id: employee.id.clone(),
                        period_start: period.start_date,
                    })
            }
            Err(other) => Err(other.into()),
        }
    }
}

fn already_processed(employee_id: &str, period_start: NaiveDate) -> EngineError {
    EngineError::PayrollAlreadyProcessed {
        employee_id: employee_id.to_string(),
        period_start,
    }
}

fn summarize(records: &[PayrollRecord]) -> PayrollSummary {
    PayrollSummary {
        employee_count: records.len(),
        total_gross: records.iter().map(|r| r.gross_pay).sum(),
        total_deductions: records.iter().map(|r| r.deductions).sum(),
        total_net: records.iter().map(|r| r.net_pay).sum(),
        processed: records
            .iter()
            .filter(|r| r.status == PayrollStatus::Processed)
            .count(),
        pending: records
            .iter()
            .filter(|r| r.status == PayrollStatus::Pending)
            .count(),
    }
}
