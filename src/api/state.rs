//! Service state for the action layer.

use std::sync::Arc;

use crate::aggregation::AggregationEngine;
use crate::attendance::AttendanceEngine;
use crate::config::PolicyLoader;
use crate::payroll::PayrollEngine;
use crate::store::{AttendanceRepository, PayrollRepository, RosterRepository};
use crate::time::{Clock, SystemClock};

/// The engines, policy and clock shared by every request.
///
/// Wrap it in an `Arc` to share it between request tasks.
pub struct WorkforceService<S> {
    pub(super) attendance: AttendanceEngine<S>,
    pub(super) aggregation: AggregationEngine<S>,
    pub(super) payroll: PayrollEngine<S>,
    pub(super) policy: PolicyLoader,
    pub(super) clock: Arc<dyn Clock>,
}

impl<S> WorkforceService<S>
where
    S: RosterRepository + AttendanceRepository + PayrollRepository,
{
    /// Creates a service over `store` using the host clock.
    pub fn new(store: Arc<S>, policy: PolicyLoader) -> Self {
        Self {
            attendance: AttendanceEngine::new(Arc::clone(&store), policy.attendance().clone()),
            aggregation: AggregationEngine::new(
                Arc::clone(&store),
                policy.attendance().clone(),
                policy.roster().clone(),
            ),
            payroll: PayrollEngine::new(store, policy.payroll().clone(), policy.roster().clone()),
            policy,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used to default omitted times and dates.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The attendance engine.
    pub fn attendance(&self) -> &AttendanceEngine<S> {
        &self.attendance
    }

    /// The aggregation engine.
    pub fn aggregation(&self) -> &AggregationEngine<S> {
        &self.aggregation
    }

    /// The payroll engine.
    pub fn payroll(&self) -> &PayrollEngine<S> {
        &self.payroll
    }

    /// The loaded policy.
    pub fn policy(&self) -> &PolicyLoader {
        &self.policy
    }
}
