//! Recurring charges tracked by the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::schedule::{BillingCycle, CycleStep};

/// A recurring financial obligation, as supplied by the external store.
///
/// `amount` is charged once per cycle; it is never pre-divided.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub cycle: BillingCycle,
    #[serde(default)]
    pub next_payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub include_historical_payments: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        cycle: BillingCycle,
        next_payment_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            cycle,
            next_payment_date: Some(next_payment_date),
            start_date: None,
            end_date: None,
            include_historical_payments: false,
            category_id: None,
        }
    }

    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn including_history(mut self) -> Self {
        self.include_historical_payments = true;
        self
    }

    pub fn step(&self) -> CycleStep {
        self.cycle.step()
    }

    /// Reference date projections are computed from.
    ///
    /// The activation date when historical payments are included and one is set,
    /// otherwise the stored next payment date.
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        match (self.include_historical_payments, self.start_date) {
            (true, Some(start)) => Some(start),
            _ => self.next_payment_date,
        }
    }

    /// Steady-state monthly cost of this subscription.
    pub fn monthly_amount(&self) -> f64 {
        self.amount / self.cycle.months_per_charge()
    }

    /// True once the termination date lies strictly before `today`.
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < today)
    }
}

impl Identifiable for Subscription {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Subscription {
    fn name(&self) -> &str {
        &self.name
    }
}

impl BelongsToCategory for Subscription {
    fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }
}

impl Amounted for Subscription {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Subscription {
    fn display_label(&self) -> String {
        format!("{} ({:.2} {})", self.name, self.amount, self.cycle)
    }
}
