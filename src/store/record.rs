//! Boundary adapter from raw store records to engine subscriptions.
//!
//! The backend names fields `price` and `billingCycle`, the frontend `amount` and
//! `cycle`; both spellings are accepted here so the engine only ever sees
//! [`Subscription`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Subscription;
use crate::errors::SubcycleError;
use crate::schedule::BillingCycle;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A subscription row as exported by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(alias = "price")]
    pub amount: f64,
    #[serde(default, alias = "billingCycle")]
    pub cycle: Option<String>,
    #[serde(default)]
    pub next_payment_date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub include_historical_payments: Option<bool>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl SubscriptionRecord {
    /// Normalizes the record.
    ///
    /// Negative or non-finite amounts are rejected. Unparseable dates are dropped
    /// with a warning, which leaves the subscription with nothing to project
    /// rather than failing the whole snapshot.
    pub fn into_subscription(self) -> Result<Subscription, SubcycleError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(SubcycleError::InvalidInput(format!(
                "subscription `{}` has invalid amount {}",
                self.name, self.amount
            )));
        }

        let cycle = match self.cycle.as_deref() {
            Some(label) => {
                if !BillingCycle::is_known(label) {
                    tracing::warn!(subscription = %self.name, label, "unknown cycle, using monthly");
                }
                BillingCycle::parse(label)
            }
            None => BillingCycle::default(),
        };

        Ok(Subscription {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            next_payment_date: parse_date(&self.name, "nextPaymentDate", self.next_payment_date),
            start_date: parse_date(&self.name, "startDate", self.start_date),
            end_date: parse_date(&self.name, "endDate", self.end_date),
            include_historical_payments: self.include_historical_payments.unwrap_or(false),
            category_id: self.category_id,
            amount: self.amount,
            cycle,
            name: self.name,
        })
    }
}

impl From<&Subscription> for SubscriptionRecord {
    fn from(sub: &Subscription) -> Self {
        let format = |date: Option<NaiveDate>| date.map(|d| d.format(DATE_FORMAT).to_string());
        Self {
            id: Some(sub.id),
            name: sub.name.clone(),
            amount: sub.amount,
            cycle: Some(sub.cycle.as_str().to_string()),
            next_payment_date: format(sub.next_payment_date),
            start_date: format(sub.start_date),
            end_date: format(sub.end_date),
            include_historical_payments: Some(sub.include_historical_payments),
            category_id: sub.category_id,
        }
    }
}

fn parse_date(owner: &str, field: &str, raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Timestamps such as `2025-01-15T00:00:00` keep only their calendar day.
    let day = trimmed.get(..10).unwrap_or(trimmed);
    match NaiveDate::parse_from_str(day, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(subscription = owner, field, value = trimmed, %err, "ignoring invalid date");
            None
        }
    }
}
