//! Billing cycles and the calendar steps they resolve to.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{de::Deserializer, Deserialize, Serialize, Serializer};

/// Calendar unit a cycle step is measured in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        };
        f.write_str(label)
    }
}

/// One whole billing step: `multiplier` units of `unit`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleStep {
    pub multiplier: u32,
    pub unit: TimeUnit,
}

impl CycleStep {
    pub const fn new(multiplier: u32, unit: TimeUnit) -> Self {
        Self { multiplier, unit }
    }

    /// Date one step after `from`, or `None` when it leaves chrono's range.
    pub fn next(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.advance(from, 1)
    }

    /// Date one step before `from`.
    pub fn previous(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.advance(from, -1)
    }

    /// Moves `from` by `steps` whole steps (negative moves backward) in a single
    /// calendar operation, so month-end clamping is applied once.
    pub fn advance(&self, from: NaiveDate, steps: i64) -> Option<NaiveDate> {
        let units = steps.checked_mul(i64::from(self.multiplier))?;
        shift(from, self.unit, units)
    }

    /// Number of whole steps that fit between `earlier` and `later`.
    ///
    /// Never overestimates: advancing `earlier` by the result lands on or before
    /// `later`, and retreating `later` by it lands on or after `earlier`.
    /// Returns 0 when `later` precedes `earlier`.
    pub fn whole_steps_between(&self, earlier: NaiveDate, later: NaiveDate) -> i64 {
        if later <= earlier {
            return 0;
        }
        let units = match self.unit {
            TimeUnit::Day => (later - earlier).num_days(),
            TimeUnit::Week => (later - earlier).num_days() / 7,
            TimeUnit::Month => whole_months_between(earlier, later),
            TimeUnit::Year => whole_months_between(earlier, later) / 12,
        };
        units.max(0) / i64::from(self.multiplier.max(1))
    }

    pub fn label(&self) -> String {
        match (self.multiplier, self.unit) {
            (1, TimeUnit::Day) => "Daily".into(),
            (1, TimeUnit::Week) => "Weekly".into(),
            (1, TimeUnit::Month) => "Monthly".into(),
            (3, TimeUnit::Month) => "Quarterly".into(),
            (1, TimeUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {}{}", n, unit, if n > 1 { "s" } else { "" }),
        }
    }
}

/// Recurrence label attached to a subscription.
///
/// Parsing is total: anything unrecognised is treated as [`BillingCycle::Monthly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BillingCycle {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    pub const ALL: [BillingCycle; 5] = [
        BillingCycle::Daily,
        BillingCycle::Weekly,
        BillingCycle::Monthly,
        BillingCycle::Quarterly,
        BillingCycle::Yearly,
    ];

    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "daily" => BillingCycle::Daily,
            "weekly" => BillingCycle::Weekly,
            "monthly" => BillingCycle::Monthly,
            "quarterly" => BillingCycle::Quarterly,
            "yearly" => BillingCycle::Yearly,
            _ => BillingCycle::Monthly,
        }
    }

    /// True when `label` names one of the five known cycles.
    pub fn is_known(label: &str) -> bool {
        let normalized = label.trim().to_ascii_lowercase();
        Self::ALL.iter().any(|cycle| cycle.as_str() == normalized)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BillingCycle::Daily => "daily",
            BillingCycle::Weekly => "weekly",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Yearly => "yearly",
        }
    }

    pub fn step(self) -> CycleStep {
        match self {
            BillingCycle::Daily => CycleStep::new(1, TimeUnit::Day),
            BillingCycle::Weekly => CycleStep::new(1, TimeUnit::Week),
            BillingCycle::Monthly => CycleStep::new(1, TimeUnit::Month),
            BillingCycle::Quarterly => CycleStep::new(3, TimeUnit::Month),
            BillingCycle::Yearly => CycleStep::new(1, TimeUnit::Year),
        }
    }

    /// Divisor that turns a per-cycle amount into a monthly-average contribution.
    /// Cycles shorter than a month are left undivided.
    pub fn months_per_charge(self) -> f64 {
        match self {
            BillingCycle::Quarterly => 3.0,
            BillingCycle::Yearly => 12.0,
            _ => 1.0,
        }
    }
}

impl From<&str> for BillingCycle {
    fn from(label: &str) -> Self {
        BillingCycle::parse(label)
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for BillingCycle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BillingCycle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|label| BillingCycle::parse(&label))
            .unwrap_or_default())
    }
}

/// Resolves a cycle label to its step. Unknown labels resolve to one month.
pub fn resolve(cycle: &str) -> CycleStep {
    BillingCycle::parse(cycle).step()
}

fn shift(date: NaiveDate, unit: TimeUnit, amount: i64) -> Option<NaiveDate> {
    match unit {
        TimeUnit::Day => shift_days(date, amount),
        TimeUnit::Week => shift_days(date, amount.checked_mul(7)?),
        TimeUnit::Month => shift_months(date, amount),
        TimeUnit::Year => shift_months(date, amount.checked_mul(12)?),
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let delta = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    }
}

// chrono clamps the day to the last day of the target month.
fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let delta = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

fn whole_months_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    let earlier_idx = i64::from(earlier.year()) * 12 + i64::from(earlier.month0());
    let later_idx = i64::from(later.year()) * 12 + i64::from(later.month0());
    let mut months = later_idx - earlier_idx;
    if later.day() < earlier.day() {
        months -= 1;
    }
    months
}
