//! Recurring-payment projection: cycle arithmetic, window alignment, and
//! enumeration of charge dates.

pub mod align;
pub mod cycle;
pub mod enumerator;
pub mod rollover;
pub mod window;

pub use align::{align, align_with_step};
pub use cycle::{resolve, BillingCycle, CycleStep, TimeUnit};
pub use enumerator::{
    for_each_in_range, payments_in_range, payments_in_window, PaymentDates, MAX_ITERATIONS,
};
pub use rollover::{next_payment_after, roll_forward, roll_forward_all, Rollover, ScheduledStatus};
pub use window::{days_after, DateWindow};
