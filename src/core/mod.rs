pub mod read_state;
pub mod services;
pub mod time;

pub use read_state::ReadState;
pub use time::{Clock, FixedClock, SystemClock};
