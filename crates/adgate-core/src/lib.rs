//! AdGate Core — shared error type and clock abstraction.

pub mod clock;
pub mod error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
