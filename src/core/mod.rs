pub mod amount;
pub mod clock;
pub mod error;

pub use amount::Amount;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, Result};
