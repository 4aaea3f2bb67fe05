pub mod clock;
pub mod js_executor;

pub use clock::{Clock, FixedClock, SystemClock};
pub use js_executor::JsExecutor;
