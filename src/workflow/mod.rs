pub mod stage;

pub use stage::StageOutcome;
