pub mod clock;
pub mod persistence;
pub mod replay;

pub use clock::IntervalClock;
pub use persistence::*;
