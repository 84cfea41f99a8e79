mod engine;
mod state;
mod status;
mod ticker;

pub use engine::CountdownController;
pub use state::CountdownState;
pub use status::{CountdownStatus, CountdownView, DurationBreakdown};
pub use ticker::CountdownTicker;
