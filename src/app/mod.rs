mod history;
mod play_queue;
pub mod state;

pub use history::History;
pub use play_queue::PlayQueue;
pub use state::*;
