mod initialize_leaderboard;
mod set_display_name;
mod submit_score;

pub use initialize_leaderboard::*;
pub use set_display_name::*;
pub use submit_score::*;
