pub mod config_patcher;
pub mod score_extractor;
pub mod statistics;

pub use config_patcher::{apply_thread_count, load_preferences, restore, MAX_THREAD_COUNT};
pub use score_extractor::extract_score;
pub use statistics::{aggregate, summarize_group, Summary};
