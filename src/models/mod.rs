pub mod preference;
pub mod result;

pub use preference::{
    PreferenceState, CUSTOM_THREADS_FLAG_OFFSET, MIN_PREFERENCES_LEN, THREAD_COUNT_OFFSET,
};
pub use result::{format_percent, BenchmarkReport, ResultSet, RunResult};
