pub mod logging;
pub mod report;

pub use report::emit_report;
