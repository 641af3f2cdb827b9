//! Command diagnostics: the leveled log sink query handlers report outcomes to.

pub mod recording;
pub mod sink;

pub use recording::{LoggedCommand, RecordingSink};
pub use sink::{log_command, CommandEvent, DiagnosticSink, StoreLogLevel, TracingSink};
