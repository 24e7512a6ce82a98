pub mod diagnostic;
pub mod employee;
pub mod hierarchy;
pub mod record;

pub use diagnostic::{ConsoleSink, Diagnostic, DiagnosticSink};
pub use employee::Employee;
pub use hierarchy::Hierarchy;
pub use record::{RawRecord, RecordOptions};
