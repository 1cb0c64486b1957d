pub mod format;
pub mod operation;

pub use format::OutputFormat;
pub use operation::{parse_order, OpCategory, OperationRequest};
