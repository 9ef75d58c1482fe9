// NRTM operations and the applier that validates them into a mirror store

pub mod applier;
pub mod log;
pub mod operation;

pub use applier::OperationApplier;
pub use log::{OperationLog, TracingLog};
pub use operation::NrtmOperation;
