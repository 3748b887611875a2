pub mod queue;
pub mod status;
