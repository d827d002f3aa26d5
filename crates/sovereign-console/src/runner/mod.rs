//! Run panel: state, trigger flow, and the executor seam.

pub mod executor;
pub mod simulator;

pub use executor::*;
pub use simulator::*;
