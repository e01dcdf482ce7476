//! Runtime support shared by the behavioral model and generated RTL simulators.

mod device;
mod testbench;
pub mod tracing;

pub use device::*;
pub use testbench::*;
