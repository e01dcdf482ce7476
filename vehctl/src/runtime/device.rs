use crate::model::{PortInputs, PortOutputs};

/// A clocked controller implementation.
///
/// Implemented by the behavioral [`Controller`](crate::Controller) and by wrappers around generated RTL simulators, so one stimulus can drive either fidelity.
pub trait Device {
    /// Applies `inputs`, advances one rising clock edge, and returns the outputs observed after the edge.
    fn step(&mut self, inputs: &PortInputs) -> PortOutputs;
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn step(&mut self, inputs: &PortInputs) -> PortOutputs {
        (**self).step(inputs)
    }
}
