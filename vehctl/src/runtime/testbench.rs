use super::tracing::{PortTrace, Trace};
use super::Device;

use crate::model::{PortInputs, PortOutputs};

use std::io;

/// Holds the current pin levels for a [`Device`] and advances it a number of clock cycles at a time.
///
/// A new `Testbench` starts enabled, out of raw reset, with both input ports at zero.
///
/// # Examples
///
/// ```
/// use vehctl::runtime::Testbench;
/// use vehctl::*;
///
/// let mut tb = Testbench::new(Controller::new(Config::default()).unwrap());
///
/// tb.set_reset(true);
/// tb.clock_cycles(10);
/// tb.set_reset(false);
/// tb.clock_cycles(10);
///
/// tb.set_primary_in(0b0000_1100);
/// tb.set_secondary_in(0b0100_0001);
/// assert_eq!(tb.clock_cycles(10).secondary_out, 48);
/// assert_eq!(tb.cycle(), 30);
/// ```
pub struct Testbench<D: Device> {
    device: D,
    inputs: PortInputs,
    outputs: PortOutputs,
    cycle: u64,
}

impl<D: Device> Testbench<D> {
    pub fn new(device: D) -> Testbench<D> {
        Testbench {
            device,
            inputs: PortInputs {
                enable: true,
                ..PortInputs::default()
            },
            outputs: PortOutputs::default(),
            cycle: 0,
        }
    }

    pub fn set_enable(&mut self, enable: bool) {
        self.inputs.enable = enable;
    }

    /// Sets the raw reset level (active high).
    pub fn set_reset(&mut self, asserted: bool) {
        self.inputs.raw_reset_asserted = asserted;
    }

    pub fn set_primary_in(&mut self, value: u8) {
        self.inputs.primary_in = value;
    }

    pub fn set_secondary_in(&mut self, value: u8) {
        self.inputs.secondary_in = value;
    }

    pub fn set_inputs(&mut self, inputs: PortInputs) {
        self.inputs = inputs;
    }

    pub fn inputs(&self) -> &PortInputs {
        &self.inputs
    }

    /// Outputs observed after the most recent clock edge.
    pub fn outputs(&self) -> &PortOutputs {
        &self.outputs
    }

    /// Number of clock edges applied so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    /// Advances `cycles` clock edges with the current inputs held, returning the outputs after the last edge.
    pub fn clock_cycles(&mut self, cycles: u32) -> PortOutputs {
        for _ in 0..cycles {
            self.clock();
        }

        self.outputs
    }

    /// Like [`clock_cycles`](Testbench::clock_cycles), recording the ports to `trace` after every edge.
    pub fn clock_traced<T: Trace>(
        &mut self,
        cycles: u32,
        trace: &mut PortTrace<T>,
    ) -> io::Result<PortOutputs> {
        for _ in 0..cycles {
            self.clock();
            trace.record(self.cycle, &self.inputs, &self.outputs)?;
        }

        Ok(self.outputs)
    }

    fn clock(&mut self) {
        self.outputs = self.device.step(&self.inputs);
        self.cycle += 1;
    }
}
