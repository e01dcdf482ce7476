use vehctl::runtime::Device;
use vehctl::{PortInputs, PortOutputs};

/// A cycle on which two devices produced different outputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mismatch {
    /// 1-based index of the clock edge.
    pub cycle: u64,
    pub inputs: PortInputs,
    pub reference: PortOutputs,
    pub candidate: PortOutputs,
}

/// Drives a reference and a candidate device with identical inputs and records every cycle where their outputs differ.
///
/// Acts as a [`Device`] itself, reporting the reference's outputs.
pub struct Lockstep<R: Device, C: Device> {
    reference: R,
    candidate: C,
    cycle: u64,
    mismatches: Vec<Mismatch>,
}

impl<R: Device, C: Device> Lockstep<R, C> {
    pub fn new(reference: R, candidate: C) -> Lockstep<R, C> {
        Lockstep {
            reference,
            candidate,
            cycle: 0,
            mismatches: Vec::new(),
        }
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn reference(&self) -> &R {
        &self.reference
    }

    pub fn candidate(&self) -> &C {
        &self.candidate
    }
}

impl<R: Device, C: Device> Device for Lockstep<R, C> {
    fn step(&mut self, inputs: &PortInputs) -> PortOutputs {
        self.cycle += 1;

        let reference = self.reference.step(inputs);
        let candidate = self.candidate.step(inputs);
        if reference != candidate {
            clilog::warn!(
                "Fidelity mismatch on cycle {}: inputs {:?}, reference {:?}, candidate {:?}",
                self.cycle,
                inputs,
                reference,
                candidate
            );
            self.mismatches.push(Mismatch {
                cycle: self.cycle,
                inputs: *inputs,
                reference,
                candidate,
            });
        }

        reference
    }
}

/// Logs every cycle's port values at debug level when enabled.
pub struct Logged<D: Device> {
    device: D,
    enabled: bool,
    cycle: u64,
}

impl<D: Device> Logged<D> {
    pub fn new(device: D, enabled: bool) -> Logged<D> {
        Logged {
            device,
            enabled,
            cycle: 0,
        }
    }

    pub fn into_inner(self) -> D {
        self.device
    }
}

impl<D: Device> Device for Logged<D> {
    fn step(&mut self, inputs: &PortInputs) -> PortOutputs {
        self.cycle += 1;

        let outputs = self.device.step(inputs);
        if self.enabled {
            clilog::debug!(
                "cycle {}: ena={} rst_n={} ui_in={:#04x} uio_in={:#04x} -> uo_out={:#04x} uio_out={:#04x} uio_oe={:#04x}",
                self.cycle,
                inputs.enable as u8,
                !inputs.raw_reset_asserted as u8,
                inputs.primary_in,
                inputs.secondary_in,
                outputs.primary_out,
                outputs.secondary_out,
                outputs.secondary_out_enable
            );
        }

        outputs
    }
}
