//! Port tracing.
//!
//! [`Trace`] is the sink interface; [`vcd::VcdTrace`] writes [VCD](https://en.wikipedia.org/wiki/Value_change_dump) files.
//! [`PortTrace`] declares the controller's seven ports on a `Trace` and records them once per clock cycle.

pub mod vcd;

use crate::model::{PortInputs, PortOutputs};

use std::io;

#[derive(Debug, Eq, PartialEq)]
pub enum TraceValue {
    /// Contains a boolean value
    Bool(bool),
    /// Contains an unsigned, 32-bit value
    U32(u32),
}

#[derive(Debug, Eq, PartialEq)]
pub enum TraceValueType {
    Bool,
    U32,
}

impl TraceValueType {
    pub(crate) fn from_bit_width(bit_width: u32) -> TraceValueType {
        if bit_width == 1 {
            TraceValueType::Bool
        } else if bit_width <= 32 {
            TraceValueType::U32
        } else {
            unreachable!()
        }
    }
}

pub trait Trace {
    type SignalId;

    fn push_module(&mut self, name: &'static str) -> io::Result<()>;
    fn pop_module(&mut self) -> io::Result<()>;
    fn add_signal(
        &mut self,
        name: &'static str,
        bit_width: u32,
        type_: TraceValueType,
    ) -> io::Result<Self::SignalId>;

    fn update_time_stamp(&mut self, time_stamp: u64) -> io::Result<()>;
    fn update_signal(&mut self, signal_id: &Self::SignalId, value: TraceValue) -> io::Result<()>;
}

const PORTS: [(&str, u32); 7] = [
    ("ena", 1),
    ("rst_n", 1),
    ("ui_in", 8),
    ("uio_in", 8),
    ("uo_out", 8),
    ("uio_out", 8),
    ("uio_oe", 8),
];

/// Records the controller's ports, under their chip-level names, to a [`Trace`].
pub struct PortTrace<T: Trace> {
    trace: T,
    signal_ids: Vec<T::SignalId>,
}

impl<T: Trace> PortTrace<T> {
    /// Declares the ports inside a scope called `module_name`.
    pub fn new(mut trace: T, module_name: &'static str) -> io::Result<PortTrace<T>> {
        trace.push_module(module_name)?;
        let signal_ids = PORTS
            .iter()
            .map(|&(name, bit_width)| {
                trace.add_signal(name, bit_width, TraceValueType::from_bit_width(bit_width))
            })
            .collect::<io::Result<Vec<_>>>()?;
        trace.pop_module()?;

        Ok(PortTrace { trace, signal_ids })
    }

    /// Writes every port value at `time_stamp`.
    pub fn record(
        &mut self,
        time_stamp: u64,
        inputs: &PortInputs,
        outputs: &PortOutputs,
    ) -> io::Result<()> {
        self.trace.update_time_stamp(time_stamp)?;

        let values = [
            TraceValue::Bool(inputs.enable),
            TraceValue::Bool(!inputs.raw_reset_asserted),
            TraceValue::U32(inputs.primary_in.into()),
            TraceValue::U32(inputs.secondary_in.into()),
            TraceValue::U32(outputs.primary_out.into()),
            TraceValue::U32(outputs.secondary_out.into()),
            TraceValue::U32(outputs.secondary_out_enable.into()),
        ];
        for (signal_id, value) in self.signal_ids.iter().zip(values) {
            self.trace.update_signal(signal_id, value)?;
        }

        Ok(())
    }

    pub fn into_inner(self) -> T {
        self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Capture {
        scopes: Vec<&'static str>,
        signals: Vec<(&'static str, u32)>,
        time_stamp: u64,
        updates: Vec<(u64, usize, TraceValue)>,
    }

    impl Trace for Capture {
        type SignalId = usize;

        fn push_module(&mut self, name: &'static str) -> io::Result<()> {
            self.scopes.push(name);
            Ok(())
        }

        fn pop_module(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn add_signal(
            &mut self,
            name: &'static str,
            bit_width: u32,
            _type_: TraceValueType,
        ) -> io::Result<usize> {
            self.signals.push((name, bit_width));
            Ok(self.signals.len() - 1)
        }

        fn update_time_stamp(&mut self, time_stamp: u64) -> io::Result<()> {
            self.time_stamp = time_stamp;
            Ok(())
        }

        fn update_signal(&mut self, signal_id: &usize, value: TraceValue) -> io::Result<()> {
            self.updates.push((self.time_stamp, *signal_id, value));
            Ok(())
        }
    }

    #[test]
    fn records_all_ports() {
        let mut trace = PortTrace::new(Capture::default(), "tb").unwrap();
        trace
            .record(
                3,
                &PortInputs {
                    enable: true,
                    raw_reset_asserted: true,
                    primary_in: 0x08,
                    secondary_in: 0x41,
                },
                &PortOutputs {
                    primary_out: 0x01,
                    secondary_out: 0x30,
                    secondary_out_enable: 0xff,
                },
            )
            .unwrap();

        let capture = trace.into_inner();
        assert_eq!(capture.scopes, vec!["tb"]);
        assert_eq!(capture.signals.len(), 7);
        assert_eq!(capture.signals[1], ("rst_n", 1));
        assert_eq!(capture.updates.len(), 7);
        assert_eq!(capture.updates[1], (3, 1, TraceValue::Bool(false)));
        assert_eq!(capture.updates[5], (3, 5, TraceValue::U32(0x30)));
    }
}
