//! [VCD](https://en.wikipedia.org/wiki/Value_change_dump) format tracing implementation.

extern crate vcd;

use super::*;

use std::io;

pub enum TimeScaleUnit {
    S,
    Ms,
    Us,
    Ns,
    Ps,
    Fs,
}

impl From<TimeScaleUnit> for vcd::TimescaleUnit {
    fn from(time_scale_unit: TimeScaleUnit) -> Self {
        match time_scale_unit {
            TimeScaleUnit::S => vcd::TimescaleUnit::S,
            TimeScaleUnit::Ms => vcd::TimescaleUnit::MS,
            TimeScaleUnit::Us => vcd::TimescaleUnit::US,
            TimeScaleUnit::Ns => vcd::TimescaleUnit::NS,
            TimeScaleUnit::Ps => vcd::TimescaleUnit::PS,
            TimeScaleUnit::Fs => vcd::TimescaleUnit::FS,
        }
    }
}

/// Writes traced values as VCD.
///
/// Definitions end once the outermost module scope is popped, so every signal must be added before that.
pub struct VcdTrace<W: io::Write> {
    module_hierarchy_depth: u32,

    signals: Vec<VcdTraceSignal>,

    w: vcd::Writer<W>,
}

impl<W: io::Write> VcdTrace<W> {
    pub fn new(w: W, time_scale: u32, time_scale_unit: TimeScaleUnit) -> io::Result<VcdTrace<W>> {
        let mut w = vcd::Writer::new(w);

        w.timescale(time_scale, time_scale_unit.into())?;

        Ok(VcdTrace {
            module_hierarchy_depth: 0,

            signals: Vec::new(),

            w,
        })
    }
}

impl<W: io::Write> Trace for VcdTrace<W> {
    type SignalId = usize;

    fn push_module(&mut self, name: &'static str) -> io::Result<()> {
        self.w.add_module(name)?;

        self.module_hierarchy_depth += 1;

        Ok(())
    }

    fn pop_module(&mut self) -> io::Result<()> {
        self.w.upscope()?;

        self.module_hierarchy_depth -= 1;

        if self.module_hierarchy_depth == 0 {
            self.w.enddefinitions()?;
        }

        Ok(())
    }

    fn add_signal(
        &mut self,
        name: &'static str,
        bit_width: u32,
        type_: TraceValueType,
    ) -> io::Result<Self::SignalId> {
        let ret = self.signals.len();

        self.signals.push(VcdTraceSignal {
            bit_width,
            type_,
            id: self.w.add_wire(bit_width, name)?,
        });

        Ok(ret)
    }

    fn update_time_stamp(&mut self, time_stamp: u64) -> io::Result<()> {
        self.w.timestamp(time_stamp)
    }

    fn update_signal(&mut self, signal_id: &Self::SignalId, value: TraceValue) -> io::Result<()> {
        let signal = &self.signals[*signal_id];

        match (&signal.type_, value) {
            (TraceValueType::Bool, TraceValue::Bool(value)) => {
                self.w.change_scalar(signal.id, value)?;
            }
            (TraceValueType::U32, TraceValue::U32(value)) => {
                let mut scalar_values = [vcd::Value::V0; 32];
                for (i, scalar_value) in scalar_values.iter_mut().enumerate() {
                    *scalar_value =
                        ((value >> (signal.bit_width as usize - 1 - i)) & 1 != 0).into();
                }
                self.w
                    .change_vector(signal.id, &scalar_values[0..signal.bit_width as usize])?;
            }
            (type_, value) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Cannot trace value {:?} on a {:?} signal.", value, type_),
                ));
            }
        }

        Ok(())
    }
}

struct VcdTraceSignal {
    bit_width: u32,
    type_: TraceValueType,
    id: vcd::IdCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{PortInputs, PortOutputs};

    #[test]
    fn port_trace_vcd() {
        let mut buf = Vec::new();
        {
            let trace = VcdTrace::new(&mut buf, 10, TimeScaleUnit::Ns).unwrap();
            let mut trace = PortTrace::new(trace, "vehctl").unwrap();
            trace
                .record(
                    1,
                    &PortInputs {
                        enable: true,
                        primary_in: 0x08,
                        ..Default::default()
                    },
                    &PortOutputs {
                        primary_out: 0x01,
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        let vcd = String::from_utf8(buf).unwrap();
        assert!(vcd.contains("$timescale"));
        assert!(vcd.contains("vehctl"));
        assert!(vcd.contains("ui_in"));
        assert!(vcd.contains("$enddefinitions $end"));
        assert!(vcd.contains("#1"));
        assert!(vcd.contains("b00001000"));
    }

    #[test]
    fn mismatched_value_type_error() {
        let mut trace = VcdTrace::new(Vec::new(), 1, TimeScaleUnit::Ns).unwrap();
        trace.push_module("m").unwrap();
        let id = trace.add_signal("s", 1, TraceValueType::Bool).unwrap();
        trace.pop_module().unwrap();

        assert!(trace.update_signal(&id, TraceValue::U32(3)).is_err());
    }
}
