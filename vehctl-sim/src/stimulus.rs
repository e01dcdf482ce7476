//! JSON stimulus scripts.
//!
//! A script is a list of steps. Each step optionally changes some input ports, clocks the device a number of cycles, then checks the outputs observed after the last cycle:
//!
//! ```json
//! {
//!   "name": "motor",
//!   "steps": [
//!     { "label": "reset", "ena": 1, "rst_n": 0, "ui_in": 0, "uio_in": 0, "cycles": 10 },
//!     { "rst_n": 1, "cycles": 10 },
//!     { "ui_in": "0b0000_1100", "uio_in": "0100_0001", "cycles": 10,
//!       "expect": { "uio_out": 48, "uo_out": { "value": 1, "mask": 1 } } }
//!   ]
//! }
//! ```
//!
//! Port values are integers or strings of logic levels; unknown levels (`x`, `z`, ...) read as zero.

use crate::Error;

use serde::{Deserialize, Serialize};

use vehctl::model::resolve_levels;
use vehctl::runtime::tracing::{PortTrace, Trace};
use vehctl::runtime::{Device, Testbench};
use vehctl::PortOutputs;

use std::fs;
use std::io;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PortValue {
    Int(u64),
    Levels(String),
}

impl PortValue {
    /// Resolves to a byte, dropping bits beyond the low 8.
    pub fn resolve(&self) -> u8 {
        match self {
            PortValue::Int(value) => (*value & 0xff) as u8,
            PortValue::Levels(levels) => resolve_levels(levels),
        }
    }

    /// Resolves a 1-bit port value.
    pub fn resolve_bit(&self) -> bool {
        self.resolve() & 1 != 0
    }
}

impl From<u8> for PortValue {
    fn from(value: u8) -> Self {
        PortValue::Int(value.into())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expected {
    Exact(PortValue),
    Masked { value: PortValue, mask: PortValue },
}

impl Expected {
    fn value_and_mask(&self) -> (u8, u8) {
        match self {
            Expected::Exact(value) => (value.resolve(), 0xff),
            Expected::Masked { value, mask } => {
                let mask = mask.resolve();
                (value.resolve() & mask, mask)
            }
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Expect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uo_out: Option<Expected>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uio_out: Option<Expected>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uio_oe: Option<Expected>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ena: Option<PortValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rst_n: Option<PortValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_in: Option<PortValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uio_in: Option<PortValue>,
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expect>,
}

fn default_cycles() -> u32 {
    1
}

impl Default for Step {
    fn default() -> Self {
        Step {
            label: None,
            ena: None,
            rst_n: None,
            ui_in: None,
            uio_in: None,
            cycles: default_cycles(),
            expect: None,
        }
    }
}

impl Step {
    fn apply<D: Device>(&self, tb: &mut Testbench<D>) {
        if let Some(ena) = &self.ena {
            tb.set_enable(ena.resolve_bit());
        }
        if let Some(rst_n) = &self.rst_n {
            tb.set_reset(!rst_n.resolve_bit());
        }
        if let Some(ui_in) = &self.ui_in {
            tb.set_primary_in(ui_in.resolve());
        }
        if let Some(uio_in) = &self.uio_in {
            tb.set_secondary_in(uio_in.resolve());
        }
    }

    fn check(&self, index: usize, cycle: u64, outputs: &PortOutputs) -> StepReport {
        let mut failures = Vec::new();
        if let Some(expect) = &self.expect {
            let ports = [
                ("uo_out", &expect.uo_out, outputs.primary_out),
                ("uio_out", &expect.uio_out, outputs.secondary_out),
                ("uio_oe", &expect.uio_oe, outputs.secondary_out_enable),
            ];
            for (port, expected, actual) in ports {
                if let Some(expected) = expected {
                    let (value, mask) = expected.value_and_mask();
                    if actual & mask != value {
                        failures.push(ExpectFailure {
                            port,
                            expected: value,
                            mask,
                            actual,
                        });
                    }
                }
            }
        }

        StepReport {
            index,
            label: self.label.clone(),
            cycle,
            outputs: *outputs,
            failures,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Script, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Script, Error> {
        Script::from_json(&fs::read_to_string(path)?)
    }

    /// Reset, power-on, motor-speed and enable-toggle sequence.
    pub fn bring_up() -> Script {
        let expect = |uo_out: Option<Expected>, uio_out: Option<u8>, uio_oe: Option<u8>| Expect {
            uo_out,
            uio_out: uio_out.map(|v| Expected::Exact(v.into())),
            uio_oe: uio_oe.map(|v| Expected::Exact(v.into())),
        };
        let powered = Expected::Masked {
            value: 1u8.into(),
            mask: 1u8.into(),
        };

        Script {
            name: Some("bring-up".into()),
            steps: vec![
                Step {
                    label: Some("hold reset".into()),
                    ena: Some(1u8.into()),
                    rst_n: Some(0u8.into()),
                    ui_in: Some(0u8.into()),
                    uio_in: Some(0u8.into()),
                    cycles: 10,
                    expect: Some(expect(Some(Expected::Exact(0u8.into())), Some(0), Some(0xff))),
                },
                Step {
                    label: Some("release reset".into()),
                    rst_n: Some(1u8.into()),
                    cycles: 10,
                    expect: Some(expect(Some(Expected::Exact(0u8.into())), Some(0), None)),
                    ..Default::default()
                },
                Step {
                    label: Some("power on".into()),
                    ui_in: Some(0b0000_1000u8.into()),
                    cycles: 5,
                    expect: Some(expect(Some(powered.clone()), None, None)),
                    ..Default::default()
                },
                Step {
                    label: Some("motor speed".into()),
                    ui_in: Some(0b0000_1100u8.into()),
                    uio_in: Some(0b0100_0001u8.into()),
                    cycles: 10,
                    expect: Some(expect(Some(powered.clone()), Some(48), Some(0xff))),
                    ..Default::default()
                },
                Step {
                    label: Some("disable".into()),
                    ena: Some(0u8.into()),
                    cycles: 5,
                    expect: Some(expect(Some(Expected::Exact(0u8.into())), Some(0), Some(0))),
                    ..Default::default()
                },
                Step {
                    label: Some("re-enable".into()),
                    ena: Some(1u8.into()),
                    cycles: 1,
                    expect: Some(expect(Some(powered), Some(48), Some(0xff))),
                    ..Default::default()
                },
            ],
        }
    }

    pub fn total_cycles(&self) -> u64 {
        self.steps.iter().map(|step| step.cycles as u64).sum()
    }

    pub fn run<D: Device>(&self, tb: &mut Testbench<D>) -> RunReport {
        let mut report = RunReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            step.apply(tb);
            let outputs = tb.clock_cycles(step.cycles);
            report.steps.push(step.check(index, tb.cycle(), &outputs));
        }

        report
    }

    /// Like [`run`](Script::run), recording the ports after every cycle.
    pub fn run_traced<D: Device, T: Trace>(
        &self,
        tb: &mut Testbench<D>,
        trace: &mut PortTrace<T>,
    ) -> io::Result<RunReport> {
        let mut report = RunReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            step.apply(tb);
            let outputs = tb.clock_traced(step.cycles, trace)?;
            report.steps.push(step.check(index, tb.cycle(), &outputs));
        }

        Ok(report)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExpectFailure {
    pub port: &'static str,
    pub expected: u8,
    pub mask: u8,
    pub actual: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub label: Option<String>,
    /// Clock edges applied once the step finished.
    pub cycle: u64,
    pub outputs: PortOutputs,
    pub failures: Vec<ExpectFailure>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn failures(&self) -> usize {
        self.steps.iter().map(|step| step.failures.len()).sum()
    }

    pub fn passed(&self) -> bool {
        self.failures() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use vehctl::{Config, Controller};

    #[test]
    fn parse_script() {
        let script = Script::from_json(
            r#"{
                "name": "motor",
                "steps": [
                    { "label": "reset", "ena": 1, "rst_n": 0, "ui_in": 0, "uio_in": 0, "cycles": 10 },
                    { "rst_n": "1", "cycles": 10 },
                    { "ui_in": "0b0000_1100", "uio_in": "0100_0001", "cycles": 10,
                      "expect": { "uio_out": 48, "uo_out": { "value": 1, "mask": 1 } } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.name.as_deref(), Some("motor"));
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.total_cycles(), 30);
        assert_eq!(script.steps[1].rst_n, Some(PortValue::Levels("1".into())));
        assert_eq!(script.steps[2].ui_in.as_ref().unwrap().resolve(), 0x0c);

        let expect = script.steps[2].expect.as_ref().unwrap();
        assert_eq!(expect.uio_out, Some(Expected::Exact(PortValue::Int(48))));
        assert_eq!(
            expect.uo_out.as_ref().unwrap().value_and_mask(),
            (0x01, 0x01)
        );
        assert_eq!(expect.uio_oe, None);

        let mut tb = Testbench::new(Controller::new(Config::default()).unwrap());
        assert!(script.run(&mut tb).passed());
    }

    #[test]
    fn default_cycles_is_one() {
        let script = Script::from_json(r#"{ "steps": [ { "ui_in": 8 } ] }"#).unwrap();
        assert_eq!(script.steps[0].cycles, 1);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(Script::from_json(r#"{ "steps": [ { "uo_in": 8 } ] }"#).is_err());
        assert!(Script::from_json(r#"{ "steps": [ { "cycles": -1 } ] }"#).is_err());
    }

    #[test]
    fn unknown_levels_resolve_to_zero() {
        assert_eq!(PortValue::Levels("xxxx1000".into()).resolve(), 0x08);
        assert_eq!(PortValue::Int(0x1ff).resolve(), 0xff);
        assert!(!PortValue::Levels("z".into()).resolve_bit());
        assert!(PortValue::Int(3).resolve_bit());
    }

    #[test]
    fn bring_up_passes_behavioral() {
        let script = Script::bring_up();
        let mut tb = Testbench::new(Controller::new(Config::default()).unwrap());

        let report = script.run(&mut tb);
        assert!(report.passed(), "{:?}", report);
        assert_eq!(report.steps.len(), 6);
        assert_eq!(report.steps[3].outputs.secondary_out, 48);
        assert_eq!(tb.cycle(), script.total_cycles());
    }

    #[test]
    fn failures_are_reported() {
        let script = Script {
            name: None,
            steps: vec![Step {
                ui_in: Some(0u8.into()),
                cycles: 2,
                expect: Some(Expect {
                    uio_oe: Some(Expected::Exact(0u8.into())),
                    uo_out: Some(Expected::Masked {
                        value: 0xffu8.into(),
                        mask: 0x0fu8.into(),
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }],
        };

        let mut tb = Testbench::new(Controller::new(Config::default()).unwrap());
        let report = script.run(&mut tb);
        assert!(!report.passed());
        assert_eq!(
            report.steps[0].failures,
            vec![
                ExpectFailure {
                    port: "uo_out",
                    expected: 0x0f,
                    mask: 0x0f,
                    actual: 0,
                },
                ExpectFailure {
                    port: "uio_oe",
                    expected: 0,
                    mask: 0xff,
                    actual: 0xff,
                },
            ]
        );
    }

    #[test]
    fn json_round_trip_of_bring_up() {
        let script = Script::bring_up();
        let json = serde_json::to_string_pretty(&script).unwrap();
        assert_eq!(Script::from_json(&json).unwrap(), script);
    }
}
