//! Generated RTL simulators for the vehicle controller, plus the tools for driving them against the behavioral model: a lockstep comparator and JSON stimulus scripts.

mod error;
mod lockstep;
pub mod stimulus;

pub use error::*;
pub use lockstep::*;

use vehctl::runtime::Device;
use vehctl::{Config, Controller, PortInputs, PortOutputs};

/// Simulators generated by `build.rs` from [`vehctl::design::controller`].
pub mod rtl {
    #![allow(unused_parens, clippy::all)]

    include!(concat!(env!("OUT_DIR"), "/controller.rs"));
}

/// Reset synchronizer depths with a generated RTL simulator.
pub const RTL_RESET_SYNC_DEPTHS: [u8; 2] = [4, 8];

macro_rules! rtl_device {
    ($name:ident) => {
        impl Device for rtl::$name {
            fn step(&mut self, inputs: &PortInputs) -> PortOutputs {
                self.ena = inputs.enable;
                self.rst_n = !inputs.raw_reset_asserted;
                self.ui_in = inputs.primary_in.into();
                self.uio_in = inputs.secondary_in.into();

                self.prop();
                self.posedge_clk();
                self.prop();

                PortOutputs {
                    primary_out: self.uo_out as u8,
                    secondary_out: self.uio_out as u8,
                    secondary_out_enable: self.uio_oe as u8,
                }
            }
        }
    };
}

rtl_device!(Controller);
rtl_device!(ControllerDepth8);

/// Which model(s) of the controller to run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Fidelity {
    Behavioral,
    Rtl,
    /// Both models in lockstep, reporting the behavioral outputs.
    Both,
}

/// Creates the generated RTL simulator for `config`, if one exists.
pub fn rtl_device(config: &Config) -> Result<Box<dyn Device>, Error> {
    config.validate()?;

    match config.reset_sync_depth {
        4 => Ok(Box::new(rtl::Controller::new())),
        8 => Ok(Box::new(rtl::ControllerDepth8::new())),
        reset_sync_depth => Err(Error::NoRtlSimulator { reset_sync_depth }),
    }
}

/// Creates the behavioral model in lockstep with the RTL simulator for `config`.
pub fn lockstep_device(config: &Config) -> Result<Lockstep<Controller, Box<dyn Device>>, Error> {
    Ok(Lockstep::new(Controller::new(*config)?, rtl_device(config)?))
}
