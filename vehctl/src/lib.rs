//! A cycle-accurate model of a small vehicle subsystem controller (power sequencing, lighting, motor speed, PWM) at two simulation fidelities.
//!
//! The controller is driven by two 8-bit input ports and exposes two 8-bit output ports plus an output-enable mask.
//! It is available as:
//!
//! - a behavioral model: the pure [`step`] function over an explicit [`ControllerState`], wrapped by [`Controller`],
//! - an RTL description built with the embedded HDL ([`Context`], [`Module`], [`Signal`], [`Register`]) in [`design::controller`], from which [`sim::generate`] writes Rust simulator code.
//!
//! Both fidelities implement [`runtime::Device`], so the same stimulus can drive either one (or both in lockstep).
//!
//! # Examples
//!
//! ```rust
//! use vehctl::runtime::Testbench;
//! use vehctl::*;
//!
//! let controller = Controller::new(Config::default()).unwrap();
//! let mut tb = Testbench::new(controller);
//!
//! // Hold reset, then release it and wait out the synchronizer
//! tb.set_reset(true);
//! tb.clock_cycles(10);
//! tb.set_reset(false);
//! tb.clock_cycles(10);
//!
//! // power_on_plc = 1, operation = idle
//! tb.set_primary_in(0b0000_1000);
//! let outputs = tb.clock_cycles(1);
//! assert_eq!(outputs.primary_out & 0x01, 0x01);
//! ```
//!
//! Generating simulator code for the RTL description:
//!
//! ```rust
//! # fn main() -> std::io::Result<()> {
//! use vehctl::*;
//!
//! let c = Context::new();
//! let m = design::controller(&c, "Controller", &Config::default());
//!
//! sim::generate(m, std::io::sink())?;
//! # Ok(())
//! # }
//! ```

// Must be kept up-to-date with version in Cargo.toml
#![doc(html_root_url = "https://docs.rs/vehctl/0.1.0")]

mod code_writer;
mod config;
pub mod design;
mod graph;
pub mod model;
pub mod runtime;
pub mod sim;

pub use config::*;
pub use graph::*;
pub use model::{step, Controller, ControllerState, PortInputs, PortOutputs};
