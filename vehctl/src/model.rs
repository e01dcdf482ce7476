//! Behavioral model of the controller.
//!
//! The whole register state lives in a [`ControllerState`] value and advances one clock edge per call to [`step`].
//! [`Controller`] owns a state and a [`Config`] and implements [`Device`] so it can be driven by a [`Testbench`](crate::runtime::Testbench).

mod datapath;
mod decoder;
mod dispatch;
mod ports;
mod reset_sync;

pub use datapath::{scaled_speed, MAX_MOTOR_SPEED};
pub use decoder::*;
pub use ports::*;

use crate::runtime::Device;
use crate::{Config, ConfigError};

/// Every register of the controller.
///
/// The all-zero value is the power-up state, in which the internal reset is active.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ControllerState {
    pub reset_sync_counter: u8,
    pub motor_speed: u8,
    pub pwm_counter: u8,
    pub power_state: bool,
    pub headlight_state: bool,
    pub horn_state: bool,
    pub indicator_state: bool,
    pub overheat_state: bool,
    /// 2-bit field.
    pub status_leds: u8,
}

impl ControllerState {
    pub fn internal_reset_active(&self, config: &Config) -> bool {
        reset_sync::internal_reset_active(config, self.reset_sync_counter)
    }
}

/// Advances `state` by one clock edge with `inputs` applied, returning the post-edge state and the resulting outputs.
///
/// Registers other than the reset synchronizer counter are cleared on an edge where the raw reset is asserted or the internal reset was still active before the edge.
/// Outputs are assembled from the post-edge state and the same cycle's inputs, then gated by `inputs.enable`.
///
/// `config` is assumed to be valid (see [`Config::validate`]).
///
/// # Examples
///
/// ```
/// use vehctl::*;
///
/// let config = Config::default();
/// let inputs = PortInputs {
///     enable: true,
///     raw_reset_asserted: false,
///     primary_in: 0b0000_1000,
///     secondary_in: 0,
/// };
///
/// let mut state = ControllerState::default();
/// for _ in 0..config.reset_sync_depth {
///     let (next, outputs) = step(&config, state, &inputs);
///     assert_eq!(outputs.primary_out, 0);
///     state = next;
/// }
///
/// let (_, outputs) = step(&config, state, &inputs);
/// assert_eq!(outputs.primary_out, 0x01);
/// ```
pub fn step(
    config: &Config,
    state: ControllerState,
    inputs: &PortInputs,
) -> (ControllerState, PortOutputs) {
    let ci = ControlInputs::decode(inputs);
    let hold = inputs.raw_reset_asserted || state.internal_reset_active(config);

    let mut next = ControllerState {
        reset_sync_counter: reset_sync::next_counter(
            config,
            state.reset_sync_counter,
            inputs.raw_reset_asserted,
        ),
        ..ControllerState::default()
    };

    if !hold {
        next.motor_speed = if ci.operation_select == OperationSelect::MotorCalc {
            scaled_speed(ci.accelerator, ci.brake)
        } else {
            state.motor_speed
        };
        next.pwm_counter = datapath::next_pwm_counter(state.pwm_counter);

        next.power_state = ci.power_requested();
        next.headlight_state = ci.power_requested() && ci.headlight_request;

        // No operation code drives these yet
        next.horn_state = state.horn_state;
        next.indicator_state = state.indicator_state;
        next.overheat_state = state.overheat_state;
        next.status_leds = state.status_leds;
    }

    let outputs = dispatch::gate(inputs.enable, dispatch::assemble(&next, &ci));

    (next, outputs)
}

/// A behavioral controller instance.
#[derive(Clone, Debug)]
pub struct Controller {
    config: Config,
    state: ControllerState,
}

impl Controller {
    /// Creates a controller in its power-up state.
    pub fn new(config: Config) -> Result<Controller, ConfigError> {
        config.validate()?;

        Ok(Controller {
            config,
            state: ControllerState::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }
}

impl Device for Controller {
    fn step(&mut self, inputs: &PortInputs) -> PortOutputs {
        let (state, outputs) = step(&self.config, self.state, inputs);
        self.state = state;
        outputs
    }
}
