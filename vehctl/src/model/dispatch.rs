//! Output assembly and the chip-level enable gate.

use super::datapath::pwm_pulse;
use super::decoder::{ControlInputs, OperationSelect};
use super::ports::PortOutputs;
use super::ControllerState;

/// Assembles the output ports from post-edge state and the current cycle's control inputs.
///
/// Primary port layout, LSB first: power, headlight, horn, indicator, PWM pulse (PWM mode only), overheat, then the 2-bit status field in bits 7:6.
pub fn assemble(state: &ControllerState, ci: &ControlInputs) -> PortOutputs {
    let op = ci.operation_select;
    let pulse = op == OperationSelect::Pwm && pwm_pulse(state.pwm_counter, state.motor_speed);

    let primary_out = (state.status_leds & 0b11) << 6
        | (state.overheat_state as u8) << 5
        | (pulse as u8) << 4
        | (state.indicator_state as u8) << 3
        | (state.horn_state as u8) << 2
        | (state.headlight_state as u8) << 1
        | state.power_state as u8;

    PortOutputs {
        primary_out,
        secondary_out: if op.drives_motor_speed() {
            state.motor_speed
        } else {
            0
        },
        secondary_out_enable: 0xff,
    }
}

/// Forces every output bit low while the chip is disabled.
pub fn gate(enable: bool, outputs: PortOutputs) -> PortOutputs {
    if enable {
        outputs
    } else {
        PortOutputs::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::PortInputs;

    #[test]
    fn primary_layout() {
        let state = ControllerState {
            power_state: true,
            headlight_state: true,
            overheat_state: true,
            status_leds: 0b10,
            motor_speed: 16,
            pwm_counter: 3,
            ..Default::default()
        };
        let ci = ControlInputs::decode(&PortInputs {
            primary_in: OperationSelect::Pwm.bits(),
            ..Default::default()
        });

        let outputs = assemble(&state, &ci);
        assert_eq!(outputs.primary_out, 0b1011_0011);
        assert_eq!(outputs.secondary_out, 16);
        assert_eq!(outputs.secondary_out_enable, 0xff);

        assert_eq!(gate(false, outputs), PortOutputs::default());
        assert_eq!(gate(true, outputs), outputs);
    }
}
