//! RTL description of the controller.

use crate::graph::*;
use crate::Config;

/// Describes the controller as a [`Module`] called `name` in `c`.
///
/// Ports use chip-level names: inputs `ena`, `rst_n` (active low), `ui_in` and `uio_in`; outputs `uo_out`, `uio_out` and `uio_oe`.
/// Every register is cleared on an edge where `rst_n` is low or the reset synchronizer counter is still below `config.reset_sync_depth`.
///
/// # Panics
///
/// Panics if `config` is invalid, or if `c` already contains a module called `name`.
///
/// # Examples
///
/// ```
/// use vehctl::*;
///
/// let c = Context::new();
///
/// let shallow = design::controller(&c, "Controller", &Config::default());
/// let deep = design::controller(&c, "ControllerDepth8", &Config { reset_sync_depth: 8 });
/// assert_eq!(deep.name(), "ControllerDepth8");
/// ```
pub fn controller<'a>(c: &'a Context<'a>, name: &str, config: &Config) -> &'a Module<'a> {
    if let Err(e) = config.validate() {
        panic!("Cannot describe controller \"{}\". {}", name, e);
    }

    let m = c.module(name);

    let ena = m.input("ena", 1);
    let rst_n = m.input("rst_n", 1);
    let ui_in = m.input("ui_in", 8);
    let uio_in = m.input("uio_in", 8);

    // Reset synchronizer
    let depth = config.reset_sync_depth as u32;
    let counter_bit_width = 32 - depth.leading_zeros();
    let raw_reset = !rst_n;
    let counter = m.reg("reset_sync_counter", counter_bit_width);
    let internal_reset = counter.value.lt(m.lit(depth, counter_bit_width));
    counter.drive_next(raw_reset.mux(
        m.lit(0u32, counter_bit_width),
        internal_reset.mux(
            counter.value + m.lit(1u32, counter_bit_width),
            counter.value,
        ),
    ));
    let hold = raw_reset | internal_reset;

    // Decoder
    let operation_select = ui_in.bits(2, 0);
    let power_on_plc = ui_in.bit(3);
    let power_on_hmi = ui_in.bit(4);
    let headlight_request = ui_in.bit(6);
    let accelerator = uio_in.bits(7, 4);
    let brake = uio_in.bits(3, 0);

    let is_motor_calc = operation_select.eq(m.lit(0b100u32, 3));
    let is_pwm = operation_select.eq(m.lit(0b101u32, 3));
    let power_requested = power_on_plc | power_on_hmi;

    // Motor speed
    let motor_speed = m.reg("motor_speed", 8);
    let scaled_speed = accelerator.gt(brake).mux(
        (accelerator - brake).concat(m.lit(0u32, 4)),
        m.lit(0u32, 8),
    );
    motor_speed.drive_next(cleared(
        m,
        hold,
        is_motor_calc.mux(scaled_speed, motor_speed.value),
    ));

    // PWM
    let pwm_counter = m.reg("pwm_counter", 8);
    pwm_counter.drive_next(cleared(m, hold, pwm_counter.value + m.lit(1u32, 8)));
    let pwm_pulse = is_pwm & pwm_counter.value.lt(motor_speed.value);

    // Status
    let power_state = m.reg("power_state", 1);
    power_state.drive_next(cleared(m, hold, power_requested));

    let headlight_state = m.reg("headlight_state", 1);
    headlight_state.drive_next(cleared(m, hold, power_requested & headlight_request));

    let horn_state = held(m, hold, "horn_state", 1);
    let indicator_state = held(m, hold, "indicator_state", 1);
    let overheat_state = held(m, hold, "overheat_state", 1);
    let status_leds = held(m, hold, "status_leds", 2);

    // Outputs
    let primary = status_leds
        .concat(overheat_state)
        .concat(pwm_pulse)
        .concat(indicator_state)
        .concat(horn_state)
        .concat(headlight_state.value)
        .concat(power_state.value);
    let drives_motor_speed = is_motor_calc | is_pwm;

    m.output("uo_out", primary & ena.repeat(8));
    m.output(
        "uio_out",
        motor_speed.value & (ena & drives_motor_speed).repeat(8),
    );
    m.output("uio_oe", ena.repeat(8));

    m
}

fn cleared<'a>(
    m: &'a Module<'a>,
    hold: &'a Signal<'a>,
    value: &'a Signal<'a>,
) -> &'a Signal<'a> {
    hold.mux(m.lit(0u32, value.bit_width()), value)
}

/// A register no operation code drives; it only clears on reset.
fn held<'a>(
    m: &'a Module<'a>,
    hold: &'a Signal<'a>,
    name: &str,
    bit_width: u32,
) -> &'a Signal<'a> {
    let r = m.reg(name, bit_width);
    r.drive_next(cleared(m, hold, r.value));
    r.value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports() {
        let c = Context::new();

        let m = controller(&c, "Controller", &Config::default());

        let inputs = m.inputs.borrow();
        assert_eq!(inputs["ena"].bit_width(), 1);
        assert_eq!(inputs["rst_n"].bit_width(), 1);
        assert_eq!(inputs["ui_in"].bit_width(), 8);
        assert_eq!(inputs["uio_in"].bit_width(), 8);

        let outputs = m.outputs.borrow();
        assert_eq!(outputs.len(), 3);
        for name in ["uo_out", "uio_out", "uio_oe"] {
            assert_eq!(outputs[name].bit_width(), 8);
        }

        assert_eq!(m.registers.borrow().len(), 9);
    }

    #[test]
    fn generates() {
        let c = Context::new();

        for (name, depth) in [("Depth4", 4), ("Depth9", 9), ("Depth15", 15)] {
            let m = controller(
                &c,
                name,
                &Config {
                    reset_sync_depth: depth,
                },
            );
            crate::sim::generate(m, std::io::sink()).unwrap();
        }
    }

    #[test]
    #[should_panic(
        expected = "Cannot describe controller \"Controller\". Reset synchronizer depth 16 is out of range. The depth must be in the range [4, 15]."
    )]
    fn invalid_config_error() {
        let c = Context::new();

        // Panic
        let _ = controller(
            &c,
            "Controller",
            &Config {
                reset_sync_depth: 16,
            },
        );
    }

    #[test]
    #[should_panic(
        expected = "Cannot describe controller \"Shallow\". Reset synchronizer depth 2 is out of range. The depth must be in the range [4, 15]."
    )]
    fn shallow_config_error() {
        let c = Context::new();

        // Panic
        let _ = controller(
            &c,
            "Shallow",
            &Config {
                reset_sync_depth: 2,
            },
        );
    }
}
