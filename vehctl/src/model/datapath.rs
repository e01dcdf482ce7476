//! Motor speed and PWM duty datapaths.

/// Largest value the motor speed register can hold (`15 * 16`).
pub const MAX_MOTOR_SPEED: u8 = 240;

/// Speed computed from the accelerator and brake nibbles, scaled by 16.
///
/// Braking at least as hard as accelerating yields zero.
///
/// # Examples
///
/// ```
/// use vehctl::model::scaled_speed;
///
/// assert_eq!(scaled_speed(12, 4), 128);
/// assert_eq!(scaled_speed(15, 1), 224);
/// assert_eq!(scaled_speed(8, 8), 0);
/// assert_eq!(scaled_speed(4, 15), 0);
/// ```
pub fn scaled_speed(accelerator: u8, brake: u8) -> u8 {
    let accelerator = accelerator & 0x0f;
    let brake = brake & 0x0f;
    if accelerator > brake {
        (accelerator - brake) << 4
    } else {
        0
    }
}

pub fn next_pwm_counter(pwm_counter: u8) -> u8 {
    pwm_counter.wrapping_add(1)
}

/// PWM output level for the current counter value.
pub fn pwm_pulse(pwm_counter: u8, motor_speed: u8) -> bool {
    pwm_counter < motor_speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_sweep() {
        for accelerator in 0..16 {
            for brake in 0..16 {
                let speed = scaled_speed(accelerator, brake);
                if accelerator > brake {
                    assert_eq!(speed as u32, (accelerator as u32 - brake as u32) * 16);
                } else {
                    assert_eq!(speed, 0);
                }
                assert!(speed <= MAX_MOTOR_SPEED);
            }
        }
    }

    #[test]
    fn duty_cycle() {
        let high = (0..=255u8).filter(|c| pwm_pulse(*c, 128)).count();
        assert_eq!(high, 128);

        assert!((0..=255u8).all(|c| !pwm_pulse(c, 0)));
        assert_eq!(next_pwm_counter(255), 0);
    }
}
