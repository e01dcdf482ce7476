use super::ports::PortInputs;

/// The 3-bit operation select field of the primary input port.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationSelect {
    Idle,
    Lighting,
    Horn,
    Indicator,
    MotorCalc,
    Pwm,
    OverheatCheck,
    Status,
}

impl OperationSelect {
    pub fn from_bits(bits: u8) -> OperationSelect {
        match bits & 0b111 {
            0b000 => OperationSelect::Idle,
            0b001 => OperationSelect::Lighting,
            0b010 => OperationSelect::Horn,
            0b011 => OperationSelect::Indicator,
            0b100 => OperationSelect::MotorCalc,
            0b101 => OperationSelect::Pwm,
            0b110 => OperationSelect::OverheatCheck,
            _ => OperationSelect::Status,
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            OperationSelect::Idle => 0b000,
            OperationSelect::Lighting => 0b001,
            OperationSelect::Horn => 0b010,
            OperationSelect::Indicator => 0b011,
            OperationSelect::MotorCalc => 0b100,
            OperationSelect::Pwm => 0b101,
            OperationSelect::OverheatCheck => 0b110,
            OperationSelect::Status => 0b111,
        }
    }

    /// Reserved codes have no effect on any register; they behave exactly like [`OperationSelect::Idle`].
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            OperationSelect::Horn
                | OperationSelect::Indicator
                | OperationSelect::OverheatCheck
                | OperationSelect::Status
        )
    }

    /// Modes in which the secondary port carries the held motor speed.
    pub fn drives_motor_speed(&self) -> bool {
        matches!(self, OperationSelect::MotorCalc | OperationSelect::Pwm)
    }
}

/// Named fields of the two input ports, decoded fresh every cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ControlInputs {
    pub power_on_plc: bool,
    pub power_on_hmi: bool,
    pub headlight_request: bool,
    pub operation_select: OperationSelect,
    pub accelerator: u8,
    pub brake: u8,
}

impl ControlInputs {
    /// Primary port bits 7 and 5 are ignored.
    pub fn decode(inputs: &PortInputs) -> ControlInputs {
        let primary = inputs.primary_in;
        let secondary = inputs.secondary_in;
        ControlInputs {
            power_on_plc: primary & (1 << 3) != 0,
            power_on_hmi: primary & (1 << 4) != 0,
            headlight_request: primary & (1 << 6) != 0,
            operation_select: OperationSelect::from_bits(primary),
            accelerator: secondary >> 4,
            brake: secondary & 0x0f,
        }
    }

    pub fn power_requested(&self) -> bool {
        self.power_on_plc || self.power_on_hmi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_layout() {
        let inputs = PortInputs {
            primary_in: 0b0100_1100,
            secondary_in: 0x41,
            ..Default::default()
        };

        let ci = ControlInputs::decode(&inputs);
        assert!(ci.power_on_plc);
        assert!(!ci.power_on_hmi);
        assert!(ci.headlight_request);
        assert_eq!(ci.operation_select, OperationSelect::MotorCalc);
        assert_eq!(ci.accelerator, 4);
        assert_eq!(ci.brake, 1);
    }

    #[test]
    fn ignored_bits() {
        let base = ControlInputs::decode(&PortInputs {
            primary_in: 0b0001_0001,
            ..Default::default()
        });
        let noisy = ControlInputs::decode(&PortInputs {
            primary_in: 0b1011_0001,
            ..Default::default()
        });
        assert_eq!(base, noisy);
    }

    #[test]
    fn operation_codes() {
        for bits in 0..8u8 {
            let op = OperationSelect::from_bits(bits);
            assert_eq!(op.bits(), bits);
            assert_eq!(op.is_reserved(), matches!(bits, 0b010 | 0b011 | 0b110 | 0b111));
        }
    }
}
