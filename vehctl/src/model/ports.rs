/// Values applied to the controller's pins for one clock cycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PortInputs {
    /// Chip-level enable. When low, every output reads zero.
    pub enable: bool,
    /// Raw reset level, already converted to active-high.
    pub raw_reset_asserted: bool,
    pub primary_in: u8,
    pub secondary_in: u8,
}

/// Values observed on the controller's pins after a clock edge.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PortOutputs {
    pub primary_out: u8,
    pub secondary_out: u8,
    pub secondary_out_enable: u8,
}

/// Resolves a port value written as a string of logic levels, most significant bit first, into a byte.
///
/// An optional `0b` prefix and `_` separators are accepted. `1`/`H`/`h` read as one; every other level
/// (`0`, `x`, `z`, `u`, `-`, ...) reads as zero. Levels beyond the low 8 bits are dropped.
///
/// # Examples
///
/// ```
/// use vehctl::model::resolve_levels;
///
/// assert_eq!(resolve_levels("0b0100_1001"), 0x49);
/// assert_eq!(resolve_levels("01xz1000"), 0x48);
/// assert_eq!(resolve_levels("1_0000_0001"), 0x01);
/// ```
pub fn resolve_levels(levels: &str) -> u8 {
    let levels = levels.trim();
    let levels = levels
        .strip_prefix("0b")
        .or_else(|| levels.strip_prefix("0B"))
        .unwrap_or(levels);
    levels
        .chars()
        .filter(|c| *c != '_')
        .fold(0u8, |acc, c| {
            (acc << 1) | matches!(c, '1' | 'H' | 'h') as u8
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_levels_read_as_zero() {
        assert_eq!(resolve_levels("xxxxxxxx"), 0);
        assert_eq!(resolve_levels("zzzz1111"), 0x0f);
        assert_eq!(resolve_levels("UUUU-1-1"), 0x05);
        assert_eq!(resolve_levels(""), 0);
    }

    #[test]
    fn out_of_range_levels_are_dropped() {
        assert_eq!(resolve_levels("111111111"), 0xff);
        assert_eq!(resolve_levels("100000000"), 0x00);
    }
}
