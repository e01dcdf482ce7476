use crate::Config;

/// Next value of the reset synchronizer counter.
///
/// The counter is held at zero while the raw reset is asserted and otherwise counts up to the configured depth, where it saturates.
pub fn next_counter(config: &Config, counter: u8, raw_reset_asserted: bool) -> u8 {
    if raw_reset_asserted {
        0
    } else if counter < config.reset_sync_depth {
        counter + 1
    } else {
        counter
    }
}

pub fn internal_reset_active(config: &Config, counter: u8) -> bool {
    counter < config.reset_sync_depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturates_at_depth() {
        let config = Config::default();

        let mut counter = 0;
        for expected in [1, 2, 3, 4, 4, 4] {
            counter = next_counter(&config, counter, false);
            assert_eq!(counter, expected);
        }
        assert!(!internal_reset_active(&config, counter));

        assert_eq!(next_counter(&config, counter, true), 0);
        assert!(internal_reset_active(&config, 0));
    }
}
