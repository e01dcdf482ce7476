use super::constant::*;
use super::module::*;
use super::register::*;

use std::ops::{Add, BitAnd, BitOr, Not, Sub};
use std::ptr;

/// The minimum allowed bit width for any given [`Signal`].
pub const MIN_SIGNAL_BIT_WIDTH: u32 = 1;
/// The maximum allowed bit width for any given [`Signal`].
///
/// This is set to `32` so that generated simulator code can store every signal in either a `bool` or a `u32`.
pub const MAX_SIGNAL_BIT_WIDTH: u32 = 32;

/// Represents a collection of 1 or more bits driven by some source.
///
/// A `Signal` can be created by several [`Module`] methods (eg. [`Module::lit`]) or as a result of combining existing `Signal`s (eg. [`concat`]). `Signal`s are local to their respective [`Module`]s.
///
/// A `Signal` behaves similarly to a `wire` in verilog, except that it's always driven.
///
/// # Examples
///
/// ```
/// use vehctl::*;
///
/// let c = Context::new();
///
/// let m = c.module("MyModule");
/// let a = m.lit(0xffu8, 8); // 8-bit signal
/// let b = m.input("my_input", 27); // 27-bit signal
/// let c = b.bits(7, 0); // 8-bit signal
/// let d = a + c; // 8-bit signal
/// m.output("my_output", d); // 8-bit output driven by d
/// ```
///
/// [`concat`]: Signal::concat
#[must_use]
pub struct Signal<'a> {
    pub(super) module: &'a Module<'a>,

    pub(crate) data: SignalData<'a>,
}

pub(crate) enum SignalData<'a> {
    Lit {
        value: Constant,
        bit_width: u32,
    },

    Input {
        name: String,
        bit_width: u32,
    },

    Reg {
        data: &'a RegisterData<'a>,
    },

    UnOp {
        source: &'a Signal<'a>,
        op: UnOp,
    },
    BinOp {
        lhs: &'a Signal<'a>,
        rhs: &'a Signal<'a>,
        op: BinOp,
        bit_width: u32,
    },

    Bits {
        source: &'a Signal<'a>,
        range_high: u32,
        range_low: u32,
    },

    Repeat {
        source: &'a Signal<'a>,
        count: u32,
    },
    Concat {
        lhs: &'a Signal<'a>,
        rhs: &'a Signal<'a>,
    },

    Mux {
        cond: &'a Signal<'a>,
        when_true: &'a Signal<'a>,
        when_false: &'a Signal<'a>,
    },
}

#[derive(Clone, Copy)]
pub(crate) enum UnOp {
    Not,
}

#[derive(Clone, Copy)]
pub(crate) enum BinOp {
    Add,
    Sub,
    BitAnd,
    BitOr,
    Equal,
    LessThan,
    GreaterThan,
}

impl BinOp {
    pub(crate) fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Equal | BinOp::LessThan | BinOp::GreaterThan
        )
    }
}

impl<'a> Signal<'a> {
    /// Returns the bit width of the given `Signal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vehctl::*;
    ///
    /// let c = Context::new();
    ///
    /// let m = c.module("MyModule");
    ///
    /// assert_eq!(m.lit(42u32, 7).bit_width(), 7);
    /// assert_eq!(m.input("i", 27).bit_width(), 27);
    /// assert_eq!(m.reg("some_reg", 16).value.bit_width(), 16);
    /// assert_eq!((!m.low()).bit_width(), 1);
    /// assert_eq!((m.lit(25u8, 8) + m.lit(42u8, 8)).bit_width(), 8);
    /// assert_eq!((m.lit(25u8, 8) - m.lit(42u8, 8)).bit_width(), 8);
    /// assert_eq!((m.high() & m.low()).bit_width(), 1);
    /// assert_eq!(m.lit(12u32, 20).bit(10).bit_width(), 1);
    /// assert_eq!(m.lit(1u32, 20).bits(17, 9).bit_width(), 9);
    /// assert_eq!(m.high().repeat(8).bit_width(), 8);
    /// assert_eq!(m.lit(1u32, 20).concat(m.high()).bit_width(), 21);
    /// assert_eq!(m.lit(0xaau32, 8).lt(m.lit(0xaau32, 8)).bit_width(), 1);
    /// assert_eq!(m.low().mux(m.lit(5u32, 4), m.lit(6u32, 4)).bit_width(), 4);
    /// ```
    #[must_use]
    pub fn bit_width(&self) -> u32 {
        match &self.data {
            SignalData::Lit { bit_width, .. } => *bit_width,
            SignalData::Input { bit_width, .. } => *bit_width,
            SignalData::Reg { data } => data.bit_width,
            SignalData::UnOp { source, .. } => source.bit_width(),
            SignalData::BinOp { bit_width, .. } => *bit_width,
            SignalData::Bits {
                range_high,
                range_low,
                ..
            } => range_high - range_low + 1,
            SignalData::Repeat { source, count } => source.bit_width() * count,
            SignalData::Concat { lhs, rhs } => lhs.bit_width() + rhs.bit_width(),
            SignalData::Mux { when_true, .. } => when_true.bit_width(),
        }
    }

    /// Creates a `Signal` that represents the value of the single bit of this `Signal` at index `index`, where `index` equal to `0` represents this `Signal`'s least significant bit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than or equal to this `Signal`'s `bit_width`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vehctl::*;
    ///
    /// let c = Context::new();
    ///
    /// let m = c.module("MyModule");
    ///
    /// let lit = m.lit(0b0110u32, 4);
    /// let bit_0 = lit.bit(0); // Represents 0
    /// let bit_1 = lit.bit(1); // Represents 1
    /// ```
    pub fn bit(&'a self, index: u32) -> &'a Signal<'a> {
        if index >= self.bit_width() {
            panic!("Attempted to take bit index {} from a signal with a width of {} bits. Bit indices must be in the range [0, {}] for a signal with a width of {} bits.", index, self.bit_width(), self.bit_width() - 1, self.bit_width());
        }
        self.module.signal(SignalData::Bits {
            source: self,
            range_high: index,
            range_low: index,
        })
    }

    /// Creates a `Signal` that represents a contiguous subset of the bits of this `Signal`, starting at `range_low` as the least significant bit and ending at `range_high` as the most significant bit, inclusive.
    ///
    /// # Panics
    ///
    /// Panics if either `range_low` or `range_high` is greater than or equal to the bit width of this `Signal`, or if `range_low` is greater than `range_high`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vehctl::*;
    ///
    /// let c = Context::new();
    ///
    /// let m = c.module("MyModule");
    ///
    /// let port = m.input("port", 8);
    /// let upper_nibble = port.bits(7, 4);
    /// let lower_nibble = port.bits(3, 0);
    /// ```
    pub fn bits(&'a self, range_high: u32, range_low: u32) -> &'a Signal<'a> {
        if range_low >= self.bit_width() {
            panic!("Cannot specify a range of bits where the lower bound is greater than or equal to the number of bits in the source signal. The bounds must be in the range [0, {}] for a signal with a width of {} bits, but a lower bound of {} was given.", self.bit_width() - 1, self.bit_width(), range_low);
        }
        if range_high >= self.bit_width() {
            panic!("Cannot specify a range of bits where the upper bound is greater than or equal to the number of bits in the source signal. The bounds must be in the range [0, {}] for a signal with a width of {} bits, but an upper bound of {} was given.", self.bit_width() - 1, self.bit_width(), range_high);
        }
        if range_low > range_high {
            panic!("Cannot specify a range of bits where the lower bound is greater than the upper bound.");
        }
        self.module.signal(SignalData::Bits {
            source: self,
            range_high,
            range_low,
        })
    }

    /// Creates a `Signal` that represents this `Signal` repeated `count` times.
    ///
    /// # Panics
    ///
    /// Panics if `self.bit_width() * count` is less than [`MIN_SIGNAL_BIT_WIDTH`] or greater than [`MAX_SIGNAL_BIT_WIDTH`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vehctl::*;
    ///
    /// let c = Context::new();
    ///
    /// let m = c.module("MyModule");
    ///
    /// let enable = m.input("enable", 1);
    /// let mask = enable.repeat(8); // 0xff when enable is high, 0x00 otherwise
    /// ```
    pub fn repeat(&'a self, count: u32) -> &'a Signal<'a> {
        let target_bit_width = self.bit_width() * count;
        if target_bit_width < MIN_SIGNAL_BIT_WIDTH {
            panic!("Attempted to repeat a {}-bit signal {} times, but this would result in a bit width of {}, which is less than the minimal signal bit width of {} bit(s).", self.bit_width(), count, target_bit_width, MIN_SIGNAL_BIT_WIDTH);
        }
        if target_bit_width > MAX_SIGNAL_BIT_WIDTH {
            panic!("Attempted to repeat a {}-bit signal {} times, but this would result in a bit width of {}, which is greater than the maximum signal bit width of {} bit(s).", self.bit_width(), count, target_bit_width, MAX_SIGNAL_BIT_WIDTH);
        }
        self.module.signal(SignalData::Repeat {
            source: self,
            count,
        })
    }

    /// Creates a `Signal` that represents this `Signal` concatenated with `rhs`.
    ///
    /// `self` represents the upper bits in the resulting `Signal`, and `rhs` represents the lower bits.
    ///
    /// # Panics
    ///
    /// Panics if `self` and `rhs` belong to different [`Module`]s, or if `self.bit_width() + rhs.bit_width()` is greater than [`MAX_SIGNAL_BIT_WIDTH`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vehctl::*;
    ///
    /// let c = Context::new();
    ///
    /// let m = c.module("MyModule");
    ///
    /// let lit_a = m.lit(0xau32, 4);
    /// let lit_b = m.lit(0xffu32, 8);
    /// let concat_1 = lit_a.concat(lit_b); // Equivalent to 12-bit lit with value 0xaff
    /// let concat_2 = lit_b.concat(lit_a); // Equivalent to 12-bit lit with value 0xffa
    /// ```
    pub fn concat(&'a self, rhs: &'a Signal<'a>) -> &'a Signal<'a> {
        if !ptr::eq(self.module, rhs.module) {
            panic!("Attempted to combine signals from different modules.");
        }
        let target_bit_width = self.bit_width() + rhs.bit_width();
        if target_bit_width > MAX_SIGNAL_BIT_WIDTH {
            panic!("Attempted to concatenate signals with {} bit(s) and {} bit(s) respectively, but this would result in a bit width of {}, which is greater than the maximum signal bit width of {} bit(s).", self.bit_width(), rhs.bit_width(), target_bit_width, MAX_SIGNAL_BIT_WIDTH);
        }
        self.module.signal(SignalData::Concat { lhs: self, rhs })
    }

    /// Creates a `Signal` that represents the single-bit result of an equality comparison between `self` and `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `self` and `rhs` belong to different [`Module`]s, or if the bit widths of `self` and `rhs` aren't equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use vehctl::*;
    ///
    /// let c = Context::new();
    ///
    /// let m = c.module("MyModule");
    ///
    /// let mode = m.input("mode", 3);
    /// let is_motor_calc = mode.eq(m.lit(0b100u32, 3));
    /// ```
    pub fn eq(&'a self, rhs: &'a Signal<'a>) -> &'a Signal<'a> {
        self.bin_op(rhs, BinOp::Equal, "compared")
    }

    /// Creates a `Signal` that represents the single-bit result of an unsigned `<` comparison between `self` and `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `self` and `rhs` belong to different [`Module`]s, or if the bit widths of `self` and `rhs` aren't equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use vehctl::*;
    ///
    /// let c = Context::new();
    ///
    /// let m = c.module("MyModule");
    ///
    /// let counter = m.reg("counter", 8);
    /// counter.drive_next(counter.value + m.lit(1u32, 8));
    /// let pulse = counter.value.lt(m.input("duty", 8));
    /// ```
    pub fn lt(&'a self, rhs: &'a Signal<'a>) -> &'a Signal<'a> {
        self.bin_op(rhs, BinOp::LessThan, "compared")
    }

    /// Creates a `Signal` that represents the single-bit result of an unsigned `>` comparison between `self` and `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `self` and `rhs` belong to different [`Module`]s, or if the bit widths of `self` and `rhs` aren't equal.
    pub fn gt(&'a self, rhs: &'a Signal<'a>) -> &'a Signal<'a> {
        self.bin_op(rhs, BinOp::GreaterThan, "compared")
    }

    /// Creates a 2:1 [multiplexer](https://en.wikipedia.org/wiki/Multiplexer) that represents `when_true`'s value when `self` is high, and `when_false`'s value when `self` is low.
    ///
    /// # Panics
    ///
    /// Panics if `self`, `when_true`, or `when_false` belong to different [`Module`]s, if `self` is not 1 bit wide, or if the bit widths of `when_true` and `when_false` aren't equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use vehctl::*;
    ///
    /// let c = Context::new();
    ///
    /// let m = c.module("MyModule");
    ///
    /// let cond = m.input("cond", 1);
    /// let a = m.input("a", 8);
    /// let b = m.input("b", 8);
    /// m.output("my_output", cond.mux(a, b)); // Outputs a when cond is high, b otherwise
    /// ```
    pub fn mux(&'a self, when_true: &'a Signal<'a>, when_false: &'a Signal<'a>) -> &'a Signal<'a> {
        if !ptr::eq(self.module, when_true.module) || !ptr::eq(self.module, when_false.module) {
            panic!("Attempted to combine signals from different modules.");
        }
        if self.bit_width() != 1 {
            panic!("Multiplexer conditionals can only be 1 bit wide.");
        }
        if when_true.bit_width() != when_false.bit_width() {
            panic!("Cannot multiplex signals with different bit widths ({} and {}, respectively).", when_true.bit_width(), when_false.bit_width());
        }
        self.module.signal(SignalData::Mux {
            cond: self,
            when_true,
            when_false,
        })
    }

    fn bin_op(&'a self, rhs: &'a Signal<'a>, op: BinOp, verb: &str) -> &'a Signal<'a> {
        if !ptr::eq(self.module, rhs.module) {
            panic!("Attempted to combine signals from different modules.");
        }
        if self.bit_width() != rhs.bit_width() {
            panic!(
                "Signals have different bit widths ({} and {}, respectively), so they cannot be {}.",
                self.bit_width(),
                rhs.bit_width(),
                verb
            );
        }
        let bit_width = if op.is_comparison() {
            1
        } else {
            self.bit_width()
        };
        self.module.signal(SignalData::BinOp {
            lhs: self,
            rhs,
            op,
            bit_width,
        })
    }
}

impl<'a> Add for &'a Signal<'a> {
    type Output = Self;

    /// Combines two `Signal`s, producing a new `Signal` that represents their wrapping sum.
    ///
    /// # Panics
    ///
    /// Panics if `lhs` and `rhs` belong to different [`Module`]s, or if the bit widths of `lhs` and `rhs` aren't equal.
    fn add(self, rhs: Self) -> Self {
        self.bin_op(rhs, BinOp::Add, "added")
    }
}

impl<'a> Sub for &'a Signal<'a> {
    type Output = Self;

    /// Combines two `Signal`s, producing a new `Signal` that represents their wrapping difference.
    ///
    /// # Panics
    ///
    /// Panics if `lhs` and `rhs` belong to different [`Module`]s, or if the bit widths of `lhs` and `rhs` aren't equal.
    fn sub(self, rhs: Self) -> Self {
        self.bin_op(rhs, BinOp::Sub, "subtracted")
    }
}

impl<'a> BitAnd for &'a Signal<'a> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.bin_op(rhs, BinOp::BitAnd, "AND'ed")
    }
}

impl<'a> BitOr for &'a Signal<'a> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.bin_op(rhs, BinOp::BitOr, "OR'ed")
    }
}

impl<'a> Not for &'a Signal<'a> {
    type Output = Self;

    /// Produces a new `Signal` that represents the bitwise inversion of the given `Signal`.
    fn not(self) -> Self {
        self.module.signal(SignalData::UnOp {
            source: self,
            op: UnOp::Not,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    #[should_panic(
        expected = "Attempted to take bit index 3 from a signal with a width of 3 bits. Bit indices must be in the range [0, 2] for a signal with a width of 3 bits."
    )]
    fn bit_index_oob_error() {
        let c = Context::new();

        let m = c.module("A");
        let i = m.input("i", 3);

        // Panic
        let _ = i.bit(3);
    }

    #[test]
    #[should_panic(
        expected = "Cannot specify a range of bits where the lower bound is greater than the upper bound."
    )]
    fn bits_range_low_gt_high_error() {
        let c = Context::new();

        let m = c.module("A");
        let i = m.input("i", 8);

        // Panic
        let _ = i.bits(3, 4);
    }

    #[test]
    #[should_panic(
        expected = "Attempted to repeat a 8-bit signal 5 times, but this would result in a bit width of 40, which is greater than the maximum signal bit width of 32 bit(s)."
    )]
    fn repeat_count_oob_error() {
        let c = Context::new();

        let m = c.module("A");
        let i = m.input("i", 8);

        // Panic
        let _ = i.repeat(5);
    }

    #[test]
    #[should_panic(
        expected = "Attempted to concatenate signals with 16 bit(s) and 17 bit(s) respectively, but this would result in a bit width of 33, which is greater than the maximum signal bit width of 32 bit(s)."
    )]
    fn concat_oob_error() {
        let c = Context::new();

        let m = c.module("A");
        let i1 = m.input("i1", 16);
        let i2 = m.input("i2", 17);

        // Panic
        let _ = i1.concat(i2);
    }

    #[test]
    #[should_panic(expected = "Attempted to combine signals from different modules.")]
    fn lt_separate_module_error() {
        let c = Context::new();

        let m1 = c.module("A");
        let i1 = m1.input("i", 4);

        let m2 = c.module("B");
        let i2 = m2.input("i", 4);

        // Panic
        let _ = i1.lt(i2);
    }

    #[test]
    #[should_panic(
        expected = "Signals have different bit widths (4 and 8, respectively), so they cannot be compared."
    )]
    fn gt_incompatible_bit_widths_error() {
        let c = Context::new();

        let m = c.module("A");
        let i1 = m.input("i1", 4);
        let i2 = m.input("i2", 8);

        // Panic
        let _ = i1.gt(i2);
    }

    #[test]
    #[should_panic(
        expected = "Signals have different bit widths (4 and 8, respectively), so they cannot be subtracted."
    )]
    fn sub_incompatible_bit_widths_error() {
        let c = Context::new();

        let m = c.module("A");
        let i1 = m.input("i1", 4);
        let i2 = m.input("i2", 8);

        // Panic
        let _ = i1 - i2;
    }

    #[test]
    #[should_panic(
        expected = "Signals have different bit widths (1 and 8, respectively), so they cannot be AND'ed."
    )]
    fn bitand_incompatible_bit_widths_error() {
        let c = Context::new();

        let m = c.module("A");
        let i1 = m.input("i1", 1);
        let i2 = m.input("i2", 8);

        // Panic
        let _ = i1 & i2;
    }

    #[test]
    #[should_panic(expected = "Multiplexer conditionals can only be 1 bit wide.")]
    fn mux_cond_bit_width_error() {
        let c = Context::new();

        let m = c.module("A");
        let cond = m.input("cond", 2);
        let a = m.input("a", 4);
        let b = m.input("b", 4);

        // Panic
        let _ = cond.mux(a, b);
    }

    #[test]
    #[should_panic(
        expected = "Cannot multiplex signals with different bit widths (4 and 5, respectively)."
    )]
    fn mux_true_false_bit_width_error() {
        let c = Context::new();

        let m = c.module("A");
        let cond = m.input("cond", 1);
        let a = m.input("a", 4);
        let b = m.input("b", 5);

        // Panic
        let _ = cond.mux(a, b);
    }
}
