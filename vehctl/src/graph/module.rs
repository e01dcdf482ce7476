use super::constant::*;
use super::context::*;
use super::register::*;
use super::signal::*;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ptr;

/// A self-contained hardware design unit, created by the [`Context::module`] method.
///
/// # Examples
///
/// ```
/// use vehctl::*;
///
/// let c = Context::new();
///
/// let m = c.module("MyModule");
/// m.output("out", m.input("in", 1));
/// ```
#[must_use]
pub struct Module<'a> {
    context: &'a Context<'a>,

    pub(crate) name: String,

    pub(crate) inputs: RefCell<BTreeMap<String, &'a Signal<'a>>>,
    pub(crate) outputs: RefCell<BTreeMap<String, &'a Signal<'a>>>,
    pub(crate) registers: RefCell<Vec<&'a Signal<'a>>>,
}

impl<'a> Module<'a> {
    pub(super) fn new(context: &'a Context<'a>, name: String) -> Module<'a> {
        Module {
            context,

            name,

            inputs: RefCell::new(BTreeMap::new()),
            outputs: RefCell::new(BTreeMap::new()),
            registers: RefCell::new(Vec::new()),
        }
    }

    /// Returns the name of this `Module`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a [`Signal`] that represents the constant literal specified by `value` with `bit_width` bits.
    ///
    /// The bit width of the type provided by `value` doesn't need to match `bit_width`, but the value represented by `value` must fit into `bit_width` bits.
    ///
    /// # Panics
    ///
    /// Panics if `bit_width` is less than [`MIN_SIGNAL_BIT_WIDTH`] or greater than [`MAX_SIGNAL_BIT_WIDTH`], respectively, or if the specified `value` doesn't fit into `bit_width` bits.
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
    /// let eight_bit_const = m.lit(0xffu32, 8);
    /// let one_bit_const = m.lit(0u32, 1);
    /// let twenty_seven_bit_const = m.lit(true, 27);
    /// ```
    pub fn lit<C: Into<Constant>>(&'a self, value: C, bit_width: u32) -> &'a Signal<'a> {
        check_bit_width("a literal", bit_width);
        let value = value.into();
        let required_bits = value.required_bits();
        if required_bits > bit_width {
            let numeric_value = value.numeric_value();
            panic!("Cannot fit the specified value '{}' into the specified bit width '{}'. The value '{}' requires a bit width of at least {} bit(s).", numeric_value, bit_width, numeric_value, required_bits);
        }
        self.signal(SignalData::Lit { value, bit_width })
    }

    /// Convenience method to create a [`Signal`] that represents a single `0` bit.
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
    /// // The following two signals are semantically equivalent:
    /// let low1 = m.low();
    /// let low2 = m.lit(false, 1);
    /// ```
    pub fn low(&'a self) -> &'a Signal<'a> {
        self.lit(false, 1)
    }

    /// Convenience method to create a [`Signal`] that represents a single `1` bit.
    pub fn high(&'a self) -> &'a Signal<'a> {
        self.lit(true, 1)
    }

    /// Creates an input for this `Module` called `name` with `bit_width` bits, and returns a [`Signal`] that represents the value of this input.
    ///
    /// Generated simulators store inputs in native integer fields which may be wider than `bit_width`. Any bits beyond `bit_width` are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `bit_width` is less than [`MIN_SIGNAL_BIT_WIDTH`] or greater than [`MAX_SIGNAL_BIT_WIDTH`], respectively, or if this `Module` already has a port called `name`.
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
    /// let my_input = m.input("my_input", 8);
    /// ```
    pub fn input<S: Into<String>>(&'a self, name: S, bit_width: u32) -> &'a Signal<'a> {
        let name = name.into();
        check_bit_width("an input", bit_width);
        self.check_port_name(&name);
        let input = self.signal(SignalData::Input {
            name: name.clone(),
            bit_width,
        });
        self.inputs.borrow_mut().insert(name, input);
        input
    }

    /// Creates an output for this `Module` called `name` with the same number of bits as `source`, and drives this output with `source`.
    ///
    /// # Panics
    ///
    /// Panics if `source` doesn't belong to this `Module`, or if this `Module` already has a port called `name`.
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
    /// let some_signal = m.high();
    /// m.output("my_output", some_signal);
    /// ```
    pub fn output<S: Into<String>>(&'a self, name: S, source: &'a Signal<'a>) {
        if !ptr::eq(self, source.module) {
            panic!("Cannot output a signal from another module.");
        }
        let name = name.into();
        self.check_port_name(&name);
        self.outputs.borrow_mut().insert(name, source);
    }

    /// Creates a [`Register`] in this `Module` called `name` with `bit_width` bits.
    ///
    /// # Panics
    ///
    /// Panics if `bit_width` is less than [`MIN_SIGNAL_BIT_WIDTH`] or greater than [`MAX_SIGNAL_BIT_WIDTH`], respectively.
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
    /// let my_reg = m.reg("my_reg", 32);
    /// my_reg.default_value(0xfadebabeu32);
    /// my_reg.drive_next(!my_reg.value);
    /// m.output("my_output", my_reg.value);
    /// ```
    pub fn reg<S: Into<String>>(&'a self, name: S, bit_width: u32) -> &'a Register<'a> {
        check_bit_width("a register", bit_width);
        let data: &'a RegisterData<'a> = self.context.register_data_arena.alloc(RegisterData {
            name: name.into(),
            initial_value: RefCell::new(None),
            bit_width,
            next: RefCell::new(None),
        });
        let value = self.signal(SignalData::Reg { data });
        self.registers.borrow_mut().push(value);
        self.context.register_arena.alloc(Register { data, value })
    }

    pub(super) fn signal(&'a self, data: SignalData<'a>) -> &'a Signal<'a> {
        self.context.signal_arena.alloc(Signal {
            module: self,

            data,
        })
    }

    fn check_port_name(&self, name: &str) {
        if self.inputs.borrow().contains_key(name) || self.outputs.borrow().contains_key(name) {
            panic!(
                "Module \"{}\" already has a port called \"{}\".",
                self.name, name
            );
        }
    }
}

fn check_bit_width(what: &str, bit_width: u32) {
    if bit_width < MIN_SIGNAL_BIT_WIDTH {
        panic!(
            "Cannot create {} with {} bit(s). Signals must not be narrower than {} bit(s).",
            what, bit_width, MIN_SIGNAL_BIT_WIDTH
        );
    }
    if bit_width > MAX_SIGNAL_BIT_WIDTH {
        panic!(
            "Cannot create {} with {} bit(s). Signals must not be wider than {} bit(s).",
            what, bit_width, MAX_SIGNAL_BIT_WIDTH
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(
        expected = "Cannot create a literal with 0 bit(s). Signals must not be narrower than 1 bit(s)."
    )]
    fn lit_bit_width_lt_min_error() {
        let c = Context::new();

        let m = c.module("A");

        // Panic
        let _ = m.lit(false, 0);
    }

    #[test]
    #[should_panic(
        expected = "Cannot create a literal with 33 bit(s). Signals must not be wider than 32 bit(s)."
    )]
    fn lit_bit_width_gt_max_error() {
        let c = Context::new();

        let m = c.module("A");

        // Panic
        let _ = m.lit(false, 33);
    }

    #[test]
    #[should_panic(
        expected = "Cannot fit the specified value '128' into the specified bit width '7'. The value '128' requires a bit width of at least 8 bit(s)."
    )]
    fn lit_value_cannot_fit_into_bit_width_error() {
        let c = Context::new();

        let m = c.module("A");

        // Panic
        let _ = m.lit(128u32, 7);
    }

    #[test]
    #[should_panic(
        expected = "Cannot create an input with 0 bit(s). Signals must not be narrower than 1 bit(s)."
    )]
    fn input_width_lt_min_error() {
        let c = Context::new();

        let m = c.module("A");

        // Panic
        let _ = m.input("i", 0);
    }

    #[test]
    #[should_panic(expected = "Module \"A\" already has a port called \"i\".")]
    fn duplicate_port_name_error() {
        let c = Context::new();

        let m = c.module("A");
        let i = m.input("i", 1);

        // Panic
        m.output("i", i);
    }

    #[test]
    #[should_panic(expected = "Cannot output a signal from another module.")]
    fn output_separate_module_error() {
        let c = Context::new();

        let m1 = c.module("A");
        let i = m1.high();

        let m2 = c.module("B");

        // Panic
        m2.output("o", i);
    }

    #[test]
    #[should_panic(
        expected = "Cannot create a register with 33 bit(s). Signals must not be wider than 32 bit(s)."
    )]
    fn reg_bit_width_gt_max_error() {
        let c = Context::new();

        let m = c.module("A");

        // Panic
        let _ = m.reg("r", 33);
    }

    #[test]
    fn ports_are_recorded_by_name() {
        let c = Context::new();

        let m = c.module("A");
        let i = m.input("i", 8);
        m.output("o", !i);
        let _ = m.reg("r", 3);

        assert_eq!(m.name(), "A");
        assert_eq!(m.inputs.borrow().len(), 1);
        assert_eq!(m.outputs.borrow()["o"].bit_width(), 8);
        assert_eq!(m.registers.borrow().len(), 1);
    }
}
