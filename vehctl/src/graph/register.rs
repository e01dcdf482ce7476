use super::constant::*;
use super::signal::*;

use std::cell::RefCell;
use std::ptr;

/// A hardware register, created by the [`Module::reg`](crate::Module::reg) method.
///
/// A `Register` is a stateful component that behaves like a D flip-flop (more precisely as a positive-edge-triggered D flip-flop).
///
/// It always has a current value represented by the [`value`] field (of type [`Signal`]) and a next value specified by the [`drive_next`] method.
/// The register's value is updated with its next value on each positive clock edge.
///
/// The reset value is specified by the [`default_value`] method; registers without one start at zero.
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
/// my_reg.default_value(0xfadebabeu32); // Optional
/// my_reg.drive_next(!my_reg.value);
/// m.output("my_output", my_reg.value);
/// ```
///
/// [`default_value`]: Register::default_value
/// [`drive_next`]: Register::drive_next
/// [`value`]: Register::value
#[must_use]
pub struct Register<'a> {
    pub(crate) data: &'a RegisterData<'a>,

    /// This `Register`'s current value.
    pub value: &'a Signal<'a>,
}

impl<'a> Register<'a> {
    /// Specifies the value this `Register` takes when its simulator is reset.
    ///
    /// # Panics
    ///
    /// Panics if this `Register` already has a default value, or if `value` doesn't fit into this `Register`'s bit width.
    pub fn default_value<C: Into<Constant>>(&'a self, value: C) {
        if self.data.initial_value.borrow().is_some() {
            panic!(
                "Attempted to specify a default value for register \"{}\" in module \"{}\", but this register already has a default value.",
                self.data.name,
                self.value.module.name
            );
        }
        let value = value.into();
        let required_bits = value.required_bits();
        if required_bits > self.data.bit_width {
            let numeric_value = value.numeric_value();
            panic!("Cannot fit the specified value '{}' into register \"{}\"'s bit width '{}'. The value '{}' requires a bit width of at least {} bit(s).", numeric_value, self.data.name, self.data.bit_width, numeric_value, required_bits);
        }
        *self.data.initial_value.borrow_mut() = Some(value);
    }

    /// Specifies the next value for this `Register`.
    ///
    /// Every register must be driven exactly once before code can be generated for its module.
    ///
    /// # Panics
    ///
    /// Panics if `self` and `n` belong to different `Module`s, if their bit widths differ, or if this `Register`'s next value is already driven.
    pub fn drive_next(&'a self, n: &'a Signal<'a>) {
        if !ptr::eq(self.value.module, n.module) {
            panic!(
                "Attempted to drive register \"{}\"'s next value with a signal from another module.",
                self.data.name
            );
        }
        if n.bit_width() != self.data.bit_width {
            panic!("Attempted to drive register \"{}\"'s next value with a signal that has {} bit(s), but the register has {} bit(s).", self.data.name, n.bit_width(), self.data.bit_width);
        }
        if self.data.next.borrow().is_some() {
            panic!(
                "Attempted to drive register \"{}\"'s next value in module \"{}\", but this register's next value is already driven.",
                self.data.name,
                self.value.module.name
            );
        }
        *self.data.next.borrow_mut() = Some(n);
    }
}

pub(crate) struct RegisterData<'a> {
    pub name: String,
    pub initial_value: RefCell<Option<Constant>>,
    pub bit_width: u32,
    pub next: RefCell<Option<&'a Signal<'a>>>,
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    #[should_panic(
        expected = "Attempted to specify a default value for register \"r\" in module \"A\", but this register already has a default value."
    )]
    fn default_value_already_specified_error() {
        let c = Context::new();

        let m = c.module("A");
        let r = m.reg("r", 32);

        r.default_value(0xfadebabeu32);

        // Panic
        r.default_value(0xdeadbeefu32);
    }

    #[test]
    #[should_panic(
        expected = "Cannot fit the specified value '5' into register \"r\"'s bit width '2'. The value '5' requires a bit width of at least 3 bit(s)."
    )]
    fn default_value_cannot_fit_error() {
        let c = Context::new();

        let m = c.module("A");
        let r = m.reg("r", 2);

        // Panic
        r.default_value(5u32);
    }

    #[test]
    #[should_panic(
        expected = "Attempted to drive register \"r\"'s next value with a signal from another module."
    )]
    fn drive_next_separate_module_error() {
        let c = Context::new();

        let m1 = c.module("A");
        let r = m1.reg("r", 1);

        let m2 = c.module("B");
        let i = m2.high();

        // Panic
        r.drive_next(i);
    }

    #[test]
    #[should_panic(
        expected = "Attempted to drive register \"r\"'s next value with a signal that has 1 bit(s), but the register has 8 bit(s)."
    )]
    fn drive_next_incompatible_bit_width_error() {
        let c = Context::new();

        let m = c.module("A");
        let r = m.reg("r", 8);

        // Panic
        r.drive_next(m.high());
    }

    #[test]
    #[should_panic(
        expected = "Attempted to drive register \"r\"'s next value in module \"A\", but this register's next value is already driven."
    )]
    fn drive_next_already_driven_error() {
        let c = Context::new();

        let m = c.module("A");
        let r = m.reg("r", 1);
        r.drive_next(m.high());

        // Panic
        r.drive_next(m.low());
    }
}
