/// A container for the integer constant values a literal or register reset value can hold.
///
/// This type isn't typically used explicitly, as the graph API always takes `Constant` parameters as `Into<Constant>`. Prefer passing `bool`, `u8`, `u16` or `u32` values directly.
///
/// # Examples
///
/// ```
/// use vehctl::*;
///
/// let c = Context::new();
///
/// let m = c.module("my_module");
///
/// let a = m.lit(true, 1);
/// let b = m.lit(0xf0u8, 8);
/// let r = m.reg("counter", 3);
/// r.default_value(5u32);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Constant {
    /// Contains a boolean value
    Bool(bool),
    /// Contains an unsigned, 32-bit value
    U32(u32),
}

impl Constant {
    pub(crate) fn required_bits(&self) -> u32 {
        32 - self.numeric_value().leading_zeros()
    }

    pub(crate) fn numeric_value(&self) -> u32 {
        match *self {
            Constant::Bool(value) => value.into(),
            Constant::U32(value) => value,
        }
    }
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        Constant::Bool(value)
    }
}

impl From<u8> for Constant {
    fn from(value: u8) -> Self {
        Constant::U32(value.into())
    }
}

impl From<u16> for Constant {
    fn from(value: u16) -> Self {
        Constant::U32(value.into())
    }
}

impl From<u32> for Constant {
    fn from(value: u32) -> Self {
        Constant::U32(value)
    }
}
