mod constant;
mod context;
mod module;
mod register;
mod signal;

pub use constant::*;
pub use context::*;
pub use module::*;
pub use register::*;
pub use signal::*;
