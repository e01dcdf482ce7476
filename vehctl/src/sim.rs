//! Rust simulator code generation.
//!
//! [`generate`] writes a single Rust `struct` for a [`Module`](crate::Module): one `pub` field per input and output port, private fields holding register state, and the following methods:
//!
//! - `new()`: creates an instance with every register at its reset value,
//! - `reset(&mut self)`: returns every register to its reset value,
//! - `prop(&mut self)`: propagates the current inputs and register values to the outputs and register next values,
//! - `posedge_clk(&mut self)`: latches every register's next value.
//!
//! A typical clock cycle is driven by setting inputs, then calling `prop()`, `posedge_clk()` and `prop()` again before reading outputs.

mod compiler;
mod ir;
mod validation;

use compiler::*;
use ir::*;
use validation::*;

use crate::code_writer;
use crate::graph;

use std::io::{Result, Write};

/// Writes Rust simulator code for `m` to `w`.
///
/// # Panics
///
/// Panics if any register in `m` has not been driven.
///
/// # Examples
///
/// ```
/// # fn main() -> std::io::Result<()> {
/// use vehctl::*;
///
/// let c = Context::new();
///
/// let m = c.module("Counter");
/// let r = m.reg("count", 4);
/// r.drive_next(r.value + m.lit(1u32, 4));
/// m.output("count", r.value);
///
/// let mut code = Vec::new();
/// sim::generate(m, &mut code)?;
/// assert!(String::from_utf8_lossy(&code).contains("pub struct Counter {"));
/// # Ok(())
/// # }
/// ```
pub fn generate<'a, W: Write>(m: &'a graph::Module<'a>, w: W) -> Result<()> {
    validate_module(m);

    let mut c = Compiler::new(m);

    for (name, output) in m.outputs.borrow().iter() {
        let expr = c.compile_signal(*output);
        c.prop_assignments.push(Assignment {
            target_scope: TargetScope::Member,
            target_name: name.clone(),
            expr,
        });
    }

    let next_signals = c
        .regs
        .iter()
        .filter_map(|reg| {
            let next = *reg.data.next.borrow();
            next.map(|next| (reg.next_name.clone(), next))
        })
        .collect::<Vec<_>>();
    for (next_name, next) in next_signals {
        let expr = c.compile_signal(next);
        c.prop_assignments.push(Assignment {
            target_scope: TargetScope::Member,
            target_name: next_name,
            expr,
        });
    }

    let mut w = code_writer::CodeWriter::new(w);

    w.append_line("#[allow(non_camel_case_types)]")?;
    w.append_line("#[derive(Default)]")?;
    w.append_line(&format!("pub struct {} {{", m.name))?;
    w.indent();

    let inputs = m.inputs.borrow();
    if !inputs.is_empty() {
        w.append_line("// Inputs")?;
        for (name, input) in inputs.iter() {
            w.append_line(&format!(
                "pub {}: {}, // {} bit(s)",
                name,
                ValueType::from_bit_width(input.bit_width()).name(),
                input.bit_width()
            ))?;
        }
    }

    let outputs = m.outputs.borrow();
    if !outputs.is_empty() {
        w.append_line("// Outputs")?;
        for (name, output) in outputs.iter() {
            w.append_line(&format!(
                "pub {}: {}, // {} bit(s)",
                name,
                ValueType::from_bit_width(output.bit_width()).name(),
                output.bit_width()
            ))?;
        }
    }

    if !c.regs.is_empty() {
        w.append_line("// Regs")?;
        for reg in c.regs.iter() {
            let type_name = ValueType::from_bit_width(reg.data.bit_width).name();
            w.append_line(&format!(
                "{}: {}, // {} bit(s)",
                reg.value_name, type_name, reg.data.bit_width
            ))?;
            w.append_line(&format!("{}: {},", reg.next_name, type_name))?;
        }
    }

    w.unindent();
    w.append_line("}")?;
    w.append_newline()?;

    w.append_line(&format!("impl {} {{", m.name))?;
    w.indent();

    w.append_line(&format!("pub fn new() -> {} {{", m.name))?;
    w.indent();
    w.append_line(&format!("let mut ret = {}::default();", m.name))?;
    w.append_line("ret.reset();")?;
    w.append_line("ret")?;
    w.unindent();
    w.append_line("}")?;
    w.append_newline()?;

    w.append_line("pub fn reset(&mut self) {")?;
    w.indent();

    for reg in c.regs.iter() {
        let value_type = ValueType::from_bit_width(reg.data.bit_width);
        let value = match *reg.data.initial_value.borrow() {
            Some(initial_value) => match value_type {
                ValueType::Bool => Value::Bool(initial_value.numeric_value() != 0),
                ValueType::U32 => Value::U32(initial_value.numeric_value()),
            },
            None => value_type.zero(),
        };
        w.append_indent()?;
        Assignment {
            target_scope: TargetScope::Member,
            target_name: reg.value_name.clone(),
            expr: Expr::Value { value },
        }
        .write(&mut w)?;
    }

    w.unindent();
    w.append_line("}")?;
    w.append_newline()?;

    w.append_line("pub fn posedge_clk(&mut self) {")?;
    w.indent();

    for reg in c.regs.iter() {
        w.append_line(&format!(
            "self.{} = self.{};",
            reg.value_name, reg.next_name
        ))?;
    }

    w.unindent();
    w.append_line("}")?;
    w.append_newline()?;

    w.append_line("pub fn prop(&mut self) {")?;
    w.indent();

    for assignment in c.prop_assignments.iter() {
        w.append_indent()?;
        assignment.write(&mut w)?;
    }

    w.unindent();
    w.append_line("}")?;

    w.unindent();
    w.append_line("}")?;
    w.append_newline()?;

    Ok(())
}
