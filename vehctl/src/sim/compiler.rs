use super::ir::*;

use crate::graph;

use std::collections::HashMap;

pub(crate) struct CompiledRegister<'a> {
    pub data: &'a graph::RegisterData<'a>,
    pub value_name: String,
    pub next_name: String,
}

pub(crate) struct Compiler<'graph> {
    pub regs: Vec<CompiledRegister<'graph>>,
    reg_indices: HashMap<*const graph::Signal<'graph>, usize>,
    signal_exprs: HashMap<*const graph::Signal<'graph>, Expr>,

    pub prop_assignments: Vec<Assignment>,

    local_count: u32,
}

impl<'graph> Compiler<'graph> {
    pub fn new(m: &'graph graph::Module<'graph>) -> Compiler<'graph> {
        let mut regs = Vec::new();
        let mut reg_indices = HashMap::new();
        for (index, reg) in m.registers.borrow().iter().enumerate() {
            let data = match reg.data {
                graph::SignalData::Reg { data } => data,
                _ => unreachable!(),
            };
            let value_name = format!("__reg_{}_{}", data.name, index);
            let next_name = format!("{}_next", value_name);
            reg_indices.insert(*reg as *const _, index);
            regs.push(CompiledRegister {
                data,
                value_name,
                next_name,
            });
        }

        Compiler {
            regs,
            reg_indices,
            signal_exprs: HashMap::new(),

            prop_assignments: Vec::new(),

            local_count: 0,
        }
    }

    pub fn compile_signal(&mut self, signal: &'graph graph::Signal<'graph>) -> Expr {
        let key = signal as *const _;
        if let Some(expr) = self.signal_exprs.get(&key) {
            return expr.clone();
        }

        let expr = match signal.data {
            graph::SignalData::Lit {
                ref value,
                bit_width,
            } => {
                let value = value.numeric_value();
                Expr::Value {
                    value: match ValueType::from_bit_width(bit_width) {
                        ValueType::Bool => Value::Bool(value != 0),
                        ValueType::U32 => Value::U32(value),
                    },
                }
            }

            graph::SignalData::Input {
                ref name,
                bit_width,
            } => {
                let target_type = ValueType::from_bit_width(bit_width);
                let expr = Expr::Ref {
                    name: name.clone(),
                    scope: RefScope::Member,
                };
                self.gen_mask(expr, bit_width, target_type)
            }

            graph::SignalData::Reg { .. } => Expr::Ref {
                name: self.regs[self.reg_indices[&key]].value_name.clone(),
                scope: RefScope::Member,
            },

            graph::SignalData::UnOp { source, op } => {
                let expr = self.compile_signal(source);
                let expr = self.gen_temp(Expr::UnOp {
                    source: Box::new(expr),
                    op: match op {
                        graph::UnOp::Not => UnOp::Not,
                    },
                });

                let bit_width = source.bit_width();
                let target_type = ValueType::from_bit_width(bit_width);
                self.gen_mask(expr, bit_width, target_type)
            }
            graph::SignalData::BinOp { lhs, rhs, op, .. } => {
                let source_type = ValueType::from_bit_width(lhs.bit_width());
                let lhs = self.compile_signal(lhs);
                let rhs = self.compile_signal(rhs);
                let op_input_type = match (op, source_type) {
                    (graph::BinOp::Add | graph::BinOp::Sub, ValueType::Bool) => ValueType::U32,
                    _ => source_type,
                };
                let lhs = self.gen_cast(lhs, source_type, op_input_type);
                let rhs = self.gen_cast(rhs, source_type, op_input_type);
                let expr = match op {
                    graph::BinOp::Add => Expr::UnaryMemberCall {
                        target: Box::new(lhs),
                        name: "wrapping_add",
                        arg: Box::new(rhs),
                    },
                    graph::BinOp::Sub => Expr::UnaryMemberCall {
                        target: Box::new(lhs),
                        name: "wrapping_sub",
                        arg: Box::new(rhs),
                    },
                    _ => Expr::BinOp {
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                        op: match op {
                            graph::BinOp::BitAnd => BinOp::BitAnd,
                            graph::BinOp::BitOr => BinOp::BitOr,
                            graph::BinOp::Equal => BinOp::Equal,
                            graph::BinOp::LessThan => BinOp::LessThan,
                            graph::BinOp::GreaterThan => BinOp::GreaterThan,
                            graph::BinOp::Add | graph::BinOp::Sub => unreachable!(),
                        },
                    },
                };
                let expr = self.gen_temp(expr);
                let op_output_type = if op.is_comparison() {
                    ValueType::Bool
                } else {
                    op_input_type
                };
                let target_bit_width = signal.bit_width();
                let target_type = ValueType::from_bit_width(target_bit_width);
                let expr = self.gen_cast(expr, op_output_type, target_type);
                self.gen_mask(expr, target_bit_width, target_type)
            }

            graph::SignalData::Bits {
                source, range_low, ..
            } => {
                let expr = self.compile_signal(source);
                let expr = self.gen_shift_right(expr, range_low);
                let target_bit_width = signal.bit_width();
                let target_type = ValueType::from_bit_width(target_bit_width);
                let expr = self.gen_cast(
                    expr,
                    ValueType::from_bit_width(source.bit_width()),
                    target_type,
                );
                self.gen_mask(expr, target_bit_width, target_type)
            }

            graph::SignalData::Repeat { source, count } => {
                let expr = self.compile_signal(source);
                let mut expr = self.gen_cast(
                    expr,
                    ValueType::from_bit_width(source.bit_width()),
                    ValueType::from_bit_width(signal.bit_width()),
                );

                if count > 1 {
                    let source_expr = expr.clone();

                    for i in 1..count {
                        let rhs = self.gen_shift_left(source_expr.clone(), i * source.bit_width());
                        expr = self.gen_temp(Expr::BinOp {
                            lhs: Box::new(expr),
                            rhs: Box::new(rhs),
                            op: BinOp::BitOr,
                        });
                    }
                }

                expr
            }
            graph::SignalData::Concat { lhs, rhs } => {
                let lhs_type = ValueType::from_bit_width(lhs.bit_width());
                let rhs_bit_width = rhs.bit_width();
                let rhs_type = ValueType::from_bit_width(rhs_bit_width);
                let lhs = self.compile_signal(lhs);
                let rhs = self.compile_signal(rhs);
                let target_type = ValueType::from_bit_width(signal.bit_width());
                let lhs = self.gen_cast(lhs, lhs_type, target_type);
                let rhs = self.gen_cast(rhs, rhs_type, target_type);
                let lhs = self.gen_shift_left(lhs, rhs_bit_width);
                self.gen_temp(Expr::BinOp {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    op: BinOp::BitOr,
                })
            }

            graph::SignalData::Mux {
                cond,
                when_true,
                when_false,
            } => {
                let cond = self.compile_signal(cond);
                let when_true = self.compile_signal(when_true);
                let when_false = self.compile_signal(when_false);
                self.gen_temp(Expr::Ternary {
                    cond: Box::new(cond),
                    when_true: Box::new(when_true),
                    when_false: Box::new(when_false),
                })
            }
        };
        self.signal_exprs.insert(key, expr.clone());

        expr
    }

    fn gen_temp(&mut self, expr: Expr) -> Expr {
        let target_name = format!("__temp_{}", self.local_count);
        self.local_count += 1;
        self.prop_assignments.push(Assignment {
            target_scope: TargetScope::Local,
            target_name: target_name.clone(),
            expr,
        });

        Expr::Ref {
            name: target_name,
            scope: RefScope::Local,
        }
    }

    fn gen_mask(&mut self, expr: Expr, bit_width: u32, target_type: ValueType) -> Expr {
        if bit_width == target_type.bit_width() {
            return expr;
        }

        let mask = ((1u64 << bit_width) - 1) as u32;
        self.gen_temp(Expr::BinOp {
            lhs: Box::new(expr),
            rhs: Box::new(Expr::Value {
                value: match target_type {
                    ValueType::Bool => unreachable!(),
                    ValueType::U32 => Value::U32(mask),
                },
            }),
            op: BinOp::BitAnd,
        })
    }

    fn gen_shift_left(&mut self, expr: Expr, shift: u32) -> Expr {
        if shift == 0 {
            return expr;
        }

        self.gen_temp(Expr::BinOp {
            lhs: Box::new(expr),
            rhs: Box::new(Expr::Value {
                value: Value::U32(shift),
            }),
            op: BinOp::Shl,
        })
    }

    fn gen_shift_right(&mut self, expr: Expr, shift: u32) -> Expr {
        if shift == 0 {
            return expr;
        }

        self.gen_temp(Expr::BinOp {
            lhs: Box::new(expr),
            rhs: Box::new(Expr::Value {
                value: Value::U32(shift),
            }),
            op: BinOp::Shr,
        })
    }

    fn gen_cast(&mut self, expr: Expr, source_type: ValueType, target_type: ValueType) -> Expr {
        if source_type == target_type {
            return expr;
        }

        if target_type == ValueType::Bool {
            let expr = self.gen_mask(expr, 1, source_type);
            return self.gen_temp(Expr::BinOp {
                lhs: Box::new(expr),
                rhs: Box::new(Expr::Value {
                    value: source_type.zero(),
                }),
                op: BinOp::NotEqual,
            });
        }

        self.gen_temp(Expr::Cast {
            source: Box::new(expr),
            target_type,
        })
    }
}
