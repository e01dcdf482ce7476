use crate::code_writer;

use std::io::{Result, Write};

pub struct Assignment {
    pub target_scope: TargetScope,
    pub target_name: String,
    pub expr: Expr,
}

impl Assignment {
    pub fn write<W: Write>(&self, w: &mut code_writer::CodeWriter<W>) -> Result<()> {
        match self.target_scope {
            TargetScope::Local => w.append("let ")?,
            TargetScope::Member => w.append("self.")?,
        }
        w.append(&format!("{} = ", self.target_name))?;
        self.expr.write(w)?;
        w.append(";")?;
        w.append_newline()
    }
}

#[derive(Clone, Copy)]
pub enum TargetScope {
    Local,
    Member,
}

#[derive(Clone)]
pub enum Expr {
    BinOp {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        op: BinOp,
    },
    Cast {
        source: Box<Expr>,
        target_type: ValueType,
    },
    Ref {
        name: String,
        scope: RefScope,
    },
    Ternary {
        cond: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    UnaryMemberCall {
        target: Box<Expr>,
        name: &'static str,
        arg: Box<Expr>,
    },
    UnOp {
        source: Box<Expr>,
        op: UnOp,
    },
    Value {
        value: Value,
    },
}

impl Expr {
    pub fn write<W: Write>(&self, w: &mut code_writer::CodeWriter<W>) -> Result<()> {
        match *self {
            Expr::BinOp {
                ref lhs,
                ref rhs,
                op,
            } => {
                w.append("(")?;
                lhs.write(w)?;
                w.append(&format!(
                    " {} ",
                    match op {
                        BinOp::BitAnd => "&",
                        BinOp::BitOr => "|",
                        BinOp::Equal => "==",
                        BinOp::NotEqual => "!=",
                        BinOp::LessThan => "<",
                        BinOp::GreaterThan => ">",
                        BinOp::Shl => "<<",
                        BinOp::Shr => ">>",
                    }
                ))?;
                rhs.write(w)?;
                w.append(")")?;
            }
            Expr::Cast {
                ref source,
                target_type,
            } => {
                w.append("(")?;
                source.write(w)?;
                w.append(&format!(" as {})", target_type.name()))?;
            }
            Expr::Ref { ref name, scope } => {
                if let RefScope::Member = scope {
                    w.append("self.")?;
                }
                w.append(name)?;
            }
            Expr::Ternary {
                ref cond,
                ref when_true,
                ref when_false,
            } => {
                w.append("if ")?;
                cond.write(w)?;
                w.append(" { ")?;
                when_true.write(w)?;
                w.append(" } else { ")?;
                when_false.write(w)?;
                w.append(" }")?;
            }
            Expr::UnaryMemberCall {
                ref target,
                name,
                ref arg,
            } => {
                target.write(w)?;
                w.append(&format!(".{}(", name))?;
                arg.write(w)?;
                w.append(")")?;
            }
            Expr::UnOp { ref source, op } => {
                w.append(match op {
                    UnOp::Not => "!",
                })?;
                source.write(w)?;
            }
            Expr::Value { value } => {
                w.append(&match value {
                    Value::Bool(value) => format!("{}", value),
                    Value::U32(value) => format!("0x{:x}u32", value),
                })?;
            }
        }

        Ok(())
    }
}

#[derive(Clone, Copy)]
pub enum BinOp {
    BitAnd,
    BitOr,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    Shl,
    Shr,
}

#[derive(Clone, Copy)]
pub enum RefScope {
    Local,
    Member,
}

#[derive(Clone, Copy)]
pub enum UnOp {
    Not,
}

#[derive(Clone, Copy)]
pub enum Value {
    Bool(bool),
    U32(u32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueType {
    Bool,
    U32,
}

impl ValueType {
    pub fn from_bit_width(bit_width: u32) -> ValueType {
        if bit_width == 1 {
            ValueType::Bool
        } else if bit_width <= 32 {
            ValueType::U32
        } else {
            unreachable!()
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::U32 => "u32",
        }
    }

    pub fn bit_width(&self) -> u32 {
        match self {
            ValueType::Bool => 1,
            ValueType::U32 => 32,
        }
    }

    pub fn zero(&self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::U32 => Value::U32(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(expr: &Expr) -> String {
        let mut buf = Vec::new();
        expr.write(&mut code_writer::CodeWriter::new(&mut buf)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn nested_exprs() {
        let a = Expr::Ref {
            name: "a".into(),
            scope: RefScope::Member,
        };
        let b = Expr::Ref {
            name: "__temp_0".into(),
            scope: RefScope::Local,
        };

        let masked = Expr::BinOp {
            lhs: Box::new(a.clone()),
            rhs: Box::new(Expr::Value {
                value: Value::U32(0xff),
            }),
            op: BinOp::BitAnd,
        };
        assert_eq!(render(&masked), "(self.a & 0xffu32)");

        let sum = Expr::UnaryMemberCall {
            target: Box::new(a),
            name: "wrapping_add",
            arg: Box::new(b.clone()),
        };
        assert_eq!(render(&sum), "self.a.wrapping_add(__temp_0)");

        let mux = Expr::Ternary {
            cond: Box::new(Expr::UnOp {
                source: Box::new(b),
                op: UnOp::Not,
            }),
            when_true: Box::new(Expr::Value {
                value: Value::Bool(true),
            }),
            when_false: Box::new(Expr::Cast {
                source: Box::new(Expr::Value {
                    value: Value::U32(1),
                }),
                target_type: ValueType::U32,
            }),
        };
        assert_eq!(
            render(&mux),
            "if !__temp_0 { true } else { (0x1u32 as u32) }"
        );
    }
}
