//! Expression evaluation.

use std::rc::Rc;

use mimo_diagnostic::{suggest_nearest, MimoError};
use mimo_ir::{BinaryOp, Element, Expr, ExprKind, Literal, Location, ObjectEntry, TemplatePart, UnaryOp};
use mimo_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors;
use crate::function::FunctionValue;
use crate::value::{ObjectMap, Value, MAX_COLLECTION_LEN};

impl Interpreter {
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, MimoError> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> Result<Value, MimoError> {
        let loc = &expr.location;
        match &expr.kind {
            ExprKind::Identifier(name) => self.lookup_identifier(name, loc),
            ExprKind::Literal(lit) => Ok(literal_value(lit)),
            ExprKind::Binary { op, left, right } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                binary_op(*op, &l, &r, loc)
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                match op {
                    UnaryOp::Neg => match value {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        other => Err(errors::unary_minus_type(other.type_name(), loc.clone())),
                    },
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                }
            }
            ExprKind::Array(elements) => self.eval_array_literal(elements),
            ExprKind::Object(entries) => self.eval_object_literal(entries),
            ExprKind::PropertyAccess {
                object,
                property,
                safe,
            } => {
                let target = self.eval_expr(object)?;
                property_of(&target, property, *safe, loc)
            }
            ExprKind::ArrayAccess {
                object,
                index,
                safe,
            } => {
                let target = self.eval_expr(object)?;
                if *safe && target.is_null() {
                    return Ok(Value::Null);
                }
                let key = self.eval_expr(index)?;
                index_into(&target, &key, &object.location)
            }
            ExprKind::ModuleAccess { module, property } => {
                self.eval_module_access(module, property, loc)
            }
            ExprKind::Call {
                callee,
                arguments,
                safe,
            } => self.eval_call(callee, arguments, *safe, loc),
            ExprKind::Template(parts) => {
                let mut out = String::new();
                for part in parts {
                    match part {
                        TemplatePart::Text(text) => out.push_str(text),
                        TemplatePart::Expr(inner) => {
                            let value = self.eval_expr(inner)?;
                            out.push_str(&value.to_string());
                        }
                    }
                }
                Ok(Value::from(out))
            }
            ExprKind::Function(def) => Ok(Value::Function(Rc::new(FunctionValue::new(
                Rc::clone(def),
                self.env.clone(),
            )))),
            ExprKind::InlineIf {
                condition,
                consequent,
                alternate,
            } => {
                if self.eval_expr(condition)?.is_truthy() {
                    self.eval_expr(consequent)
                } else {
                    self.eval_expr(alternate)
                }
            }
            ExprKind::Pipe {
                value,
                callee,
                arguments,
            } => {
                let piped = self.eval_expr(value)?;
                let func = self.eval_expr(callee)?;
                if !func.is_callable() {
                    return Err(errors::not_callable(&callee.callee_name(), loc.clone()));
                }
                let mut args = vec![piped];
                args.extend(self.eval_arguments(arguments)?);
                self.call_value(&func, args, loc, &callee.callee_name())
            }
        }
    }

    fn lookup_identifier(&self, name: &str, loc: &Location) -> Result<Value, MimoError> {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        let visible = self.env.visible_names();
        let nearest = suggest_nearest(name, visible.iter().map(String::as_str));
        Err(errors::undefined_variable(name, nearest, loc.clone()))
    }

    fn eval_array_literal(&mut self, elements: &[Element]) -> Result<Value, MimoError> {
        let mut items = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                Element::Item(expr) => items.push(self.eval_expr(expr)?),
                Element::Spread(expr) => match self.eval_expr(expr)? {
                    Value::Array(spread) => items.extend(spread.borrow().iter().cloned()),
                    other => {
                        return Err(errors::spread_non_array(
                            other.type_name(),
                            expr.location.clone(),
                        ))
                    }
                },
            }
        }
        Ok(Value::array(items))
    }

    fn eval_object_literal(&mut self, entries: &[ObjectEntry]) -> Result<Value, MimoError> {
        let mut map = ObjectMap::new();
        for entry in entries {
            match entry {
                ObjectEntry::Property { key, value } => {
                    let value = self.eval_expr(value)?;
                    map.insert(key.as_str(), value);
                }
                ObjectEntry::Spread(expr) => match self.eval_expr(expr)? {
                    Value::Object(spread) => {
                        for (key, value) in spread.borrow().iter() {
                            map.insert(key, value.clone());
                        }
                    }
                    other => {
                        return Err(errors::spread_non_object(
                            other.type_name(),
                            expr.location.clone(),
                        ))
                    }
                },
            }
        }
        Ok(Value::object(map))
    }

    /// `module.member`: the module is an ordinary binding holding an object.
    fn eval_module_access(
        &self,
        module: &str,
        property: &str,
        loc: &Location,
    ) -> Result<Value, MimoError> {
        let target = self.lookup_identifier(module, loc)?;
        let Value::Object(map) = &target else {
            return Err(errors::module_access_non_object(module, loc.clone()));
        };
        let map = map.borrow();
        if let Some(value) = map.get(property) {
            return Ok(value.clone());
        }
        let mut available: Vec<String> = map.keys().map(str::to_string).collect();
        available.sort();
        let nearest = suggest_nearest(property, available.iter().map(String::as_str));
        Err(errors::module_property_missing(
            property,
            module,
            &available,
            nearest,
            loc.clone(),
        ))
    }

    /// Evaluate call arguments, flattening `...spread` arrays.
    pub(crate) fn eval_arguments(&mut self, arguments: &[Element]) -> Result<Vec<Value>, MimoError> {
        let mut args = Vec::with_capacity(arguments.len());
        for arg in arguments {
            match arg {
                Element::Item(expr) => args.push(self.eval_expr(expr)?),
                Element::Spread(expr) => match self.eval_expr(expr)? {
                    Value::Array(spread) => args.extend(spread.borrow().iter().cloned()),
                    _ => return Err(errors::spread_argument_non_array(expr.location.clone())),
                },
            }
        }
        Ok(args)
    }
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::from(s.as_str()),
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}

/// Apply a binary operator to evaluated operands.
pub(crate) fn binary_op(op: BinaryOp, l: &Value, r: &Value, loc: &Location) -> Result<Value, MimoError> {
    let value = match op {
        BinaryOp::Eq => Value::Bool(l.strict_equals(r)),
        BinaryOp::NotEq => Value::Bool(!l.strict_equals(r)),
        BinaryOp::And => Value::Bool(l.is_truthy() && r.is_truthy()),
        BinaryOp::Or => Value::Bool(l.is_truthy() || r.is_truthy()),
        BinaryOp::Coalesce => {
            if l.is_null() {
                r.clone()
            } else {
                l.clone()
            }
        }
        BinaryOp::Add if matches!(l, Value::String(_)) || matches!(r, Value::String(_)) => {
            Value::from(format!("{l}{r}"))
        }
        BinaryOp::Add => {
            let (a, b) = numbers(op, l, r, loc)?;
            Value::Number(a + b)
        }
        BinaryOp::Sub => {
            let (a, b) = numbers(op, l, r, loc)?;
            Value::Number(a - b)
        }
        BinaryOp::Mul => {
            let (a, b) = numbers(op, l, r, loc)?;
            Value::Number(a * b)
        }
        BinaryOp::Div => {
            let (a, b) = numbers(op, l, r, loc)?;
            if b == 0.0 {
                return Err(errors::division_by_zero(loc.clone()));
            }
            Value::Number(a / b)
        }
        BinaryOp::Mod => {
            let (a, b) = numbers(op, l, r, loc)?;
            if b == 0.0 {
                return Err(errors::modulo_by_zero(loc.clone()));
            }
            Value::Number(a % b)
        }
        BinaryOp::Gt => {
            let (a, b) = numbers(op, l, r, loc)?;
            Value::Bool(a > b)
        }
        BinaryOp::Lt => {
            let (a, b) = numbers(op, l, r, loc)?;
            Value::Bool(a < b)
        }
        BinaryOp::GtEq => {
            let (a, b) = numbers(op, l, r, loc)?;
            Value::Bool(a >= b)
        }
        BinaryOp::LtEq => {
            let (a, b) = numbers(op, l, r, loc)?;
            Value::Bool(a <= b)
        }
    };
    Ok(value)
}

fn numbers(op: BinaryOp, l: &Value, r: &Value, loc: &Location) -> Result<(f64, f64), MimoError> {
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(errors::binary_type_mismatch(
            op,
            l.type_name(),
            r.type_name(),
            loc.clone(),
        )),
    }
}

/// `target.property`, or `target?.property` when `safe`.
pub(crate) fn property_of(
    target: &Value,
    property: &str,
    safe: bool,
    loc: &Location,
) -> Result<Value, MimoError> {
    match target {
        Value::Null if safe => Ok(Value::Null),
        Value::Null => Err(errors::property_of_null(property, loc.clone())),
        Value::Object(map) => Ok(map.borrow().get(property).cloned().unwrap_or(Value::Null)),
        Value::Array(items) if property == "length" => Ok(len_value(items.borrow().len())),
        Value::String(s) if property == "length" => Ok(len_value(s.chars().count())),
        Value::Array(_) | Value::String(_) => Ok(Value::Null),
        Value::Number(_) | Value::Bool(_) => Err(errors::property_of_primitive(
            property,
            target.type_name(),
            loc.clone(),
        )),
        Value::Function(_) | Value::Builtin(_) | Value::DateTime(_) => Ok(Value::Null),
    }
}

/// `target[key]`. Errors point at the indexed expression.
pub(crate) fn index_into(target: &Value, key: &Value, loc: &Location) -> Result<Value, MimoError> {
    match target {
        Value::Array(items) => {
            let Some(i) = key.as_integer() else {
                return Err(errors::array_index_not_integer(key.type_name(), loc.clone()));
            };
            let items = items.borrow();
            Ok(usize::try_from(i)
                .ok()
                .and_then(|i| items.get(i).cloned())
                .unwrap_or(Value::Null))
        }
        Value::Object(map) => Ok(map
            .borrow()
            .get(&key.property_key())
            .cloned()
            .unwrap_or(Value::Null)),
        Value::String(s) => {
            let Some(i) = key.as_integer() else {
                return Err(errors::string_index_not_integer(key.type_name(), loc.clone()));
            };
            Ok(usize::try_from(i)
                .ok()
                .and_then(|i| s.chars().nth(i))
                .map_or(Value::Null, |c| Value::from(c.to_string())))
        }
        other => Err(errors::not_indexable(other.type_name(), loc.clone())),
    }
}

/// `items[index] = value`, padding any gap with nulls.
pub(crate) fn store_at(
    items: &mut Vec<Value>,
    index: usize,
    value: Value,
    loc: &Location,
) -> Result<(), MimoError> {
    if index >= items.len() {
        if index >= MAX_COLLECTION_LEN {
            return Err(errors::index_too_large(index, loc.clone()));
        }
        items
            .try_reserve(index + 1 - items.len())
            .map_err(|_| errors::index_too_large(index, loc.clone()))?;
        items.resize(index + 1, Value::Null);
    }
    items[index] = value;
    Ok(())
}

pub(crate) fn len_value(len: usize) -> Value {
    Value::Number(len as f64)
}
