//! Statement execution.

use std::rc::Rc;

use mimo_diagnostic::MimoError;
use mimo_ir::{
    BindingTarget, DeclKind, DestructurePattern, ElseBranch, Expr, Location, Stmt, StmtKind,
};
use mimo_stack::ensure_sufficient_stack;

use super::eval::store_at;
use super::{Flow, Interpreter, Jump};
use crate::environment::{Environment, ScopeRole};
use crate::errors;
use crate::function::FunctionValue;
use crate::value::{ObjectMap, Value};

/// Which loop construct is running; only affects how iterations start.
#[derive(Clone, Copy)]
enum LoopKind<'a> {
    While(&'a Expr),
    Loop,
}

impl Interpreter {
    /// Run `stmts` with `env` as the current environment.
    pub(crate) fn exec_block(&mut self, stmts: &[Stmt], env: Environment) -> Result<Flow, MimoError> {
        self.scoped(env).run_statements(stmts)
    }

    /// Run `stmts` in the current environment.
    ///
    /// Function declarations are hoisted first. Execution stops at the first
    /// statement that does not complete normally; otherwise the result is the
    /// value of the last statement.
    pub(crate) fn run_statements(&mut self, stmts: &[Stmt]) -> Result<Flow, MimoError> {
        self.hoist_functions(stmts)?;
        let mut last = Value::Null;
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Normal(value) => last = value,
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal(last))
    }

    fn hoist_functions(&mut self, stmts: &[Stmt]) -> Result<(), MimoError> {
        for stmt in stmts {
            let StmtKind::FunctionDeclaration { function, .. } = &stmt.kind else {
                continue;
            };
            let Some(name) = function.name.as_deref() else {
                continue;
            };
            if self.env.has_in_current_scope(name) {
                continue;
            }
            let value = Value::Function(Rc::new(FunctionValue::new(
                Rc::clone(function),
                self.env.clone(),
            )));
            self.env
                .define(name, value, DeclKind::Set)
                .map_err(|e| errors::from_env(e, name, stmt.location.clone()))?;
        }
        Ok(())
    }

    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, MimoError> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> Result<Flow, MimoError> {
        let loc = &stmt.location;
        match &stmt.kind {
            StmtKind::VariableDeclaration {
                kind,
                target,
                value,
                ..
            } => {
                let value = self.eval_expr(value)?;
                self.exec_declaration(*kind, target, &value, loc)?;
                Ok(Flow::Normal(value))
            }
            StmtKind::DestructuringAssignment { pattern, value } => {
                let value_loc = &value.location;
                let value = self.eval_expr(value)?;
                self.bind_pattern(pattern, &value, value_loc, |interp, name, item| {
                    interp.set_name(name, item, loc)
                })?;
                Ok(Flow::Normal(value))
            }
            StmtKind::PropertyAssignment {
                object,
                property,
                value,
            } => {
                let target = self.eval_expr(object)?;
                let value = self.eval_expr(value)?;
                match &target {
                    Value::Object(map) => {
                        map.borrow_mut().insert(property.as_str(), value.clone());
                        Ok(Flow::Normal(value))
                    }
                    other => Err(errors::set_property_on_non_object(
                        property,
                        other.type_name(),
                        object.location.clone(),
                    )),
                }
            }
            StmtKind::BracketAssignment {
                object,
                index,
                value,
            } => self.exec_bracket_assignment(object, index, value),
            StmtKind::FunctionDeclaration { function, .. } => {
                let value = Value::Function(Rc::new(FunctionValue::new(
                    Rc::clone(function),
                    self.env.clone(),
                )));
                let name = function.display_name();
                self.env
                    .define(name, value, DeclKind::Set)
                    .map_err(|e| errors::from_env(e, name, loc.clone()))?;
                Ok(Flow::Normal(Value::Null))
            }
            StmtKind::If {
                condition,
                consequent,
                alternate,
            } => {
                if self.eval_expr(condition)?.is_truthy() {
                    let env = self.env.child(ScopeRole::Block);
                    return self.exec_block(consequent, env);
                }
                match alternate {
                    Some(ElseBranch::If(nested)) => self.exec_stmt(nested),
                    Some(ElseBranch::Block(body)) => {
                        let env = self.env.child(ScopeRole::Block);
                        self.exec_block(body, env)
                    }
                    None => Ok(Flow::Normal(Value::Null)),
                }
            }
            StmtKind::Guard {
                condition,
                alternate,
            } => {
                if self.eval_expr(condition)?.is_truthy() {
                    return Ok(Flow::Normal(Value::Null));
                }
                let env = self.env.child(ScopeRole::Block);
                match self.exec_block(alternate, env)? {
                    Flow::Normal(_) => {
                        let at = alternate.last().map_or(loc, |s| &s.location);
                        Err(errors::guard_must_exit(at.clone()))
                    }
                    flow => Ok(flow),
                }
            }
            StmtKind::While { condition, body } => {
                self.exec_loop(LoopKind::While(condition), body, None)
            }
            StmtKind::Loop { body } => self.exec_loop(LoopKind::Loop, body, None),
            StmtKind::For {
                variable,
                iterable,
                body,
            } => self.exec_for(variable, iterable, body, None),
            StmtKind::Labeled { label, body } => match &body.kind {
                StmtKind::While { condition, body } => {
                    self.exec_loop(LoopKind::While(condition), body, Some(label))
                }
                StmtKind::Loop { body } => self.exec_loop(LoopKind::Loop, body, Some(label)),
                StmtKind::For {
                    variable,
                    iterable,
                    body,
                } => self.exec_for(variable, iterable, body, Some(label)),
                _ => self.exec_stmt(body),
            },
            StmtKind::Break { label } => Ok(Flow::Break(Jump {
                label: label.clone(),
                location: loc.clone(),
            })),
            StmtKind::Continue { label } => Ok(Flow::Continue(Jump {
                label: label.clone(),
                location: loc.clone(),
            })),
            StmtKind::Try {
                body,
                catch_var,
                catch_body,
            } => self.exec_try(body, catch_var.as_deref(), catch_body.as_deref()),
            StmtKind::Call {
                callee,
                arguments,
                destination,
            } => {
                let result = self.eval_call(callee, arguments, false, loc)?;
                if let Some(dest) = destination {
                    self.env
                        .define(dest, result.clone(), DeclKind::Set)
                        .map_err(|e| errors::from_env(e, dest, loc.clone()))?;
                }
                Ok(Flow::Normal(result))
            }
            StmtKind::Return { value } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
            StmtKind::Show { value } => {
                let value = self.eval_expr(value)?;
                self.print.println(&value.to_string());
                Ok(Flow::Normal(value))
            }
            StmtKind::Throw { value } => {
                let value = self.eval_expr(value)?;
                Err(errors::user_throw(value.to_string(), loc.clone()))
            }
            StmtKind::Match {
                discriminant,
                cases,
            } => self.exec_match(discriminant, cases),
            StmtKind::Import { path, alias } => {
                let exports = self.load_module(path, loc)?;
                self.env
                    .define(alias, exports, DeclKind::Const)
                    .map_err(|_| errors::import_bind_failed(alias, loc.clone()))?;
                Ok(Flow::Normal(Value::Null))
            }
            StmtKind::Expression(expr) => Ok(Flow::Normal(self.eval_expr(expr)?)),
        }
    }

    fn exec_declaration(
        &mut self,
        kind: DeclKind,
        target: &BindingTarget,
        value: &Value,
        loc: &Location,
    ) -> Result<(), MimoError> {
        match target {
            BindingTarget::Name(name) => self.declare(kind, name, value.clone(), loc),
            BindingTarget::Pattern(pattern) => {
                self.bind_pattern(pattern, value, loc, |interp, name, item| {
                    interp.declare(kind, name, item, loc)
                })
            }
        }
    }

    fn declare(
        &mut self,
        kind: DeclKind,
        name: &str,
        value: Value,
        loc: &Location,
    ) -> Result<(), MimoError> {
        let result = match kind {
            DeclKind::Global => self.global.define(name, value, DeclKind::Global),
            DeclKind::Let | DeclKind::Const => self.env.define(name, value, kind),
            DeclKind::Set => self.env.set_variable(name, value),
        };
        result.map_err(|e| errors::from_env(e, name, loc.clone()))
    }

    fn set_name(&mut self, name: &str, value: Value, loc: &Location) -> Result<(), MimoError> {
        self.env
            .set_variable(name, value)
            .map_err(|e| errors::from_env(e, name, loc.clone()))
    }

    /// Destructure `value` through `pattern`, handing each bound name and its
    /// element (or `null` when absent) to `bind`.
    fn bind_pattern(
        &mut self,
        pattern: &DestructurePattern,
        value: &Value,
        value_loc: &Location,
        mut bind: impl FnMut(&mut Self, &str, Value) -> Result<(), MimoError>,
    ) -> Result<(), MimoError> {
        match pattern {
            DestructurePattern::Array(names) => {
                let Value::Array(items) = value else {
                    return Err(errors::destructure_non_array(value_loc.clone()));
                };
                let items: Vec<Value> = items.borrow().clone();
                for (i, name) in names.iter().enumerate() {
                    let item = items.get(i).cloned().unwrap_or(Value::Null);
                    bind(self, name, item)?;
                }
            }
            DestructurePattern::Object(names) => {
                let Value::Object(map) = value else {
                    return Err(errors::destructure_non_object(value_loc.clone()));
                };
                for name in names {
                    let item = map.borrow().get(name).cloned().unwrap_or(Value::Null);
                    bind(self, name, item)?;
                }
            }
        }
        Ok(())
    }

    fn exec_bracket_assignment(
        &mut self,
        object: &Expr,
        index: &Expr,
        value: &Expr,
    ) -> Result<Flow, MimoError> {
        let target = self.eval_expr(object)?;
        let key = self.eval_expr(index)?;
        let value = self.eval_expr(value)?;
        match &target {
            Value::Array(items) => {
                let Some(i) = key.as_integer() else {
                    return Err(errors::assign_index_not_integer(
                        key.type_name(),
                        index.location.clone(),
                    ));
                };
                let Ok(i) = usize::try_from(i) else {
                    return Err(errors::negative_index(i, index.location.clone()));
                };
                store_at(&mut items.borrow_mut(), i, value.clone(), &index.location)?;
            }
            Value::Object(map) => {
                map.borrow_mut().insert(key.property_key(), value.clone());
            }
            other => {
                return Err(errors::set_index_on_non_collection(
                    other.type_name(),
                    object.location.clone(),
                ))
            }
        }
        Ok(Flow::Normal(value))
    }

    /// `while` and `loop`: one fresh block scope per iteration.
    fn exec_loop(
        &mut self,
        kind: LoopKind<'_>,
        body: &[Stmt],
        label: Option<&str>,
    ) -> Result<Flow, MimoError> {
        let mut result = Value::Null;
        loop {
            if let LoopKind::While(condition) = kind {
                if !self.eval_expr(condition)?.is_truthy() {
                    break;
                }
            }
            let env = self.env.child(ScopeRole::Block);
            match self.exec_block(body, env)? {
                Flow::Normal(value) => result = value,
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Break(jump) if jump.targets(label) => break,
                Flow::Continue(jump) if jump.targets(label) => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal(result))
    }

    /// `for x in array`: the array is read by index on every iteration, so
    /// elements pushed by the body are visited too.
    fn exec_for(
        &mut self,
        variable: &str,
        iterable: &Expr,
        body: &[Stmt],
        label: Option<&str>,
    ) -> Result<Flow, MimoError> {
        let items = match self.eval_expr(iterable)? {
            Value::Array(items) => items,
            other => {
                return Err(errors::for_requires_array(
                    other.type_name(),
                    iterable.location.clone(),
                ))
            }
        };
        let loop_env = self.env.child(ScopeRole::Block);
        let mut scope = self.scoped(loop_env);
        let mut result = Value::Null;
        let mut i = 0;
        loop {
            let Some(item) = items.borrow().get(i).cloned() else {
                break;
            };
            i += 1;
            let iteration = scope.env.child(ScopeRole::Block);
            iteration
                .define(variable, item, DeclKind::Set)
                .map_err(|e| errors::from_env(e, variable, iterable.location.clone()))?;
            match scope.exec_block(body, iteration)? {
                Flow::Normal(value) => result = value,
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Break(jump) if jump.targets(label) => break,
                Flow::Continue(jump) if jump.targets(label) => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal(result))
    }

    /// `try ... catch err ... end`.
    ///
    /// Only language errors are caught; `return`, `break` and `continue`
    /// pass through untouched.
    fn exec_try(
        &mut self,
        body: &[Stmt],
        catch_var: Option<&str>,
        catch_body: Option<&[Stmt]>,
    ) -> Result<Flow, MimoError> {
        let env = self.env.child(ScopeRole::Block);
        let err = match self.exec_block(body, env) {
            Ok(flow) => return Ok(flow),
            Err(err) => err,
        };
        let Some(catch_body) = catch_body else {
            return Err(err);
        };
        tracing::debug!(code = err.code, "caught runtime error");
        let env = self.env.child(ScopeRole::Block);
        if let Some(name) = catch_var {
            let err_loc = err.location.clone();
            env.define(name, error_value(&err), DeclKind::Set)
                .map_err(|e| errors::from_env(e, name, err_loc))?;
        }
        self.exec_block(catch_body, env)
    }
}

/// The object a `catch` variable is bound to.
pub(crate) fn error_value(err: &MimoError) -> Value {
    let mut map = ObjectMap::new();
    map.insert("type", Value::from(err.category.type_name()));
    map.insert("code", Value::from(err.code));
    map.insert("message", Value::from(err.message.as_str()));
    map.insert(
        "suggestion",
        err.suggestion.as_deref().map_or(Value::Null, Value::from),
    );
    map.insert("file", Value::from(&*err.location.file));
    map.insert("line", Value::Number(f64::from(err.location.line)));
    map.insert("column", Value::Number(f64::from(err.location.column)));
    Value::object(map)
}
