//! Function calls: argument evaluation, binding and invocation.

use std::rc::Rc;

use mimo_diagnostic::MimoError;
use mimo_ir::{DeclKind, Element, Expr, Location};

use super::Interpreter;
use crate::diagnostics;
use crate::environment::ScopeRole;
use crate::errors;
use crate::function::FunctionValue;
use crate::value::Value;

impl Interpreter {
    /// `call f(args)`, `f?.(args)` and call expressions.
    ///
    /// The callee is checked before any argument is evaluated.
    pub(crate) fn eval_call(
        &mut self,
        callee: &Expr,
        arguments: &[Element],
        safe: bool,
        loc: &Location,
    ) -> Result<Value, MimoError> {
        let func = self.eval_expr(callee)?;
        if safe && func.is_null() {
            return Ok(Value::Null);
        }
        let name = callee.callee_name();
        if !func.is_callable() {
            return Err(errors::not_callable(&name, loc.clone()));
        }
        let args = self.eval_arguments(arguments)?;
        self.call_value(&func, args, loc, &name)
    }

    /// Invoke a callable value with evaluated arguments.
    pub(crate) fn call_value(
        &mut self,
        func: &Value,
        args: Vec<Value>,
        loc: &Location,
        name: &str,
    ) -> Result<Value, MimoError> {
        match func {
            Value::Function(function) => self.call_user(function, args, loc),
            Value::Builtin(builtin) => {
                let builtin = Rc::clone(builtin);
                builtin.call(self, &args, loc)
            }
            _ => Err(errors::not_callable(name, loc.clone())),
        }
    }

    /// Run a user function in a fresh function scope under its closure.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %func.name()))]
    pub(crate) fn call_user(
        &mut self,
        func: &Rc<FunctionValue>,
        args: Vec<Value>,
        loc: &Location,
    ) -> Result<Value, MimoError> {
        let def = &func.def;
        let name = func.name();
        let required = def.required_params();
        if args.len() < required {
            return Err(errors::too_few_arguments(name, required, args.len(), loc.clone()));
        }
        if def.rest.is_none() && args.len() > def.params.len() {
            return Err(errors::too_many_arguments(
                name,
                def.params.len(),
                args.len(),
                loc.clone(),
            ));
        }

        let env = func.closure.child(ScopeRole::Function);
        let mut scope = self.scoped(env);

        let mut args = args.into_iter();
        for param in &def.params {
            let value = match (args.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => scope.eval_expr(default)?,
                (None, None) => Value::Null,
            };
            scope
                .env
                .define(&param.name, value, DeclKind::Set)
                .map_err(|e| errors::from_env(e, &param.name, loc.clone()))?;
        }
        if let Some(rest) = &def.rest {
            scope
                .env
                .define(rest, Value::array(args.collect()), DeclKind::Set)
                .map_err(|e| errors::from_env(e, rest, loc.clone()))?;
        }

        scope.call_stack.push(diagnostics::frame(name, loc))?;
        let result = scope.run_statements(&def.body);
        let result = result
            .and_then(|flow| flow.into_boundary_value(true))
            .map_err(|e| scope.call_stack.attach(e));
        scope.call_stack.pop();
        result
    }
}
