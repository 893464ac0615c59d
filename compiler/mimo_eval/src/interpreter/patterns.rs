//! `match` statements.
//!
//! Cases are tried in source order. A case matches when its pattern
//! matches the discriminant and its `when` guard (if any) is truthy; the
//! guard runs in the case scope so it can see the pattern bindings.

use mimo_diagnostic::MimoError;
use mimo_ir::{CaseClause, DeclKind, Expr, Literal, MatchPattern};

use super::{Flow, Interpreter};
use crate::environment::ScopeRole;
use crate::errors;
use crate::value::{OrderedMap, Value};

impl Interpreter {
    pub(crate) fn exec_match(
        &mut self,
        discriminant: &Expr,
        cases: &[CaseClause],
    ) -> Result<Flow, MimoError> {
        let value = self.eval_expr(discriminant)?;
        for case in cases {
            let mut bindings = OrderedMap::new();
            let matched = match &case.pattern {
                None => true,
                Some(pattern) => matches_pattern(&value, pattern, &mut bindings),
            };
            if !matched {
                continue;
            }

            let env = self.env.child(ScopeRole::Block);
            for (name, bound) in bindings.iter() {
                env.define(name, bound.clone(), DeclKind::Let)
                    .map_err(|e| errors::from_env(e, name, case.location.clone()))?;
            }
            let mut scope = self.scoped(env);
            if let Some(guard) = &case.guard {
                if !scope.eval_expr(guard)?.is_truthy() {
                    continue;
                }
            }
            return scope.run_statements(&case.body);
        }
        Err(errors::no_match(
            &value.to_string(),
            discriminant.location.clone(),
        ))
    }
}

/// Test `value` against `pattern`, collecting identifier bindings. A name
/// bound twice keeps the last value.
fn matches_pattern(value: &Value, pattern: &MatchPattern, bindings: &mut OrderedMap<Value>) -> bool {
    match pattern {
        MatchPattern::Literal(lit) => literal_matches(value, lit),
        MatchPattern::Identifier(name) => {
            bindings.insert(name.as_str(), value.clone());
            true
        }
        MatchPattern::Array(elements) => {
            let Value::Array(items) = value else {
                return false;
            };
            let items = items.borrow();
            items.len() == elements.len()
                && items
                    .iter()
                    .zip(elements)
                    .all(|(item, element)| matches_pattern(item, element, bindings))
        }
    }
}

fn literal_matches(value: &Value, lit: &Literal) -> bool {
    match (value, lit) {
        (Value::Number(a), Literal::Number(b)) => a == b,
        (Value::String(a), Literal::String(b)) => **a == **b,
        (Value::Bool(a), Literal::Boolean(b)) => a == b,
        (Value::Null, Literal::Null) => true,
        _ => false,
    }
}
