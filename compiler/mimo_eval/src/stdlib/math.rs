//! `math`: constants, elementary functions and random numbers.
//!
//! `random` is backed by the thread RNG until `seed` is called; from then
//! on it is a Park-Miller generator whose state belongs to the interpreter,
//! so two interpreters seeded alike produce the same sequence.

use std::f64::consts;

use mimo_diagnostic::MimoError;
use mimo_ir::Location;
use rand::Rng;

use crate::builtins::args::expect_number;
use crate::builtins::module_object;
use crate::function::{Arity, BuiltinFunction};
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Park-Miller modulus (2^31 - 1).
const MODULUS: i64 = 2_147_483_647;
const MULTIPLIER: i64 = 16_807;

const FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction::new("sin", Arity::Exact(1), sin),
    BuiltinFunction::new("cos", Arity::Exact(1), cos),
    BuiltinFunction::new("tan", Arity::Exact(1), tan),
    BuiltinFunction::new("asin", Arity::Exact(1), asin),
    BuiltinFunction::new("acos", Arity::Exact(1), acos),
    BuiltinFunction::new("atan", Arity::Exact(1), atan),
    BuiltinFunction::new("atan2", Arity::Exact(2), atan2),
    BuiltinFunction::new("log", Arity::Exact(1), log),
    BuiltinFunction::new("log10", Arity::Exact(1), log10),
    BuiltinFunction::new("log2", Arity::Exact(1), log2),
    BuiltinFunction::new("exp", Arity::Exact(1), exp),
    BuiltinFunction::new("pow", Arity::Exact(2), pow),
    BuiltinFunction::new("sqrt", Arity::Exact(1), sqrt),
    BuiltinFunction::new("cbrt", Arity::Exact(1), cbrt),
    BuiltinFunction::new("floor", Arity::Exact(1), floor),
    BuiltinFunction::new("ceil", Arity::Exact(1), ceil),
    BuiltinFunction::new("round", Arity::Exact(1), round),
    BuiltinFunction::new("abs", Arity::Exact(1), abs),
    BuiltinFunction::new("max", Arity::AtLeast(1), max),
    BuiltinFunction::new("min", Arity::AtLeast(1), min),
    BuiltinFunction::new("random", Arity::Exact(0), random),
    BuiltinFunction::new("seed", Arity::Exact(1), seed),
    BuiltinFunction::new("randint", Arity::Exact(2), randint),
];

pub(crate) fn module() -> Value {
    module_object(
        [("PI", Value::Number(consts::PI)), ("E", Value::Number(consts::E))]
            .into_iter()
            .chain(FUNCTIONS.iter().map(|f| (f.name, Value::builtin(f.clone())))),
    )
}

/// Turn a user seed into a valid generator state in `1..MODULUS`.
pub(crate) fn normalize_seed(seed: f64) -> i64 {
    if !seed.is_finite() {
        return 1;
    }
    let state = (seed.floor().abs() % MODULUS as f64) as i64;
    if state == 0 {
        1
    } else {
        state
    }
}

/// Next value in `[0, 1)`.
fn next_random(interp: &mut Interpreter) -> f64 {
    match interp.random_state.as_mut() {
        Some(state) => {
            *state = (*state * MULTIPLIER) % MODULUS;
            (*state - 1) as f64 / (MODULUS - 1) as f64
        }
        None => rand::thread_rng().gen::<f64>(),
    }
}

macro_rules! unary {
    ($($name:ident => $op:expr;)*) => {
        $(
            fn $name(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
                let x = expect_number(stringify!($name), &args[0], 1, loc)?;
                let op: fn(f64) -> f64 = $op;
                Ok(Value::Number(op(x)))
            }
        )*
    };
}

unary! {
    sin => f64::sin;
    cos => f64::cos;
    tan => f64::tan;
    asin => f64::asin;
    acos => f64::acos;
    atan => f64::atan;
    log => f64::ln;
    log10 => f64::log10;
    log2 => f64::log2;
    exp => f64::exp;
    sqrt => f64::sqrt;
    cbrt => f64::cbrt;
    floor => f64::floor;
    ceil => f64::ceil;
    round => round_half_up;
    abs => f64::abs;
}

/// Halves round toward positive infinity (`round(-2.5)` is `-2`).
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn two_numbers(func: &str, args: &[Value], loc: &Location) -> Result<(f64, f64), MimoError> {
    Ok((
        expect_number(func, &args[0], 1, loc)?,
        expect_number(func, &args[1], 2, loc)?,
    ))
}

fn atan2(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (y, x) = two_numbers("atan2", args, loc)?;
    Ok(Value::Number(y.atan2(x)))
}

fn pow(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (base, exponent) = two_numbers("pow", args, loc)?;
    Ok(Value::Number(base.powf(exponent)))
}

/// Fold the arguments with `pick`; any `NaN` makes the result `NaN`.
fn extremum(
    func: &str,
    args: &[Value],
    loc: &Location,
    pick: fn(f64, f64) -> f64,
) -> Result<Value, MimoError> {
    let mut result: Option<f64> = None;
    for (i, value) in args.iter().enumerate() {
        let n = expect_number(func, value, i + 1, loc)?;
        result = Some(match result {
            _ if n.is_nan() => f64::NAN,
            Some(acc) if acc.is_nan() => acc,
            Some(acc) => pick(acc, n),
            None => n,
        });
    }
    Ok(Value::Number(result.unwrap_or(f64::NAN)))
}

fn max(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    extremum("max", args, loc, f64::max)
}

fn min(_: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    extremum("min", args, loc, f64::min)
}

fn random(interp: &mut Interpreter, _: &[Value], _: &Location) -> Result<Value, MimoError> {
    Ok(Value::Number(next_random(interp)))
}

fn seed(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let seed = expect_number("seed", &args[0], 1, loc)?;
    interp.random_state = Some(normalize_seed(seed));
    tracing::debug!(seed, "math.random seeded");
    Ok(Value::Null)
}

/// Integer in `[ceil(min), floor(max)]`.
fn randint(interp: &mut Interpreter, args: &[Value], loc: &Location) -> Result<Value, MimoError> {
    let (low, high) = two_numbers("randint", args, loc)?;
    let (low, high) = (low.ceil(), high.floor());
    let r = next_random(interp);
    Ok(Value::Number((r * (high - low + 1.0)).floor() + low))
}

#[cfg(test)]
mod tests;
