//! The compiled representation produced by the parser (§3 Evaluable).

use std::sync::Arc;

use crate::context::EvalContext;
use crate::error::EvalError;
use crate::value::Value;

type EvalFn = Arc<dyn Fn(&EvalContext, &Value) -> Result<Value, EvalError> + Send + Sync>;

/// A compiled expression node: a pure function of `(context, variables)`.
///
/// `Evaluable` is cheap to clone (it's an `Arc` under the hood) and, per §5,
/// read-only after construction — it may be evaluated concurrently from
/// multiple threads as long as each evaluation supplies its own variables
/// root.
#[derive(Clone)]
pub struct Evaluable {
    is_constant: bool,
    func: EvalFn,
}

impl Evaluable {
    /// Build an `Evaluable` from a closure. `is_constant` must be true only
    /// when the closure ignores both its arguments.
    pub fn new(
        is_constant: bool,
        func: impl Fn(&EvalContext, &Value) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            is_constant,
            func: Arc::new(func),
        }
    }

    /// An `Evaluable` that always yields the same value regardless of
    /// context or variables.
    pub fn constant(value: Value) -> Self {
        Self::new(true, move |_ctx, _vars| Ok(value.clone()))
    }

    pub fn is_constant(&self) -> bool {
        self.is_constant
    }

    pub fn eval(&self, ctx: &EvalContext, variables: &Value) -> Result<Value, EvalError> {
        ctx.check()?;
        (self.func)(ctx, variables)
    }

    pub fn eval_int(&self, ctx: &EvalContext, variables: &Value) -> Result<i64, EvalError> {
        let v = self.eval(ctx, variables)?;
        v.to_number()
            .map(|n| n as i64)
            .ok_or_else(|| EvalError::invalid_operation(v.type_name(), "as", "int"))
    }

    pub fn eval_float(&self, ctx: &EvalContext, variables: &Value) -> Result<f64, EvalError> {
        let v = self.eval(ctx, variables)?;
        v.to_number()
            .ok_or_else(|| EvalError::invalid_operation(v.type_name(), "as", "float"))
    }

    pub fn eval_bool(&self, ctx: &EvalContext, variables: &Value) -> Result<bool, EvalError> {
        let v = self.eval(ctx, variables)?;
        v.to_bool()
            .ok_or_else(|| EvalError::invalid_operation(v.type_name(), "as", "bool"))
    }

    pub fn eval_string(&self, ctx: &EvalContext, variables: &Value) -> Result<String, EvalError> {
        let v = self.eval(ctx, variables)?;
        v.to_display_string()
            .ok_or_else(|| EvalError::invalid_operation(v.type_name(), "as", "string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_is_constant_and_stable() {
        let e = Evaluable::constant(Value::Number(42.0));
        assert!(e.is_constant());
        let ctx = EvalContext::background();
        let a = e.eval(&ctx, &Value::Null).unwrap();
        let b = e.eval(&ctx, &Value::Null).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_constant_reads_variables() {
        let e = Evaluable::new(false, |_ctx, vars| Ok(vars.clone()));
        assert!(!e.is_constant());
        let ctx = EvalContext::background();
        let v = e.eval(&ctx, &Value::Number(7.0)).unwrap();
        assert_eq!(v, Value::Number(7.0));
    }

    #[test]
    fn typed_wrappers_coerce() {
        let e = Evaluable::constant(Value::String("3.5".into()));
        let ctx = EvalContext::background();
        assert_eq!(e.eval_float(&ctx, &Value::Null).unwrap(), 3.5);
        assert_eq!(e.eval_int(&ctx, &Value::Null).unwrap(), 3);
    }

    #[test]
    fn eval_observes_cancellation() {
        let (ctx, handle) = EvalContext::cancellable();
        handle.cancel();
        let e = Evaluable::constant(Value::Bool(true));
        assert!(e.eval(&ctx, &Value::Null).is_err());
    }
}
