//! Operator entries and the algebra for composing/merging/initiating them
//! (§4.2 Language and Operator Algebra).

use std::sync::Arc;

use valx_eval::{EvalContext, EvalError, Evaluable, Value};

pub type ArbitraryFn = Arc<dyn Fn(&EvalContext, &Value, &Value) -> Result<Value, EvalError> + Send + Sync>;
pub type TextFn = Arc<dyn Fn(&EvalContext, &str, &str) -> Result<Value, EvalError> + Send + Sync>;
pub type NumberFn = Arc<dyn Fn(&EvalContext, f64, f64) -> Result<Value, EvalError> + Send + Sync>;
pub type BooleanFn = Arc<dyn Fn(&EvalContext, bool, bool) -> Result<Value, EvalError> + Send + Sync>;
/// Invoked with the evaluated left operand; `Some(result)` short-circuits
/// without evaluating the right operand.
pub type ShortCircuitFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;
/// Receives the unevaluated sub-trees; mutually exclusive with the typed
/// builders above.
pub type DirectFn = Arc<dyn Fn(Evaluable, Evaluable) -> Evaluable + Send + Sync>;

/// One composable operator registration. Multiple registrations under the
/// same name merge field-wise (see [`OperatorEntry::merge`]).
#[derive(Clone, Default)]
pub struct OperatorEntry {
    pub precedence: Option<u8>,
    pub right_associative: bool,
    pub arbitrary: Option<ArbitraryFn>,
    pub text: Option<TextFn>,
    pub number: Option<NumberFn>,
    pub boolean: Option<BooleanFn>,
    pub short_circuit: Option<ShortCircuitFn>,
    pub direct: Option<DirectFn>,
    pub postfix: Option<crate::postfix::PostfixFn>,
}

impl OperatorEntry {
    fn has_typed_builder(&self) -> bool {
        self.arbitrary.is_some() || self.text.is_some() || self.number.is_some() || self.boolean.is_some()
    }

    /// Merge two registrations of the same operator name field-wise.
    /// Precedence takes the max of the two (absent treated as unset).
    /// Rejects combining `direct` with any typed builder.
    pub fn merge(self, other: OperatorEntry) -> Result<OperatorEntry, String> {
        let merged = OperatorEntry {
            precedence: match (self.precedence, other.precedence) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (None, None) => None,
            },
            right_associative: self.right_associative || other.right_associative,
            arbitrary: other.arbitrary.or(self.arbitrary),
            text: other.text.or(self.text),
            number: other.number.or(self.number),
            boolean: other.boolean.or(self.boolean),
            short_circuit: other.short_circuit.or(self.short_circuit),
            direct: other.direct.or(self.direct),
            postfix: other.postfix.or(self.postfix),
        };
        if merged.direct.is_some() && merged.has_typed_builder() {
            return Err(
                "operator cannot mix a direct builder with number/text/boolean/arbitrary builders".to_string(),
            );
        }
        Ok(merged)
    }
}

/// A finalised infix combinator: given the (already-parsed) left and right
/// sub-trees, produce the combined `Evaluable`. Built once at Language
/// finalisation time, reused for every occurrence of the operator.
pub type InfixBuilder = Arc<dyn Fn(Evaluable, Evaluable) -> Evaluable + Send + Sync>;

/// The operator entry compiled into a single dispatcher, per §4.2:
/// "the composable fields are compiled into a single builder(left, right)."
#[derive(Clone)]
pub struct InitiatedOperator {
    pub precedence: u8,
    pub right_associative: bool,
    pub infix: Option<InfixBuilder>,
    pub postfix: Option<crate::postfix::PostfixFn>,
}

/// Compile an operator entry's composable fields into a single dispatcher.
/// `name` is used only to render `invalid operation` error messages.
pub fn initiate(name: &str, entry: &OperatorEntry) -> InitiatedOperator {
    let precedence = entry.precedence.unwrap_or(0);
    let right_associative = entry.right_associative;
    let postfix = entry.postfix.clone();

    let infix = if let Some(direct) = entry.direct.clone() {
        Some(Arc::new(move |left: Evaluable, right: Evaluable| direct(left, right)) as InfixBuilder)
    } else if entry.short_circuit.is_some() || entry.has_typed_builder() {
        let short_circuit = entry.short_circuit.clone();
        let number = entry.number.clone();
        let text = entry.text.clone();
        let boolean = entry.boolean.clone();
        let arbitrary = entry.arbitrary.clone();
        let op_name = name.to_string();
        Some(Arc::new(move |left: Evaluable, right: Evaluable| {
            let short_circuit = short_circuit.clone();
            let number = number.clone();
            let text = text.clone();
            let boolean = boolean.clone();
            let arbitrary = arbitrary.clone();
            let op_name = op_name.clone();
            let is_const = left.is_constant() && right.is_constant();
            Evaluable::new(is_const, move |ctx, vars| {
                let lv = left.eval(ctx, vars)?;
                if let Some(sc) = &short_circuit {
                    if let Some(result) = sc(&lv) {
                        return Ok(result);
                    }
                }
                let rv = right.eval(ctx, vars)?;
                if let Some(nf) = &number {
                    if let (Some(ln), Some(rn)) = (lv.to_number(), rv.to_number()) {
                        return nf(ctx, ln, rn);
                    }
                }
                if let Some(tf) = &text {
                    if let (Some(ls), Some(rs)) = (lv.to_display_string(), rv.to_display_string()) {
                        return tf(ctx, &ls, &rs);
                    }
                }
                if let Some(bf) = &boolean {
                    if let (Some(lb), Some(rb)) = (lv.to_bool(), rv.to_bool()) {
                        return bf(ctx, lb, rb);
                    }
                }
                if let Some(af) = &arbitrary {
                    return af(ctx, &lv, &rv);
                }
                Err(EvalError::invalid_operation(lv.type_name(), &op_name, rv.type_name()))
            })
        }) as InfixBuilder)
    } else {
        None
    };

    InitiatedOperator {
        precedence,
        right_associative,
        infix,
        postfix,
    }
}

/// Compute every non-empty prefix of `s`, used to build a Language's
/// symbol-operator prefix set so the parser's greedy lexeme scan knows
/// when to keep extending (§4.3 `parseOperator`).
pub fn prefixes_of(s: &str) -> impl Iterator<Item = String> + '_ {
    s.char_indices().skip(1).map(move |(i, _)| s[..i].to_string()).chain(std::iter::once(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_of_full_lexeme() {
        let got: Vec<_> = prefixes_of("<=>").collect();
        assert_eq!(got, vec!["<", "<=", "<=>"]);
    }

    #[test]
    fn merge_takes_max_precedence() {
        let a = OperatorEntry {
            precedence: Some(3),
            ..Default::default()
        };
        let b = OperatorEntry {
            precedence: Some(7),
            ..Default::default()
        };
        let merged = a.merge(b).unwrap();
        assert_eq!(merged.precedence, Some(7));
    }

    #[test]
    fn merge_rejects_direct_with_typed_builder() {
        let direct: OperatorEntry = OperatorEntry {
            direct: Some(Arc::new(|l, _r| l)),
            ..Default::default()
        };
        let numeric = OperatorEntry {
            number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a + b)))),
            ..Default::default()
        };
        assert!(direct.merge(numeric).is_err());
    }

    #[test]
    fn initiate_dispatches_number_then_arbitrary() {
        let entry = OperatorEntry {
            precedence: Some(10),
            number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a + b)))),
            arbitrary: Some(Arc::new(|_ctx, l, r| {
                Ok(Value::string(format!("{}{}", l.to_display_string().unwrap_or_default(), r.to_display_string().unwrap_or_default())))
            })),
            ..Default::default()
        };
        let op = initiate("+", &entry);
        let builder = op.infix.unwrap();
        let left = Evaluable::constant(Value::Number(2.0));
        let right = Evaluable::constant(Value::Number(3.0));
        let combined = builder(left, right);
        let ctx = EvalContext::background();
        assert_eq!(combined.eval(&ctx, &Value::Null).unwrap(), Value::Number(5.0));
    }
}
