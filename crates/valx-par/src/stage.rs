//! The stage stack that turns a flat scan of infix operators into a
//! precedence-correct tree without recursive binding-power parsing (§4.3).

use valx_eval::Evaluable;

use crate::operator::InfixBuilder;

/// One pending infix application: a left operand waiting for its right side,
/// with the builder and precedence of the operator that produced it.
pub struct Stage {
    pub left: Evaluable,
    pub builder: InfixBuilder,
    pub precedence: u8,
    pub right_associative: bool,
}

/// A LIFO stack of pending stages. Pushing a new operator first folds in
/// every stacked stage whose precedence would bind at least as tightly,
/// then pushes itself; finishing folds in whatever remains.
#[derive(Default)]
pub struct StageStack {
    stack: Vec<Stage>,
}

impl StageStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Fold `left` against every stacked stage whose precedence binds at
    /// least as tightly as `threshold` (strictly tighter only, for a
    /// right-associative top-of-stack operator at equal precedence). Used
    /// directly by postfix dispatch, which needs the reduced left without
    /// consuming the stack.
    pub fn reduce(&mut self, mut left: Evaluable, threshold: u8) -> Evaluable {
        while let Some(top) = self.stack.last() {
            let should_pop = top.precedence > threshold || (top.precedence == threshold && !top.right_associative);
            if !should_pop {
                break;
            }
            let popped = self.stack.pop().unwrap();
            left = (popped.builder)(popped.left, left);
        }
        left
    }

    /// Push a new pending stage, first folding in anything on the stack that
    /// binds at least as tightly as this operator's own precedence.
    pub fn push(&mut self, left: Evaluable, builder: InfixBuilder, precedence: u8, right_associative: bool) {
        let reduced = self.reduce(left, precedence);
        self.stack.push(Stage {
            left: reduced,
            builder,
            precedence,
            right_associative,
        });
    }

    /// Fold the whole stack into a single `Evaluable`, given the final
    /// right-most operand.
    pub fn finish(mut self, left: Evaluable) -> Evaluable {
        self.reduce(left, 0)
    }
}
