//! The Pratt-style parser: prefix phase, infix/postfix phase, and the
//! stage-stack discipline that reorders sub-expressions by precedence
//! (§4.3). Owns the one-slot camouflage rewind (§3).

use valx_eval::{EvalError, Evaluable, Value};
use valx_lex::{DefaultScanner, Scanner, Token};
use valx_util::Span;

use crate::language::Language;
use crate::path;
use crate::stage::StageStack;
use crate::ParseError;

/// One compiled path segment (§4.4).
enum PathSegment {
    Field(String),
    Index(Evaluable),
    Call(Vec<Evaluable>),
}

/// Stateful consumer of tokens under a [`Language`], producing `Evaluable`s.
pub struct Parser<'a> {
    scanner: DefaultScanner<'a>,
    language: Language,
    camouflage: Option<(Token, Span)>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, language: Language) -> Self {
        Self {
            scanner: DefaultScanner::new(source),
            language,
            camouflage: None,
        }
    }

    /// Compile `source` end to end under `language`, requiring the whole
    /// input to be consumed.
    pub fn compile(source: &'a str, language: Language) -> Result<Evaluable, ParseError> {
        let init = language.init_hook().cloned();
        let mut parser = Parser::new(source, language);
        let body = parser.parse_expression()?;
        let (tok, span) = parser.scan()?;
        if !matches!(tok, Token::Eof) {
            return Err(ParseError::unexpected(
                "expression",
                tok.describe(),
                vec!["end of input".to_string()],
                span,
            ));
        }
        match init {
            Some(hook) if is_empty_source(source) => Ok(hook()),
            _ => Ok(body),
        }
    }

    fn scan(&mut self) -> Result<(Token, Span), ParseError> {
        if let Some(pair) = self.camouflage.take() {
            return Ok(pair);
        }
        let tok = self
            .scanner
            .scan()
            .map_err(|e| ParseError::syntax(e.message.clone(), e.span))?;
        let span = self.scanner.pos();
        Ok((tok, span))
    }

    /// Rewind exactly one token. Panics if a token is already camouflaged;
    /// the one-slot invariant is load-bearing (§9 Design Notes).
    fn camouflage(&mut self, tok: Token, span: Span) {
        debug_assert!(self.camouflage.is_none(), "camouflage slot already occupied");
        self.camouflage = Some((tok, span));
    }

    pub fn expect_symbol(&mut self, expected: char) -> Result<(), ParseError> {
        let (tok, span) = self.scan()?;
        match tok {
            Token::Symbol(c) if c == expected => Ok(()),
            other => Err(ParseError::unexpected(
                "expression",
                other.describe(),
                vec![format!("\"{expected}\"")],
                span,
            )),
        }
    }

    /// Consume a single-char symbol if present, camouflaging it back
    /// otherwise; used for the ternary's optional `:`.
    pub fn consume_symbol(&mut self, expected: char) -> Result<bool, ParseError> {
        let (tok, span) = self.scan()?;
        match tok {
            Token::Symbol(c) if c == expected => Ok(true),
            other => {
                self.camouflage(other, span);
                Ok(false)
            }
        }
    }

    /// Parse a comma-separated argument list up to and including the
    /// closing `)` (the opening `(` has already been consumed by the
    /// caller).
    pub fn parse_call_arguments(&mut self) -> Result<Vec<Evaluable>, ParseError> {
        let mut args = Vec::new();
        let (tok, span) = self.scan()?;
        if let Token::Symbol(')') = tok {
            return Ok(args);
        }
        self.camouflage(tok, span);
        loop {
            args.push(self.parse_expression()?);
            let (tok, span) = self.scan()?;
            match tok {
                Token::Symbol(',') => continue,
                Token::Symbol(')') => break,
                other => {
                    return Err(ParseError::unexpected(
                        "argument list",
                        other.describe(),
                        vec!["\",\"".to_string(), "\")\"".to_string()],
                        span,
                    ))
                }
            }
        }
        Ok(args)
    }

    /// Run `f` with `language` swapped in for a bounded region, then restore
    /// the original (the sublanguage hook, §6).
    pub fn with_sublanguage<R>(&mut self, language: Language, f: impl FnOnce(&mut Parser<'a>) -> R) -> R {
        let saved = std::mem::replace(&mut self.language, language);
        let result = f(self);
        self.language = saved;
        result
    }

    /// Entry point: parse one expression, leaving the scanner positioned at
    /// the first token that isn't a valid continuation.
    pub fn parse_expression(&mut self) -> Result<Evaluable, ParseError> {
        let mut stack = StageStack::new();
        let mut left = self.parse_next_expression()?;
        loop {
            match self.parse_operator(&mut stack, left)? {
                OperatorStep::Infix(new_left) => {
                    left = new_left;
                }
                OperatorStep::Done(final_left) => {
                    return Ok(stack.finish(final_left));
                }
            }
        }
    }

    /// The prefix phase (§4.3): dispatch on the next token. Exposed so a
    /// unary prefix operator (e.g. arithmetic negation) can parse just its
    /// own operand without swallowing a following lower-precedence infix
    /// chain the way a recursive `parse_expression` call would.
    pub fn parse_next_expression(&mut self) -> Result<Evaluable, ParseError> {
        let (tok, span) = self.scan()?;
        match tok {
            Token::Symbol(c) => {
                if let Some(handler) = self.language.prefix_for_rune(c).cloned() {
                    return handler(self);
                }
                if c == '(' {
                    let inner = self.parse_expression()?;
                    self.expect_symbol(')')?;
                    return Ok(inner);
                }
                Err(ParseError::unexpected(
                    "expression",
                    Token::Symbol(c).describe(),
                    vec![],
                    span,
                ))
            }
            Token::Ident(name) => {
                if let Some(handler) = self.language.prefix_for_ident(&name).cloned() {
                    return handler(self);
                }
                self.parse_variable_path(name)
            }
            Token::Int(text) => parse_int_literal(&text, span),
            Token::Float(text) => text
                .parse::<f64>()
                .map(|n| Evaluable::constant(Value::Number(n)))
                .map_err(|_| ParseError::syntax(format!("invalid float literal {text}"), span)),
            Token::Str(s) | Token::RawStr(s) => Ok(Evaluable::constant(Value::String(s))),
            Token::Eof => Err(ParseError::unexpected("expression", "end of input", vec![], span)),
        }
    }

    /// The infix/postfix phase (§4.3): greedily form an operator lexeme (or
    /// consume an ident operator) and dispatch.
    fn parse_operator(&mut self, stack: &mut StageStack, left: Evaluable) -> Result<OperatorStep, ParseError> {
        let (tok, span) = self.scan()?;
        match tok {
            Token::Ident(name) => {
                if let Some(op) = self.language.operator(&name) {
                    return self.dispatch_operator(stack, left, op, span);
                }
                self.camouflage(Token::Ident(name), span);
                Ok(OperatorStep::Done(left))
            }
            Token::Symbol(c) if is_reserved_terminator(c) => {
                self.camouflage(Token::Symbol(c), span);
                Ok(OperatorStep::Done(left))
            }
            Token::Symbol(c) => {
                let prefixes = self.language.symbol_operator_prefixes();
                let mut lexeme = String::new();
                lexeme.push(c);
                loop {
                    let next_c = self.scanner.peek();
                    if next_c == '\0' {
                        break;
                    }
                    let mut candidate = lexeme.clone();
                    candidate.push(next_c);
                    if prefixes.contains(&candidate) {
                        lexeme = candidate;
                        self.scanner.next();
                    } else {
                        break;
                    }
                }
                match self.language.operator(&lexeme) {
                    Some(op) => self.dispatch_operator(stack, left, op, span),
                    None => Err(ParseError::unknown_operator(lexeme, span)),
                }
            }
            other => {
                self.camouflage(other, span);
                Ok(OperatorStep::Done(left))
            }
        }
    }

    fn dispatch_operator(
        &mut self,
        stack: &mut StageStack,
        left: Evaluable,
        op: crate::operator::InitiatedOperator,
        span: Span,
    ) -> Result<OperatorStep, ParseError> {
        if let Some(postfix) = op.postfix {
            let reduced = stack.reduce(left, op.precedence);
            let new_left = postfix(self, reduced, op.precedence)?;
            return Ok(OperatorStep::Infix(new_left));
        }
        let Some(infix) = op.infix else {
            return Err(ParseError::syntax(
                "operator has neither an infix nor a postfix builder",
                span,
            ));
        };
        let right = self.parse_next_expression()?;
        stack.push(left, infix, op.precedence, op.right_associative);
        Ok(OperatorStep::Infix(right))
    }

    fn parse_variable_path(&mut self, first_ident: String) -> Result<Evaluable, ParseError> {
        let mut segments = vec![PathSegment::Field(first_ident)];
        loop {
            let (tok, span) = self.scan()?;
            match tok {
                Token::Symbol('.') => {
                    let (tok2, span2) = self.scan()?;
                    match tok2 {
                        Token::Ident(name) => segments.push(PathSegment::Field(name)),
                        other => {
                            return Err(ParseError::unexpected(
                                "variable path",
                                other.describe(),
                                vec!["identifier".to_string()],
                                span2,
                            ))
                        }
                    }
                }
                Token::Symbol('[') => {
                    let index = self.parse_expression()?;
                    self.expect_symbol(']')?;
                    segments.push(PathSegment::Index(index));
                }
                Token::Symbol('(') => {
                    let args = self.parse_call_arguments()?;
                    segments.push(PathSegment::Call(args));
                }
                other => {
                    self.camouflage(other, span);
                    break;
                }
            }
        }
        let selector = self.language.variable_selector().cloned();
        Ok(build_path_evaluable(segments, selector))
    }
}

enum OperatorStep {
    Infix(Evaluable),
    Done(Evaluable),
}

/// Structural delimiters reserved for grouping syntax (call arguments,
/// sequence/mapping literals, the ternary's `:`) - never available for a
/// dialect to register as an operator lexeme, so they always end an
/// expression rather than risk an "unknown operator" failure.
fn is_reserved_terminator(c: char) -> bool {
    matches!(c, ',' | ':' | ')' | ']' | '}')
}

fn parse_int_literal(text: &str, span: Span) -> Result<Evaluable, ParseError> {
    let n = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
            .map(|v| v as f64)
            .map_err(|_| ParseError::syntax(format!("invalid hex literal {text}"), span))?
    } else {
        text.parse::<f64>()
            .map_err(|_| ParseError::syntax(format!("invalid integer literal {text}"), span))?
    };
    Ok(Evaluable::constant(Value::Number(n)))
}

fn build_path_evaluable(segments: Vec<PathSegment>, selector: Option<std::sync::Arc<dyn path::VariableSelector>>) -> Evaluable {
    let first = match &segments[0] {
        PathSegment::Field(name) => name.clone(),
        _ => unreachable!("first path segment is always Field"),
    };
    Evaluable::new(false, move |ctx, vars| {
        ctx.check()?;
        let mut current = path::select_key(vars, &first, selector.as_deref())?;
        for seg in segments.iter().skip(1) {
            match seg {
                PathSegment::Field(name) => {
                    current = path::select_key(&current, name, None)?;
                }
                PathSegment::Index(idx) => {
                    let iv = idx.eval(ctx, vars)?;
                    current = path::index_value(&current, &iv)?;
                }
                PathSegment::Call(arg_evals) => {
                    ctx.check()?;
                    let args: Result<Vec<Value>, EvalError> = arg_evals.iter().map(|a| a.eval(ctx, vars)).collect();
                    let args = args?;
                    current = match current {
                        Value::Function(f) => f(ctx, &args)?,
                        other => return Err(EvalError::invalid_operation(other.type_name(), "(", "call")),
                    };
                }
            }
        }
        Ok(current)
    })
}

fn is_empty_source(source: &str) -> bool {
    source.trim().is_empty()
}
