//! The immutable prefix/operator registry a [`Parser`](crate::parser::Parser)
//! consults (§3 Data model, §4.2 Language and Operator Algebra).

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use valx_eval::Evaluable;

use crate::operator::{initiate, InitiatedOperator, OperatorEntry};
use crate::parser::Parser;
use crate::path::VariableSelector;
use crate::ParseError;

pub type PrefixHandler = Arc<dyn Fn(&mut Parser) -> Result<Evaluable, ParseError> + Send + Sync>;
pub type InitHook = Arc<dyn Fn() -> Evaluable + Send + Sync>;

/// Two immutable maps plus the handful of optional hooks a dialect can
/// register: symbol-keyed and identifier-keyed prefixes, and a name-keyed
/// operator table. Build one with [`Language::new`] + [`Language::with_*`],
/// or combine existing ones with [`Language::merge`].
#[derive(Clone, Default)]
pub struct Language {
    prefix_runes: HashMap<char, PrefixHandler>,
    prefix_idents: IndexMap<String, PrefixHandler>,
    operators: IndexMap<String, OperatorEntry>,
    variable_selector: Option<Arc<dyn VariableSelector>>,
    init_hook: Option<InitHook>,
}

impl Language {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix_rune(mut self, rune: char, handler: PrefixHandler) -> Self {
        self.prefix_runes.insert(rune, handler);
        self
    }

    pub fn with_prefix_ident(mut self, name: impl Into<String>, handler: PrefixHandler) -> Self {
        self.prefix_idents.insert(name.into(), handler);
        self
    }

    pub fn with_operator(mut self, name: impl Into<String>, entry: OperatorEntry) -> Self {
        let name = name.into();
        let merged = match self.operators.remove(&name) {
            Some(existing) => existing
                .merge(entry)
                .unwrap_or_else(|e| panic!("operator {name}: {e}")),
            None => entry,
        };
        self.operators.insert(name, merged);
        self
    }

    pub fn with_variable_selector(mut self, selector: Arc<dyn VariableSelector>) -> Self {
        self.variable_selector = Some(selector);
        self
    }

    pub fn with_init_hook(mut self, hook: InitHook) -> Self {
        self.init_hook = Some(hook);
        self
    }

    pub fn prefix_for_rune(&self, rune: char) -> Option<&PrefixHandler> {
        self.prefix_runes.get(&rune)
    }

    pub fn prefix_for_ident(&self, name: &str) -> Option<&PrefixHandler> {
        self.prefix_idents.get(name)
    }

    pub fn variable_selector(&self) -> Option<&Arc<dyn VariableSelector>> {
        self.variable_selector.as_ref()
    }

    pub fn init_hook(&self) -> Option<&InitHook> {
        self.init_hook.as_ref()
    }

    /// The finalised (initiated) operator registered under `name`, or
    /// `None` if unregistered.
    pub fn operator(&self, name: &str) -> Option<InitiatedOperator> {
        self.operators.get(name).map(|e| initiate(name, e))
    }

    /// Every non-empty prefix of every *symbolic* (non-identifier-shaped)
    /// registered operator name, used by the parser's greedy lexeme scan.
    /// An operator name counts as symbolic when its first character is not
    /// alphabetic/underscore (so `in` and other word operators are matched
    /// as whole idents instead, per §4.3).
    pub fn symbol_operator_prefixes(&self) -> std::collections::HashSet<String> {
        let mut set = std::collections::HashSet::new();
        for name in self.operators.keys() {
            if name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_') {
                continue;
            }
            for p in crate::operator::prefixes_of(name) {
                set.insert(p);
            }
        }
        set
    }

    pub fn has_operator(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// Union two Languages. Prefix keys present in both take `other`'s
    /// handler (the merged-in Language wins, mirroring the common
    /// "extend/override" use of merge); operator entries with the same name
    /// merge field-wise (§4.2). Deterministic and idempotent:
    /// `merge(L, L.clone())` reproduces `L`.
    pub fn merge(mut self, other: Language) -> Self {
        for (k, v) in other.prefix_runes {
            self.prefix_runes.insert(k, v);
        }
        for (k, v) in other.prefix_idents {
            self.prefix_idents.insert(k, v);
        }
        for (name, entry) in other.operators {
            let merged = match self.operators.remove(&name) {
                Some(existing) => existing
                    .merge(entry)
                    .unwrap_or_else(|e| panic!("operator {name}: {e}")),
                None => entry,
            };
            self.operators.insert(name, merged);
        }
        if other.variable_selector.is_some() {
            self.variable_selector = other.variable_selector;
        }
        if other.init_hook.is_some() {
            self.init_hook = other.init_hook;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valx_eval::Value;

    fn sample() -> Language {
        Language::new().with_operator(
            "+",
            OperatorEntry {
                precedence: Some(5),
                number: Some(Arc::new(|_ctx, a, b| Ok(Value::Number(a + b)))),
                ..Default::default()
            },
        )
    }

    #[test]
    fn merge_is_idempotent() {
        let l = sample();
        let merged = l.clone().merge(l.clone());
        assert_eq!(merged.operators.len(), l.operators.len());
        assert_eq!(merged.operator("+").unwrap().precedence, l.operator("+").unwrap().precedence);
    }

    #[test]
    fn symbol_prefixes_exclude_word_operators() {
        let l = Language::new()
            .with_operator("in", OperatorEntry::default())
            .with_operator("<=", OperatorEntry { precedence: Some(3), ..Default::default() });
        let prefixes = l.symbol_operator_prefixes();
        assert!(prefixes.contains("<"));
        assert!(prefixes.contains("<="));
        assert!(!prefixes.contains("i"));
    }
}
