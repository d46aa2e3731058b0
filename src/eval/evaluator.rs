//! Tree evaluation.
//!
//! The evaluator walks an [`Expr`] depth first and dispatches every call to
//! the matching primitive. It holds the compiled pattern set of the active
//! locale, which the `tokenize` operator uses.

use super::types::Value;
use crate::error::{EngineError, Result};
use crate::ir::{Expr, Op, ValueType};
use crate::lexer;
use crate::name::NameRecord;
use crate::primitives as p;
use crate::registry::PatternSet;
use crate::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How argument types are enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeChecking {
    /// Replace ill-typed or missing arguments by the neutral value of the
    /// expected type and ignore surplus arguments.
    #[default]
    Permissive,
    /// Reject trees that do not type-check before evaluating anything.
    Strict,
}

/// Evaluator configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Deepest node level that is evaluated; deeper trees fail with
    /// [`EngineError::TreeTooDeep`].
    pub max_depth: usize,
    pub type_checking: TypeChecking,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            type_checking: TypeChecking::Permissive,
        }
    }
}

/// Result of evaluating one tree on one input.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEvaluationResult {
    pub value: Value,
    /// Number of nodes evaluated
    pub nodes_evaluated: usize,
    /// Arguments replaced by a neutral value
    pub coercions: usize,
}

/// Evaluator for expression trees against raw name strings.
#[derive(Debug)]
pub struct TreeEvaluator<'p> {
    patterns: &'p PatternSet,
    config: EvaluatorConfig,
    nodes_evaluated: usize,
    coercions: usize,
}

impl<'p> TreeEvaluator<'p> {
    pub fn new(patterns: &'p PatternSet) -> Self {
        Self::with_config(patterns, EvaluatorConfig::default())
    }

    pub fn with_config(patterns: &'p PatternSet, config: EvaluatorConfig) -> Self {
        Self {
            patterns,
            config,
            nodes_evaluated: 0,
            coercions: 0,
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate `expr` with `raw` bound to the input argument.
    pub fn evaluate(&mut self, expr: &Expr, raw: &str) -> Result<TreeEvaluationResult> {
        self.nodes_evaluated = 0;
        self.coercions = 0;

        if self.config.type_checking == TypeChecking::Strict {
            expr.check_depth(self.config.max_depth)?;
            expr.check()?;
        }

        let value = self.eval_node(expr, raw, 1)?;
        Ok(TreeEvaluationResult {
            value,
            nodes_evaluated: self.nodes_evaluated,
            coercions: self.coercions,
        })
    }

    /// Evaluate a tree whose root must produce a name record.
    pub fn evaluate_name(&mut self, expr: &Expr, raw: &str) -> Result<NameRecord> {
        let result = self.evaluate(expr, raw)?;
        let found = result.value.value_type();
        result
            .value
            .into_name()
            .ok_or_else(|| EngineError::NotANameRecord(found.to_string()))
    }

    fn eval_node(&mut self, expr: &Expr, raw: &str, depth: usize) -> Result<Value> {
        if depth > self.config.max_depth {
            return Err(EngineError::TreeTooDeep {
                limit: self.config.max_depth,
            });
        }
        self.nodes_evaluated += 1;

        match expr {
            Expr::Arg => Ok(Value::Str(raw.to_string())),
            Expr::Const { value } => Ok(Value::from_terminal(value)),
            Expr::Call { op, args } => {
                let signature = op.signature();
                let mut values = Vec::with_capacity(signature.arity());

                for (position, &expected) in signature.args.iter().enumerate() {
                    let value = match args.get(position) {
                        Some(arg) => {
                            let value = self.eval_node(arg, raw, depth + 1)?;
                            self.coerce(*op, position, value, expected)
                        }
                        None => {
                            self.coercions += 1;
                            debug!(op = op.name(), position, "missing argument replaced");
                            Value::neutral(expected)
                        }
                    };
                    values.push(value);
                }

                if args.len() > signature.arity() {
                    debug!(
                        op = op.name(),
                        extra = args.len() - signature.arity(),
                        "surplus arguments ignored"
                    );
                }

                Ok(apply(*op, Args(values), self.patterns))
            }
        }
    }

    fn coerce(&mut self, op: Op, position: usize, value: Value, expected: ValueType) -> Value {
        let found = value.value_type();
        match value.convert(expected) {
            Some(value) => value,
            None => {
                self.coercions += 1;
                debug!(
                    op = op.name(),
                    position,
                    %expected,
                    %found,
                    "argument coerced to neutral value"
                );
                Value::neutral(expected)
            }
        }
    }
}

/// Evaluated arguments, already converted to the operator's signature.
struct Args(Vec<Value>);

impl Args {
    fn take(&mut self, i: usize) -> Value {
        std::mem::replace(&mut self.0[i], Value::Bool(false))
    }

    fn bool(&self, i: usize) -> bool {
        self.0[i].as_bool()
    }

    fn int(&self, i: usize) -> i64 {
        self.0[i].as_int()
    }

    fn float(&self, i: usize) -> f64 {
        self.0[i].as_float()
    }

    fn str(&self, i: usize) -> &str {
        self.0[i].as_str()
    }

    fn token(&self, i: usize) -> Option<&Token> {
        self.0[i].as_token()
    }

    fn tokens(&self, i: usize) -> &[Token] {
        self.0[i].as_tokens()
    }

    fn kind(&self, i: usize) -> TokenKind {
        self.0[i].as_kind()
    }

    fn string(&mut self, i: usize) -> String {
        self.take(i).into_string()
    }

    fn strings(&mut self, i: usize) -> Vec<String> {
        self.take(i).into_strings()
    }

    fn token_list(&mut self, i: usize) -> Vec<Token> {
        self.take(i).into_tokens()
    }
}

fn apply(op: Op, mut args: Args, patterns: &PatternSet) -> Value {
    use Value as V;

    match op {
        Op::IfBoolString => {
            let cond = args.bool(0);
            V::Str(p::if_bool_string(cond, args.string(1), args.string(2)))
        }
        Op::IfBoolTokenlist => {
            let cond = args.bool(0);
            V::TokenList(p::if_bool_tokenlist(cond, args.token_list(1), args.token_list(2)))
        }

        Op::Trim => V::Str(p::trim(args.str(0))),
        Op::ToLower => V::Str(p::to_lower(args.str(0))),
        Op::SplitOnComma => V::StrList(p::split_on_comma(args.str(0))),
        Op::GetFirstString => V::Str(p::get_first_string(&args.strings(0))),
        Op::GetLastString => V::Str(p::get_last_string(&args.strings(0))),
        Op::HasComma => V::Bool(p::has_comma(args.str(0))),

        Op::Tokenize => V::TokenList(lexer::tokenize(args.str(0), patterns)),
        Op::GetFirstToken => V::Token(p::get_first_token(args.tokens(0)).cloned()),
        Op::GetLastToken => V::Token(p::get_last_token(args.tokens(0)).cloned()),
        Op::SliceTokens => V::TokenList(p::slice_tokens(args.tokens(0), args.int(1), args.int(2))),
        Op::LenTokens => V::Int(p::len_tokens(args.tokens(0)) as i64),
        Op::DropFirst => V::TokenList(p::drop_first(args.tokens(0))),
        Op::DropLast => V::TokenList(p::drop_last(args.tokens(0))),
        Op::RemoveType => V::TokenList(p::remove_type(args.tokens(0), args.kind(1))),
        Op::FilterByType => V::TokenList(p::filter_by_type(args.tokens(0), args.kind(1))),
        Op::CountType => V::Int(p::count_type(args.tokens(0), args.kind(1)) as i64),
        Op::IndexOfType => V::Int(p::index_of_type(args.tokens(0), args.kind(1))),
        Op::GetRemainderTokens => {
            V::TokenList(p::get_remainder_tokens(args.tokens(0), args.tokens(1)))
        }
        Op::GetTokensBeforeComma => V::TokenList(p::get_tokens_before_comma(args.tokens(0))),
        Op::GetTokensAfterComma => V::TokenList(p::get_tokens_after_comma(args.tokens(0))),

        Op::IsTitle => V::Bool(p::is_title(args.token(0))),
        Op::IsSalutation => V::Bool(p::is_salutation(args.token(0))),
        Op::IsParticle => V::Bool(p::is_particle(args.token(0))),
        Op::IsSuffix => V::Bool(p::is_suffix(args.token(0))),
        Op::IsAllCaps => V::Bool(p::is_all_caps(args.token(0))),
        Op::IsCapitalized => V::Bool(p::is_capitalized(args.token(0))),
        Op::IsShort => V::Bool(p::is_short(args.token(0))),
        Op::IsInitial => V::Bool(p::is_initial(args.token(0))),
        Op::HasHyphen => V::Bool(p::has_hyphen(args.token(0))),
        Op::HasPeriod => V::Bool(p::has_period(args.token(0))),
        Op::IsRomanNumeral => V::Bool(p::is_roman_numeral(args.token(0))),
        Op::IsCommonGivenName => V::Bool(p::is_common_given_name(args.token(0))),
        Op::IsCommonFamilyName => V::Bool(p::is_common_family_name(args.token(0))),
        Op::TokenLength => V::Int(p::token_length(args.token(0)) as i64),
        Op::IdentityTokenType => V::Kind(p::identity_token_type(args.kind(0))),
        Op::GetGenderFromSalutation => V::Gender(p::get_gender_from_salutation(args.token(0))),
        Op::GetGenderFromName => V::Gender(p::get_gender_from_name(args.str(0))),

        Op::ExtractSalutationStr => V::Str(p::extract_salutation_str(args.tokens(0))),
        Op::ExtractTitleList => V::StrList(p::extract_title_list(args.tokens(0))),
        Op::ExtractGivenStr => V::Str(p::extract_given_str(args.tokens(0))),
        Op::ExtractFamilyStr => V::Str(p::extract_family_str(args.tokens(0))),
        Op::ExtractMiddleStr => V::StrList(p::extract_middle_str(args.tokens(0))),
        Op::ExtractSuffixList => V::StrList(p::extract_suffix_list(args.tokens(0))),
        Op::ExtractParticlesList => V::StrList(p::extract_particles_list(args.tokens(0))),

        Op::MakeNameObj => {
            let gender = args.0[6].as_gender();
            V::Name(Box::new(p::make_name_obj(
                args.string(0),
                args.string(1),
                args.string(2),
                args.strings(3),
                args.strings(4),
                args.string(5),
                gender,
                args.strings(7),
                args.strings(8),
            )))
        }
        Op::SetConfidence => {
            let confidence = args.float(1);
            match args.take(0) {
                V::Name(mut record) => {
                    p::set_confidence(&mut record, confidence);
                    V::Name(record)
                }
                other => other,
            }
        }

        Op::Add => V::Float(p::add(args.float(0), args.float(1))),
        Op::Sub => V::Float(p::sub(args.float(0), args.float(1))),
        Op::Mul => V::Float(p::mul(args.float(0), args.float(1))),
    }
}
