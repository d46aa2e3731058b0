//! Intermediate representation for generated parse trees.
//!
//! A tree is plain data: an [`Expr`] node is either the raw input argument, a
//! constant [`Terminal`], or a call of one [`Op`] on child expressions. Trees
//! are loaded from JSON or YAML with serde, or from the textual call syntax via
//! [`Expr::parse`](crate::eval::parser::parse_expr), and run by the
//! [`TreeEvaluator`](crate::eval::TreeEvaluator).

use crate::error::{EngineError, Result};
use crate::name::Gender;
use crate::token::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Static type of a value flowing through a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    Str,
    StrList,
    /// A single token that may be absent.
    Token,
    TokenList,
    TokenKind,
    Gender,
    Name,
}

impl ValueType {
    /// Whether a value of type `found` may be passed where `self` is expected.
    /// Integers and floats convert into each other.
    pub fn accepts(self, found: ValueType) -> bool {
        self == found
            || matches!(
                (self, found),
                (ValueType::Int, ValueType::Float) | (ValueType::Float, ValueType::Int)
            )
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Argument and result types of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub args: &'static [ValueType],
    pub ret: ValueType,
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

macro_rules! operators {
    ($($variant:ident => $name:literal ($($arg:ident),*) -> $ret:ident;)*) => {
        /// The closed operator set a tree may call.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Op {
            $($variant,)*
        }

        impl Op {
            pub const ALL: &'static [Op] = &[$(Op::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Op::$variant => $name,)*
                }
            }

            pub fn signature(self) -> Signature {
                match self {
                    $(Op::$variant => Signature {
                        args: &[$(ValueType::$arg),*],
                        ret: ValueType::$ret,
                    },)*
                }
            }
        }
    };
}

operators! {
    IfBoolString => "if_bool_string" (Bool, Str, Str) -> Str;
    IfBoolTokenlist => "if_bool_tokenlist" (Bool, TokenList, TokenList) -> TokenList;

    Trim => "trim" (Str) -> Str;
    ToLower => "to_lower" (Str) -> Str;
    SplitOnComma => "split_on_comma" (Str) -> StrList;
    GetFirstString => "get_first_string" (StrList) -> Str;
    GetLastString => "get_last_string" (StrList) -> Str;
    HasComma => "has_comma" (Str) -> Bool;

    Tokenize => "tokenize" (Str) -> TokenList;
    GetFirstToken => "get_first_token" (TokenList) -> Token;
    GetLastToken => "get_last_token" (TokenList) -> Token;
    SliceTokens => "slice_tokens" (TokenList, Int, Int) -> TokenList;
    LenTokens => "len_tokens" (TokenList) -> Int;
    DropFirst => "drop_first" (TokenList) -> TokenList;
    DropLast => "drop_last" (TokenList) -> TokenList;
    RemoveType => "remove_type" (TokenList, TokenKind) -> TokenList;
    FilterByType => "filter_by_type" (TokenList, TokenKind) -> TokenList;
    CountType => "count_type" (TokenList, TokenKind) -> Int;
    IndexOfType => "index_of_type" (TokenList, TokenKind) -> Int;
    GetRemainderTokens => "get_remainder_tokens" (TokenList, TokenList) -> TokenList;
    GetTokensBeforeComma => "get_tokens_before_comma" (TokenList) -> TokenList;
    GetTokensAfterComma => "get_tokens_after_comma" (TokenList) -> TokenList;

    IsTitle => "is_title" (Token) -> Bool;
    IsSalutation => "is_salutation" (Token) -> Bool;
    IsParticle => "is_particle" (Token) -> Bool;
    IsSuffix => "is_suffix" (Token) -> Bool;
    IsAllCaps => "is_all_caps" (Token) -> Bool;
    IsCapitalized => "is_capitalized" (Token) -> Bool;
    IsShort => "is_short" (Token) -> Bool;
    IsInitial => "is_initial" (Token) -> Bool;
    HasHyphen => "has_hyphen" (Token) -> Bool;
    HasPeriod => "has_period" (Token) -> Bool;
    IsRomanNumeral => "is_roman_numeral" (Token) -> Bool;
    IsCommonGivenName => "is_common_given_name" (Token) -> Bool;
    IsCommonFamilyName => "is_common_family_name" (Token) -> Bool;
    TokenLength => "token_length" (Token) -> Int;
    IdentityTokenType => "identity_token_type" (TokenKind) -> TokenKind;
    GetGenderFromSalutation => "get_gender_from_salutation" (Token) -> Gender;
    GetGenderFromName => "get_gender_from_name" (Str) -> Gender;

    ExtractSalutationStr => "extract_salutation_str" (TokenList) -> Str;
    ExtractTitleList => "extract_title_list" (TokenList) -> StrList;
    ExtractGivenStr => "extract_given_str" (TokenList) -> Str;
    ExtractFamilyStr => "extract_family_str" (TokenList) -> Str;
    ExtractMiddleStr => "extract_middle_str" (TokenList) -> StrList;
    ExtractSuffixList => "extract_suffix_list" (TokenList) -> StrList;
    ExtractParticlesList => "extract_particles_list" (TokenList) -> StrList;

    MakeNameObj => "make_name_obj"
        (Str, Str, Str, StrList, StrList, Str, Gender, StrList, StrList) -> Name;
    SetConfidence => "set_confidence" (Name, Float) -> Name;

    Add => "add" (Float, Float) -> Float;
    Sub => "sub" (Float, Float) -> Float;
    Mul => "mul" (Float, Float) -> Float;
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Op {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Op::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| EngineError::UnknownOperator(s.to_string()))
    }
}

/// Constant leaf of a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Terminal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Kind(TokenKind),
    Gender(Gender),
    EmptyStr,
    EmptyStrList,
    EmptyTokList,
    EmptyNameObj,
    EmptyToken,
}

impl Terminal {
    pub fn value_type(&self) -> ValueType {
        match self {
            Terminal::Bool(_) => ValueType::Bool,
            Terminal::Int(_) => ValueType::Int,
            Terminal::Float(_) => ValueType::Float,
            Terminal::Str(_) | Terminal::EmptyStr => ValueType::Str,
            Terminal::Kind(_) => ValueType::TokenKind,
            Terminal::Gender(_) => ValueType::Gender,
            Terminal::EmptyStrList => ValueType::StrList,
            Terminal::EmptyTokList => ValueType::TokenList,
            Terminal::EmptyNameObj => ValueType::Name,
            Terminal::EmptyToken => ValueType::Token,
        }
    }

    /// Named constants: `EMPTY_STR`, `TRUE`, ... Token kinds and genders are
    /// accepted bare (`TITLE`, `MALE`) or qualified (`RegexToken.TITLE`,
    /// `Gender.MALE`). `NAN`, `INF` and `NEG_INF` are the non-finite floats.
    pub fn from_name(name: &str) -> Option<Self> {
        let constant = match name {
            "EMPTY_STR" => Some(Terminal::EmptyStr),
            "EMPTY_STR_LIST" => Some(Terminal::EmptyStrList),
            "EMPTY_TOK_LIST" => Some(Terminal::EmptyTokList),
            "EMPTY_NAME_OBJ" => Some(Terminal::EmptyNameObj),
            "EMPTY_TOKEN" => Some(Terminal::EmptyToken),
            "TRUE" | "true" | "True" => Some(Terminal::Bool(true)),
            "FALSE" | "false" | "False" => Some(Terminal::Bool(false)),
            "NAN" => Some(Terminal::Float(f64::NAN)),
            "INF" => Some(Terminal::Float(f64::INFINITY)),
            "NEG_INF" => Some(Terminal::Float(f64::NEG_INFINITY)),
            _ => None,
        };
        if constant.is_some() {
            return constant;
        }

        let gender_name = name.strip_prefix("Gender.").unwrap_or(name);
        if let Some(gender) = gender_from_name(gender_name) {
            return Some(Terminal::Gender(gender));
        }

        let kind_name = name.strip_prefix("RegexToken.").unwrap_or(name);
        if kind_name.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
            return kind_name.parse().ok().map(Terminal::Kind);
        }
        None
    }
}

fn gender_from_name(name: &str) -> Option<Gender> {
    match name {
        "MALE" => Some(Gender::Male),
        "FEMALE" => Some(Gender::Female),
        "DIVERSE" => Some(Gender::Diverse),
        "UNKNOWN" => Some(Gender::Unknown),
        _ => None,
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Bool(true) => f.write_str("TRUE"),
            Terminal::Bool(false) => f.write_str("FALSE"),
            Terminal::Int(i) => write!(f, "{i}"),
            Terminal::Float(x) if x.is_nan() => f.write_str("NAN"),
            Terminal::Float(x) if x.is_infinite() && *x > 0.0 => f.write_str("INF"),
            Terminal::Float(x) if x.is_infinite() => f.write_str("NEG_INF"),
            Terminal::Float(x) if x.fract() == 0.0 => write!(f, "{x:.1}"),
            Terminal::Float(x) => write!(f, "{x}"),
            Terminal::Str(s) => write!(f, "{s:?}"),
            Terminal::Kind(kind) => f.write_str(kind.name()),
            Terminal::Gender(gender) => f.write_str(match gender {
                Gender::Male => "MALE",
                Gender::Female => "FEMALE",
                Gender::Diverse => "DIVERSE",
                Gender::Unknown => "UNKNOWN",
            }),
            Terminal::EmptyStr => f.write_str("EMPTY_STR"),
            Terminal::EmptyStrList => f.write_str("EMPTY_STR_LIST"),
            Terminal::EmptyTokList => f.write_str("EMPTY_TOK_LIST"),
            Terminal::EmptyNameObj => f.write_str("EMPTY_NAME_OBJ"),
            Terminal::EmptyToken => f.write_str("EMPTY_TOKEN"),
        }
    }
}

/// Expression tree node.
///
/// # Examples
///
/// ```rust
/// use evoname::{Expr, Op, ValueType};
///
/// let given = Expr::call(Op::ExtractGivenStr, vec![Expr::call(Op::Tokenize, vec![Expr::Arg])]);
/// assert_eq!(given.to_string(), "extract_given_str(tokenize(raw_input))");
/// assert_eq!(given.check().unwrap(), ValueType::Str);
/// assert_eq!(given.depth(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// The raw input string.
    Arg,
    Const {
        value: Terminal,
    },
    Call {
        op: Op,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn call(op: Op, args: Vec<Expr>) -> Self {
        Expr::Call { op, args }
    }

    pub fn constant(value: Terminal) -> Self {
        Expr::Const { value }
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::constant(Terminal::Str(value.into()))
    }

    pub fn kind(kind: TokenKind) -> Self {
        Expr::constant(Terminal::Kind(kind))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse the textual call syntax, e.g. `extract_given_str(tokenize(ARG0))`.
    pub fn parse(text: &str) -> Result<Self> {
        crate::eval::parser::parse_expr(text)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((expr, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let Expr::Call { args, .. } = expr {
                pending.extend(args.iter().map(|arg| (arg, depth + 1)));
            }
        }
        deepest
    }

    /// `TreeTooDeep` when the tree is deeper than `limit`. Walks without
    /// recursion, so it is safe to call before [`Expr::check`].
    pub fn check_depth(&self, limit: usize) -> Result<()> {
        if self.depth() > limit {
            return Err(EngineError::TreeTooDeep { limit });
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        match self {
            Expr::Call { args, .. } => 1 + args.iter().map(Expr::node_count).sum::<usize>(),
            _ => 1,
        }
    }

    /// Declared result type, without checking the children.
    pub fn result_type(&self) -> ValueType {
        match self {
            Expr::Arg => ValueType::Str,
            Expr::Const { value } => value.value_type(),
            Expr::Call { op, .. } => op.signature().ret,
        }
    }

    /// Type-check the whole tree against operator signatures.
    pub fn check(&self) -> Result<ValueType> {
        let Expr::Call { op, args } = self else {
            return Ok(self.result_type());
        };

        let signature = op.signature();
        if args.len() != signature.arity() {
            return Err(EngineError::ArityMismatch {
                op: op.name().to_string(),
                expected: signature.arity(),
                found: args.len(),
            });
        }

        for (position, (arg, expected)) in args.iter().zip(signature.args).enumerate() {
            let found = arg.check()?;
            if !expected.accepts(found) {
                return Err(EngineError::TypeMismatch {
                    op: op.name().to_string(),
                    position,
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }

        Ok(signature.ret)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Arg => f.write_str("raw_input"),
            Expr::Const { value } => write!(f, "{value}"),
            Expr::Call { op, args } => {
                write!(f, "{op}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
