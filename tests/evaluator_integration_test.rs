//! Tree evaluation through the public API: textual and serialized trees,
//! permissive and strict typing, and resource limits.

use evoname::{
    DefinitionsDocument, EngineConfig, EngineError, EvaluatorConfig, Expr, Gender, NameEngine,
    Op, PatternSet, Terminal, TokenKind, TreeEvaluator, TypeChecking, Value,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn patterns() -> PatternSet {
    let doc = DefinitionsDocument::new()
        .with_pattern(TokenKind::Salutation, "en", r"Mrs?\.", "i")
        .with_pattern(TokenKind::Title, "en", r"Dr\.", "")
        .with_pattern(TokenKind::Suffix, "en", r"Jr\.|III\b", "")
        .with_pattern(TokenKind::Particle, "en", r"van\b|de\b", "")
        .with_pattern(TokenKind::Initial, "default", r"\p{Lu}\.", "")
        .with_pattern(TokenKind::Word, "default", r"\p{L}[\p{L}'\-]*", "")
        .with_pattern(TokenKind::Punct, "default", r"[^\s\p{L}]", "");
    PatternSet::compile("en", &doc, true).unwrap().0
}

fn eval(text: &str, raw: &str) -> Value {
    let patterns = patterns();
    let expr = Expr::parse(text).unwrap();
    TreeEvaluator::new(&patterns).evaluate(&expr, raw).unwrap().value
}

#[test]
fn test_generated_tree_text() {
    init_tracing();
    let text = "set_confidence(\
        make_name_obj(ARG0, \
            extract_given_str(remove_type(tokenize(ARG0), RegexToken.INITIAL)), \
            extract_family_str(tokenize(ARG0)), \
            extract_middle_str(filter_by_type(tokenize(ARG0), TOKEN_INITIAL)), \
            extract_title_list(tokenize(ARG0)), \
            extract_salutation_str(tokenize(ARG0)), \
            get_gender_from_salutation(get_first_token(tokenize(ARG0))), \
            extract_suffix_list(tokenize(ARG0)), \
            extract_particles_list(tokenize(ARG0))), \
        mul(0.5, add(1, 0.2)))";

    let Value::Name(record) = eval(text, "Mrs. Dr. Jane Q. van Dyke Jr.") else {
        panic!("expected a name record");
    };

    assert_eq!(record.salutation, "Mrs.");
    assert_eq!(record.title, vec!["Dr."]);
    assert_eq!(record.given, "Jane");
    assert_eq!(record.family, "Dyke");
    assert!(record.middle.is_empty());
    assert_eq!(record.particles, vec!["van"]);
    assert_eq!(record.suffix, vec!["Jr."]);
    assert_eq!(record.gender, Gender::Female);
    assert!((record.confidence - 0.6).abs() < 1e-12);
}

#[test]
fn test_sequence_operators() {
    let raw = "Dr. Mary Ann Smith";
    assert_eq!(eval("len_tokens(tokenize(ARG0))", raw), Value::Int(4));
    assert_eq!(
        eval("len_tokens(drop_first(drop_last(tokenize(ARG0))))", raw),
        Value::Int(2)
    );
    assert_eq!(
        eval("index_of_type(tokenize(ARG0), RegexToken.WORD)", raw),
        Value::Int(1)
    );
    assert_eq!(
        eval("index_of_type(tokenize(ARG0), RegexToken.SUFFIX)", raw),
        Value::Int(-1)
    );
    assert_eq!(
        eval("count_type(tokenize(ARG0), WORD)", raw),
        Value::Int(3)
    );
    assert_eq!(
        eval("extract_given_str(slice_tokens(tokenize(ARG0), 2, 10))", raw),
        Value::Str("Ann".to_string())
    );
    assert_eq!(
        eval(
            "len_tokens(get_remainder_tokens(tokenize(ARG0), filter_by_type(tokenize(ARG0), WORD)))",
            raw
        ),
        Value::Int(1)
    );
}

#[test]
fn test_predicates_on_tokens() {
    assert_eq!(
        eval("is_roman_numeral(get_last_token(tokenize(ARG0)))", "Henry VIII"),
        Value::Bool(true)
    );
    assert_eq!(
        eval("is_common_family_name(get_last_token(tokenize(ARG0)))", "JOHN SMITH"),
        Value::Bool(true)
    );
    assert_eq!(
        eval("is_all_caps(get_last_token(tokenize(ARG0)))", "JOHN SMITH"),
        Value::Bool(true)
    );
    assert_eq!(
        eval("has_hyphen(get_last_token(tokenize(ARG0)))", "Anna Meyer-Lang"),
        Value::Bool(true)
    );
    assert_eq!(
        eval("is_initial(get_first_token(tokenize(ARG0)))", "J. Smith"),
        Value::Bool(true)
    );
    assert_eq!(
        eval("token_length(get_first_token(tokenize(ARG0)))", "Jürgen"),
        Value::Int(6)
    );
    assert_eq!(
        eval("is_title(get_first_token(EMPTY_TOK_LIST))", "anything"),
        Value::Bool(false)
    );
    assert_eq!(
        eval("get_gender_from_name(ARG0)", "Linda Jones"),
        Value::Gender(Gender::Female)
    );
}

#[test]
fn test_permissive_coercion() {
    init_tracing();
    let patterns = patterns();
    let mut evaluator = TreeEvaluator::new(&patterns);

    // A token list where a single token is expected, and a string where a
    // token kind is expected.
    let expr = Expr::call(
        Op::IsTitle,
        vec![Expr::call(Op::Tokenize, vec![Expr::Arg])],
    );
    let result = evaluator.evaluate(&expr, "Dr. Smith").unwrap();
    assert_eq!(result.value, Value::Bool(false));
    assert_eq!(result.coercions, 1);

    let expr = Expr::call(
        Op::CountType,
        vec![
            Expr::call(Op::Tokenize, vec![Expr::Arg]),
            Expr::str("WORD"),
            Expr::Arg,
        ],
    );
    let result = evaluator.evaluate(&expr, "Dr. Smith").unwrap();
    // The string became the neutral kind PUNCT; the surplus argument is ignored.
    assert_eq!(result.value, Value::Int(0));
    assert_eq!(result.coercions, 1);
    assert_eq!(result.nodes_evaluated, 4);

    let expr = Expr::call(Op::MakeNameObj, vec![Expr::Arg]);
    let result = evaluator.evaluate(&expr, "Smith").unwrap();
    assert_eq!(result.coercions, 8);
    let Value::Name(record) = result.value else {
        panic!("expected a name record");
    };
    assert_eq!(record.raw, "Smith");
    assert!(record.family.is_empty());
}

#[test]
fn test_strict_rejects_ill_typed_trees() {
    let patterns = patterns();
    let config = EvaluatorConfig {
        type_checking: TypeChecking::Strict,
        ..Default::default()
    };
    let mut evaluator = TreeEvaluator::with_config(&patterns, config);

    let ill_typed = Expr::parse("is_title(tokenize(ARG0))").unwrap();
    match evaluator.evaluate(&ill_typed, "Dr. Smith") {
        Err(EngineError::TypeMismatch {
            op,
            position,
            expected,
            found,
        }) => {
            assert_eq!(op, "is_title");
            assert_eq!(position, 0);
            assert_eq!(expected, "Token");
            assert_eq!(found, "TokenList");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }

    let short = Expr::parse("slice_tokens(tokenize(ARG0), 1)").unwrap();
    assert!(matches!(
        evaluator.evaluate(&short, "Dr. Smith"),
        Err(EngineError::ArityMismatch {
            expected: 3,
            found: 2,
            ..
        })
    ));

    // Integers are accepted where floats are expected.
    let scored = Expr::parse("set_confidence(EMPTY_NAME_OBJ, 1)").unwrap();
    assert!(evaluator.evaluate(&scored, "x").is_ok());
}

#[test]
fn test_depth_limit() {
    let mut expr = Expr::Arg;
    for _ in 0..10 {
        expr = Expr::call(Op::Trim, vec![expr]);
    }
    assert_eq!(expr.depth(), 11);

    let patterns = patterns();
    let mut shallow = TreeEvaluator::with_config(
        &patterns,
        EvaluatorConfig {
            max_depth: 10,
            ..Default::default()
        },
    );
    assert_eq!(
        shallow.evaluate(&expr, " x ").unwrap_err(),
        EngineError::TreeTooDeep { limit: 10 }
    );

    let mut deep_enough = TreeEvaluator::with_config(
        &patterns,
        EvaluatorConfig {
            max_depth: 11,
            ..Default::default()
        },
    );
    assert_eq!(
        deep_enough.evaluate(&expr, " x ").unwrap().value,
        Value::Str("x".to_string())
    );
}

#[test]
fn test_serialized_tree_formats_agree() {
    let text = "make_name_obj(raw_input, extract_given_str(tokenize(raw_input)), \
                extract_family_str(tokenize(raw_input)), EMPTY_STR_LIST, EMPTY_STR_LIST, \
                EMPTY_STR, Gender.DIVERSE, EMPTY_STR_LIST, EMPTY_STR_LIST)";
    let from_text = Expr::parse(text).unwrap();

    let json = serde_json::to_string(&from_text).unwrap();
    let yaml = serde_yaml::to_string(&from_text).unwrap();
    assert_eq!(Expr::from_json_str(&json).unwrap(), from_text);
    assert_eq!(Expr::from_yaml_str(&yaml).unwrap(), from_text);

    let engine = NameEngine::with_config(
        EngineConfig::new()
            .with_definitions_path("/nonexistent/evoname/regex_definitions.json")
            .with_bundled_fallback(true),
    );
    let record = engine.parse("Petra Schmidt", &from_text).unwrap();
    assert_eq!(record.gender, Gender::Diverse);
    assert_eq!(record.given, "Petra");
}

#[test]
fn test_engine_strict_mode_from_config() {
    let engine = NameEngine::with_config(
        EngineConfig::development()
            .with_definitions_path("/nonexistent/evoname/regex_definitions.json"),
    );
    let tree = Expr::call(
        Op::MakeNameObj,
        vec![Expr::Arg, Expr::constant(Terminal::Kind(TokenKind::Word))],
    );
    assert!(matches!(
        engine.parse("Hans", &tree),
        Err(EngineError::ArityMismatch { .. })
    ));
}
