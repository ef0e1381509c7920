use super::*;

fn match_expected(input: &str, expected: Vec<(TokenKind, &str)>) {
    let tokens = Lexer::new(input).tokenize().unwrap();
    assert_eq!(tokens.len(), expected.len() + 1, "{input:?} lexed to {tokens:?}");
    assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);

    tokens
        .iter()
        .zip(expected.iter())
        .for_each(|(t, (kind, lexeme))| {
            assert_eq!(t.kind, *kind, "in {input:?}");
            assert_eq!(t.lexeme, *lexeme, "in {input:?}");
        });
}

fn lex_error(input: &str) -> LexerError {
    Lexer::new(input)
        .tokenize()
        .expect_err("input should not tokenize")
}

#[test]
fn test_simple_syntax() {
    let input = "+ - = < > !\n// hello\nint name;";
    let tokens = Lexer::new(input).tokenize().unwrap();
    let expected = vec![
        (TokenKind::Add, Span(0, 1), 1, 1),
        (TokenKind::Sub, Span(2, 3), 1, 3),
        (TokenKind::Assign, Span(4, 5), 1, 5),
        (TokenKind::Lt, Span(6, 7), 1, 7),
        (TokenKind::Gt, Span(8, 9), 1, 9),
        (TokenKind::Not, Span(10, 11), 1, 11),
        (TokenKind::KInt, Span(21, 24), 3, 1),
        (TokenKind::Identifier, Span(25, 29), 3, 5),
        (TokenKind::Semicolon, Span(29, 30), 3, 9),
        (TokenKind::EOF, Span(30, 30), 3, 10),
    ];

    assert_eq!(tokens.len(), expected.len());

    tokens
        .iter()
        .zip(expected.iter())
        .for_each(|(t, (kind, span, line, column))| {
            assert_eq!(t.kind, *kind);
            assert_eq!(t.span, *span);
            assert_eq!(
                t.position,
                Position {
                    line: *line,
                    column: *column
                }
            );
        });
}

#[test]
fn test_multi_char_toks() {
    match_expected(
        "++ -- == != <= >= && ||",
        vec![
            (TokenKind::Inc, "++"),
            (TokenKind::Dec, "--"),
            (TokenKind::Equal, "=="),
            (TokenKind::NotEqual, "!="),
            (TokenKind::Le, "<="),
            (TokenKind::Ge, ">="),
            (TokenKind::And, "&&"),
            (TokenKind::Or, "||"),
        ],
    );
}

#[test]
fn test_longest_match_has_no_three_char_ops() {
    match_expected(
        "+++ === ---",
        vec![
            (TokenKind::Inc, "++"),
            (TokenKind::Add, "+"),
            (TokenKind::Equal, "=="),
            (TokenKind::Assign, "="),
            (TokenKind::Dec, "--"),
            (TokenKind::Sub, "-"),
        ],
    );
}

#[test]
fn test_punctuators() {
    match_expected(
        "( ) { } ; , : . * / %",
        vec![
            (TokenKind::LParen, "("),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Comma, ","),
            (TokenKind::Colon, ":"),
            (TokenKind::Dot, "."),
            (TokenKind::Mul, "*"),
            (TokenKind::Div, "/"),
            (TokenKind::Mod, "%"),
        ],
    );
}

#[test]
fn test_keywords() {
    let input = "break case continue default else for if return switch while \
                 int float string void struct auto";
    let expected = vec![
        TokenKind::KBreak,
        TokenKind::KCase,
        TokenKind::KContinue,
        TokenKind::KDefault,
        TokenKind::KElse,
        TokenKind::KFor,
        TokenKind::KIf,
        TokenKind::KReturn,
        TokenKind::KSwitch,
        TokenKind::KWhile,
        TokenKind::KInt,
        TokenKind::KFloat,
        TokenKind::KString,
        TokenKind::KVoid,
        TokenKind::KStruct,
        TokenKind::KAuto,
    ];
    let tokens = Lexer::new(input).tokenize().unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(&kinds[..expected.len()], &expected[..]);
    assert!(kinds[..expected.len()]
        .iter()
        .all(|kind| KEYWORDS.values().any(|k| k == kind)));
}

#[test]
fn test_keywords_are_case_sensitive() {
    match_expected(
        "Int INT whileX _if",
        vec![
            (TokenKind::Identifier, "Int"),
            (TokenKind::Identifier, "INT"),
            (TokenKind::Identifier, "whileX"),
            (TokenKind::Identifier, "_if"),
        ],
    );
}

#[test]
fn test_leading_zero_integers() {
    match_expected(
        "00 007 012",
        vec![
            (TokenKind::IntLit, "0"),
            (TokenKind::IntLit, "0"),
            (TokenKind::IntLit, "0"),
            (TokenKind::IntLit, "0"),
            (TokenKind::IntLit, "7"),
            (TokenKind::IntLit, "0"),
            (TokenKind::IntLit, "12"),
        ],
    );
    match_expected(
        "0x123",
        vec![(TokenKind::IntLit, "0"), (TokenKind::Identifier, "x123")],
    );
}

#[test]
fn test_float_literals() {
    match_expected(
        "1.5 1. .5 1e10 1.5E-3 2e+7 .5e2 0.25",
        vec![
            (TokenKind::FloatLit, "1.5"),
            (TokenKind::FloatLit, "1."),
            (TokenKind::FloatLit, ".5"),
            (TokenKind::FloatLit, "1e10"),
            (TokenKind::FloatLit, "1.5E-3"),
            (TokenKind::FloatLit, "2e+7"),
            (TokenKind::FloatLit, ".5e2"),
            (TokenKind::FloatLit, "0.25"),
        ],
    );
}

#[test]
fn test_dot_glues_to_preceding_digits() {
    match_expected(
        "1..3",
        vec![(TokenKind::FloatLit, "1."), (TokenKind::FloatLit, ".3")],
    );
    match_expected(
        "a.b",
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::Dot, "."),
            (TokenKind::Identifier, "b"),
        ],
    );
}

#[test]
fn test_incomplete_exponent_is_not_consumed() {
    match_expected(
        "1e",
        vec![(TokenKind::IntLit, "1"), (TokenKind::Identifier, "e")],
    );
    match_expected(
        "1e+ 2",
        vec![
            (TokenKind::IntLit, "1"),
            (TokenKind::Identifier, "e"),
            (TokenKind::Add, "+"),
            (TokenKind::IntLit, "2"),
        ],
    );
    match_expected(
        "1.e",
        vec![(TokenKind::FloatLit, "1."), (TokenKind::Identifier, "e")],
    );
}

#[test]
fn test_strings() {
    let input = r#" "hello" "" "a\nb" "tab\there" "q\"uote" "back\\slash" "#;
    match_expected(
        input,
        vec![
            (TokenKind::StringLit, "hello"),
            (TokenKind::StringLit, ""),
            (TokenKind::StringLit, r"a\nb"),
            (TokenKind::StringLit, r"tab\there"),
            (TokenKind::StringLit, r#"q\"uote"#),
            (TokenKind::StringLit, r"back\\slash"),
        ],
    );
}

#[test]
fn test_string_span_includes_quotes() {
    let tokens = Lexer::new("  \"ab\"").tokenize().unwrap();
    assert_eq!(tokens[0].span, Span(2, 6));
    assert_eq!(tokens[0].lexeme, "ab");
}

#[test]
fn test_unclosed_string() {
    let err = lex_error("\"abc");
    assert_eq!(err.error, LexerErrorType::UncloseString("abc".to_string()));
    assert_eq!(err.position, Position { line: 1, column: 1 });

    let err = lex_error("x = \"abc\ndef\"");
    assert_eq!(err.error, LexerErrorType::UncloseString("abc".to_string()));
    assert_eq!(err.position, Position { line: 1, column: 5 });

    let err = lex_error("\"abc\\");
    assert_eq!(err.error, LexerErrorType::UncloseString("abc\\".to_string()));
}

#[test]
fn test_illegal_escape() {
    let err = lex_error(r#""ab\qc""#);
    assert_eq!(err.error, LexerErrorType::IllegalEscape(r"ab\q".to_string()));
    assert_eq!(err.position, Position { line: 1, column: 4 });

    let err = lex_error(r#""\r""#);
    assert_eq!(err.error, LexerErrorType::IllegalEscape(r"\r".to_string()));
}

#[test]
fn test_escaped_line_break_stops_at_backslash() {
    let err = lex_error("\"a\\\nb\"");
    assert_eq!(err.error, LexerErrorType::IllegalEscape(r"a\".to_string()));
    assert_eq!(err.position, Position { line: 1, column: 3 });
    assert!(!err.to_string().contains('\n'));

    let err = lex_error("\"\\\r\n\"");
    assert_eq!(err.error, LexerErrorType::IllegalEscape(r"\".to_string()));
}

#[test]
fn test_error_tokens() {
    for c in ['@', '#', '$', '~', '?', '`', '[', ']', '&', '|'] {
        let input = format!("a {c} b");
        let err = lex_error(&input);
        assert_eq!(err.error, LexerErrorType::ErrorToken(c));
        assert_eq!(err.position, Position { line: 1, column: 3 });
    }
}

#[test]
fn test_comments() {
    match_expected(
        "a // line\n/* block\n * more */ b /* /* */ c",
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::Identifier, "b"),
            (TokenKind::Identifier, "c"),
        ],
    );
    match_expected("// only a comment", vec![]);
    match_expected("/**/ \t\n/***/", vec![]);
}

#[test]
fn test_unterminated_block_comment() {
    let err = lex_error("a /* never closed");
    assert_eq!(err.error, LexerErrorType::UnterminatedComment);
    assert_eq!(err.position, Position { line: 1, column: 3 });

    assert_eq!(lex_error("/*/").error, LexerErrorType::UnterminatedComment);
}

#[test]
fn test_iterator_stops_after_first_error() {
    let results: Vec<_> = Lexer::new("a @ b").collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn test_next_token_repeats_eof() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
}
