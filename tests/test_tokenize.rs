use tyc::lexer::LexerErrorType;
use tyc::{tokenize, tokens_to_string};

fn check(input: &str) -> String {
    tokens_to_string(input).unwrap()
}

fn error_kind(input: &str) -> LexerErrorType {
    tokens_to_string(input).unwrap_err().error
}

#[test]
fn test_keyword_and_literals() {
    assert_eq!(check("break"), "BREAK,break,EOF");
    assert_eq!(check("1 2 3"), "INT_LIT,1,INT_LIT,2,INT_LIT,3,EOF");
    assert_eq!(check("0x123"), "INT_LIT,0,ID,x123,EOF");
    assert_eq!(check("1..3"), "FLOAT_LIT,1.,FLOAT_LIT,.3,EOF");
    assert_eq!(check("\"\\n\""), "STRING_LIT,\\n,EOF");
}

#[test]
fn test_empty_and_trivia_only_inputs() {
    for input in ["", "   ", "\n\t\r\n", "// comment", "/* a */ /* b */", "/* x */ // y\n"] {
        assert_eq!(check(input), "EOF", "for {input:?}");
    }
}

#[test]
fn test_leading_zero_digit_runs() {
    assert_eq!(check("00"), "INT_LIT,0,INT_LIT,0,EOF");
    assert_eq!(check("007"), "INT_LIT,0,INT_LIT,0,INT_LIT,7,EOF");
    assert_eq!(check("100"), "INT_LIT,100,EOF");
}

#[test]
fn test_exponents() {
    assert_eq!(check("1e"), "INT_LIT,1,ID,e,EOF");
    assert_eq!(check("1e+ 2"), "INT_LIT,1,ID,e,ADD,+,INT_LIT,2,EOF");
    assert_eq!(check("1e5 1E-5"), "FLOAT_LIT,1e5,FLOAT_LIT,1E-5,EOF");
}

#[test]
fn test_statement_stream() {
    assert_eq!(
        check("auto x = a.b + f(1.5, \"s\");"),
        "AUTO,auto,ID,x,ASSIGN,=,ID,a,DOT,.,ID,b,ADD,+,ID,f,LPAREN,(,FLOAT_LIT,1.5,\
         COMMA,,,STRING_LIT,s,RPAREN,),SEMI,;,EOF"
    );
    assert_eq!(
        check("if (a <= b && !c || d != e) x++; else --y;"),
        "IF,if,LPAREN,(,ID,a,LE,<=,ID,b,AND,&&,NOT,!,ID,c,OR,||,ID,d,NOTEQUAL,!=,ID,e,\
         RPAREN,),ID,x,INC,++,SEMI,;,ELSE,else,DEC,--,ID,y,SEMI,;,EOF"
    );
    assert_eq!(
        check("case 1: default: {}"),
        "CASE,case,INT_LIT,1,COLON,:,DEFAULT,default,COLON,:,LBRACE,{,RBRACE,},EOF"
    );
}

#[test]
fn test_lexical_errors() {
    assert_eq!(
        error_kind("\"abc"),
        LexerErrorType::UncloseString(String::from("abc"))
    );
    assert_eq!(
        error_kind("\"a\\kb\""),
        LexerErrorType::IllegalEscape(String::from("a\\k"))
    );
    assert_eq!(error_kind("@"), LexerErrorType::ErrorToken('@'));
    assert_eq!(error_kind("x /* open"), LexerErrorType::UnterminatedComment);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        tokens_to_string("\"abc").unwrap_err().error.to_string(),
        "Unclosed String: abc"
    );
    assert_eq!(
        tokens_to_string("\"a\\x\"").unwrap_err().error.to_string(),
        "Illegal Escape In String: a\\x"
    );
    assert_eq!(
        tokens_to_string("$").unwrap_err().error.to_string(),
        "Error Token $"
    );
}

#[test]
fn test_tokens_carry_positions() {
    let tokens = tokenize("int\n  x;").unwrap();
    let positions: Vec<_> = tokens
        .iter()
        .map(|t| (t.position.line, t.position.column))
        .collect();
    assert_eq!(positions, vec![(1, 1), (2, 3), (2, 4), (2, 5)]);
}

#[test]
fn test_tokenize_is_deterministic() {
    let input = "struct A { int x; }; void f() { A a = {1}; }";
    assert_eq!(check(input), check(input));
}
