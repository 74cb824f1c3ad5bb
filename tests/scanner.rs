#[cfg(test)]
mod scanner_tests {
    use jott::error::JottError;
    use jott::scanner::{tokenize, Scanner};
    use jott::token::TokenType;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let tokens = tokenize(source.as_bytes(), "test.jott").expect("source should tokenize");

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    fn lex_error(source: &str) -> JottError {
        tokenize(source.as_bytes(), "test.jott").expect_err("source should fail to tokenize")
    }

    #[test]
    fn test_scanner_01_punctuation() {
        assert_token_sequence(
            ",[]{};:",
            &[
                (TokenType::COMMA, ","),
                (TokenType::L_BRACKET, "["),
                (TokenType::R_BRACKET, "]"),
                (TokenType::L_BRACE, "{"),
                (TokenType::R_BRACE, "}"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::COLON, ":"),
            ],
        );
    }

    #[test]
    fn test_scanner_02_operators() {
        assert_token_sequence(
            "< <= > >= == != = + - * /",
            &[
                (TokenType::REL_OP, "<"),
                (TokenType::REL_OP, "<="),
                (TokenType::REL_OP, ">"),
                (TokenType::REL_OP, ">="),
                (TokenType::REL_OP, "=="),
                (TokenType::REL_OP, "!="),
                (TokenType::ASSIGN, "="),
                (TokenType::MATH_OP, "+"),
                (TokenType::MATH_OP, "-"),
                (TokenType::MATH_OP, "*"),
                (TokenType::MATH_OP, "/"),
            ],
        );
    }

    #[test]
    fn test_scanner_03_adjacent_operators_munch_greedily() {
        // <= and == must win over < and = when the next byte allows it
        assert_token_sequence(
            "a<=b==c",
            &[
                (TokenType::ID_OR_KEYWORD, "a"),
                (TokenType::REL_OP, "<="),
                (TokenType::ID_OR_KEYWORD, "b"),
                (TokenType::REL_OP, "=="),
                (TokenType::ID_OR_KEYWORD, "c"),
            ],
        );
    }

    #[test]
    fn test_scanner_04_numbers() {
        assert_token_sequence(
            "3 3.14 3. .5 007",
            &[
                (TokenType::NUMBER, "3"),
                (TokenType::NUMBER, "3.14"),
                (TokenType::NUMBER, "3."),
                (TokenType::NUMBER, ".5"),
                (TokenType::NUMBER, "007"),
            ],
        );
    }

    #[test]
    fn test_scanner_05_identifiers_and_keywords_share_a_category() {
        // keyword-vs-identifier is the parser's call, not the scanner's
        assert_token_sequence(
            "Integer if x9 returnable",
            &[
                (TokenType::ID_OR_KEYWORD, "Integer"),
                (TokenType::ID_OR_KEYWORD, "if"),
                (TokenType::ID_OR_KEYWORD, "x9"),
                (TokenType::ID_OR_KEYWORD, "returnable"),
            ],
        );
    }

    #[test]
    fn test_scanner_06_string_lexeme_keeps_quotes() {
        assert_token_sequence(
            "x = \"hi there 42\";",
            &[
                (TokenType::ID_OR_KEYWORD, "x"),
                (TokenType::ASSIGN, "="),
                (TokenType::STRING, "\"hi there 42\""),
                (TokenType::SEMICOLON, ";"),
            ],
        );
    }

    #[test]
    fn test_scanner_07_comments_run_to_end_of_line() {
        assert_token_sequence(
            "x # all of this, even [ { \" is skipped\ny",
            &[
                (TokenType::ID_OR_KEYWORD, "x"),
                (TokenType::ID_OR_KEYWORD, "y"),
            ],
        );
    }

    #[test]
    fn test_scanner_08_comment_at_eof_without_newline() {
        assert_token_sequence("x # trailing", &[(TokenType::ID_OR_KEYWORD, "x")]);
    }

    #[test]
    fn test_scanner_09_line_numbers_cross_comments_and_newlines() {
        let source = "a\nb # c\nd";
        let tokens = tokenize(source.as_bytes(), "test.jott").unwrap();

        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();

        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn test_scanner_10_bare_bang_is_invalid() {
        match lex_error("x != y ! z") {
            JottError::Lex {
                message, lexeme, ..
            } => {
                assert_eq!(message, "Invalid Token");
                assert_eq!(lexeme, "!");
            }
            other => panic!("expected a Lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_11_open_string() {
        match lex_error("Integer x = \"hi;") {
            JottError::Lex {
                message, lexeme, ..
            } => {
                assert_eq!(message, "Invalid token - open string");
                assert_eq!(lexeme, "\"hi");
            }
            other => panic!("expected a Lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_12_string_with_illegal_interior_byte_is_open() {
        // '!' cannot appear inside a string, so the literal never closes
        match lex_error("\"ab!cd\"") {
            JottError::Lex {
                message, lexeme, ..
            } => {
                assert_eq!(message, "Invalid token - open string");
                assert_eq!(lexeme, "\"ab");
            }
            other => panic!("expected a Lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_13_dot_needs_a_companion_digit() {
        match lex_error("x = .;") {
            JottError::Lex {
                message, lexeme, ..
            } => {
                assert_eq!(message, "Invalid token - missing companion digit");
                assert_eq!(lexeme, ".");
            }
            other => panic!("expected a Lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_14_character_outside_the_language() {
        match lex_error("x = $;") {
            JottError::Lex {
                message, lexeme, ..
            } => {
                assert_eq!(message, "Invalid token - token not in language");
                assert_eq!(lexeme, "$");
            }
            other => panic!("expected a Lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_15_error_lines_first_middle_last() {
        let cases = [("$\na\nb", 1), ("a\n$\nb", 2), ("a\nb\n$", 3)];

        for (source, expected_line) in cases {
            match lex_error(source) {
                JottError::Lex { line, .. } => assert_eq!(line, expected_line),
                other => panic!("expected a Lex error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_scanner_16_diagnostic_format() {
        let err = lex_error("!");

        assert_eq!(
            format!("{}", err),
            "Syntax Error:\nInvalid Token \"!\"\ntest.jott:1"
        );
    }

    #[test]
    fn test_scanner_17_fail_fast_yields_no_tokens() {
        // the parser must never see a partial stream
        assert!(tokenize("a b $ c".as_bytes(), "test.jott").is_err());
    }

    #[test]
    fn test_scanner_18_iterator_is_resumable_past_whitespace_runs() {
        let mut scanner = Scanner::new(b"  a  \t\r\n  b  ", "test.jott");

        let first = scanner.next().unwrap().unwrap();
        let second = scanner.next().unwrap().unwrap();

        assert_eq!(first.lexeme, "a");
        assert_eq!(first.line, 1);
        assert_eq!(second.lexeme, "b");
        assert_eq!(second.line, 2);
        assert!(scanner.next().is_none());
    }
}
