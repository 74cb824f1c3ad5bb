#[cfg(test)]
mod parser_tests {
    use jott::error::JottError;
    use jott::expr::{BoolTerm, Expr, IntTerm};
    use jott::parser::parse;
    use jott::scanner::tokenize;
    use jott::stmt::{BodyStmt, Stmt};

    fn assert_parses(source: &str) {
        let tokens = tokenize(source.as_bytes(), "test.jott").expect("source should tokenize");

        if let Err(e) = parse(&tokens, "test.jott") {
            panic!("expected {:?} to parse, got: {}", source, e);
        }
    }

    fn parse_err(source: &str) -> (String, usize) {
        let tokens = tokenize(source.as_bytes(), "test.jott").expect("source should tokenize");

        match parse(&tokens, "test.jott") {
            Ok(_) => panic!("expected parse failure for {:?}", source),
            Err(JottError::Parse { message, line, .. }) => (message, line),
            Err(other) => panic!("expected a Parse error, got {:?}", other),
        }
    }

    /// Parse `x=<expr_src>;` inside a wrapper function and report which
    /// expression kind the prober settled on.
    fn assigned_kind(expr_src: &str) -> &'static str {
        let source = format!("main[]:Void{{x={};}}", expr_src);
        let tokens = tokenize(source.as_bytes(), "test.jott").unwrap();
        let program = parse(&tokens, "test.jott").unwrap();

        match &program.functions[0].body.statements[0] {
            BodyStmt::Simple(Stmt::Assign { value, .. }) => match value {
                Expr::Int(_) => "int",
                Expr::Dbl(_) => "double",
                Expr::Bool(_) => "boolean",
                Expr::Str(_) => "string",
            },

            other => panic!("expected an assignment, got {:?}", other),
        }
    }

    // ───────────────────────── structure ─────────────────────────

    #[test]
    fn test_parser_01_empty_function() {
        let tokens = tokenize(b"a[]:Void{}", "test.jott").unwrap();
        let program = parse(&tokens, "test.jott").unwrap();

        assert_eq!(program.functions.len(), 1);

        let func = &program.functions[0];

        assert_eq!(func.name.lexeme, "a");
        assert!(func.params.is_empty());
        assert_eq!(func.return_type.lexeme, "Void");
        assert!(func.body.statements.is_empty());
        assert!(func.body.ret.is_none());
    }

    #[test]
    fn test_parser_02_function_with_param_and_return() {
        let tokens = tokenize(b"a[x:Integer]:Integer{return x+1;}", "test.jott").unwrap();
        let program = parse(&tokens, "test.jott").unwrap();

        let func = &program.functions[0];

        assert_eq!(func.params.len(), 1);
        assert_eq!(func.params[0].name.lexeme, "x");
        assert_eq!(func.params[0].ty.lexeme, "Integer");
        assert_eq!(func.return_type.lexeme, "Integer");
        assert!(func.body.statements.is_empty());

        let ret = func.body.ret.as_ref().expect("body should end in a return");

        match &ret.value {
            Expr::Int(node) => {
                assert!(matches!(&node.first, IntTerm::Id(t) if t.lexeme == "x"));

                let rest = node.rest.as_ref().expect("x+1 has a continuation");

                assert_eq!(rest.op.lexeme, "+");
                assert!(matches!(
                    &rest.term,
                    IntTerm::Literal { sign: None, value } if value.lexeme == "1"
                ));
                assert!(rest.chain.is_none());
            }

            other => panic!("expected an integer expression, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_03_multiple_functions_and_params() {
        let tokens = tokenize(
            b"a[x:Integer,y:Double]:Void{}b[]:String{return \"s\";}",
            "test.jott",
        )
        .unwrap();
        let program = parse(&tokens, "test.jott").unwrap();

        assert_eq!(program.functions.len(), 2);
        assert_eq!(program.functions[0].params.len(), 2);
        assert_eq!(program.functions[0].params[1].name.lexeme, "y");
        assert_eq!(program.functions[0].params[1].ty.lexeme, "Double");
        assert_eq!(program.functions[1].return_type.lexeme, "String");
    }

    #[test]
    fn test_parser_04_if_elseif_else() {
        let tokens = tokenize(
            b"a[]:Void{if[True]{}elseif[False]{}elseif[x>1]{}else{Integer y;}}",
            "test.jott",
        )
        .unwrap();
        let program = parse(&tokens, "test.jott").unwrap();

        let body_stmt = &program.functions[0].body.statements[0];

        match body_stmt {
            BodyStmt::If(node) => {
                assert!(matches!(
                    &node.cond.first,
                    BoolTerm::Literal(t) if t.lexeme == "True"
                ));
                assert!(node.cond.rest.is_none());
                assert!(node.body.statements.is_empty());
                assert_eq!(node.elseifs.len(), 2);

                let else_body = node.else_body.as_ref().expect("else arm is present");

                assert_eq!(else_body.statements.len(), 1);
            }

            other => panic!("expected an if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_05_statement_forms() {
        assert_parses("a[]:Void{Integer x;}");
        assert_parses("a[]:Void{Integer x=3;}");
        assert_parses("a[]:Void{x=3;}");
        assert_parses("a[]:Void{f[];}");
        assert_parses("a[]:Void{f[1,2.0,\"s\",True];}");
        assert_parses("a[]:Void{while[True]{x=x-1;}}");
        assert_parses("a[]:Void{f[g[1],2];}");
    }

    #[test]
    fn test_parser_06_call_statement_requires_semicolon() {
        let (message, _) = parse_err("a[]:Void{f[]}");

        assert_eq!(message, "expected ; got }");
    }

    // ─────────────────────── disambiguation ───────────────────────

    #[test]
    fn test_parser_07_probed_expression_kinds() {
        assert_eq!(assigned_kind("3"), "int");
        assert_eq!(assigned_kind("-3"), "int");
        assert_eq!(assigned_kind("3.5"), "double");
        assert_eq!(assigned_kind("+3."), "double");
        assert_eq!(assigned_kind(".5"), "double");
        assert_eq!(assigned_kind("\"hi\""), "string");
        assert_eq!(assigned_kind("True"), "boolean");
        assert_eq!(assigned_kind("False"), "boolean");
    }

    #[test]
    fn test_parser_08_naked_boolean_forms() {
        // a lone id, call, or True/False ends a boolean expression in one term
        assert_eq!(assigned_kind("y"), "boolean");
        assert_eq!(assigned_kind("f[]"), "boolean");
        assert_eq!(assigned_kind("f[1,2]"), "boolean");
    }

    #[test]
    fn test_parser_09_arithmetic_binds_ids_and_calls() {
        assert_eq!(assigned_kind("y+1"), "int");
        assert_eq!(assigned_kind("f[]+1"), "int");
        assert_eq!(assigned_kind("y+1.0"), "double");
        assert_eq!(assigned_kind("1+2+3"), "int");
        assert_eq!(assigned_kind("1.0+2.0+3.0+4.0"), "double");
    }

    #[test]
    fn test_parser_10_relational_operands_resolve_independently() {
        assert_eq!(assigned_kind("y<3"), "boolean");
        assert_eq!(assigned_kind("1<2.0"), "boolean");
        assert_eq!(assigned_kind("\"a\"==\"b\""), "boolean");
        assert_eq!(assigned_kind("f[]>=g[]"), "boolean");
    }

    #[test]
    fn test_parser_11_chained_relational_expression() {
        let tokens = tokenize(b"main[]:Void{x=a>b==c<d;}", "test.jott").unwrap();
        let program = parse(&tokens, "test.jott").unwrap();

        let value = match &program.functions[0].body.statements[0] {
            BodyStmt::Simple(Stmt::Assign { value, .. }) => value,
            other => panic!("expected an assignment, got {:?}", other),
        };

        // a>b==c<d nests as (a > b) == (c < d ...): one rest with a chain
        // holding the second two-operand level
        match value {
            Expr::Bool(node) => {
                let rest = node.rest.as_ref().expect("a>b has a continuation");

                assert_eq!(rest.op.lexeme, ">");

                let (chain_op, chain) = rest.chain.as_ref().expect("==c<d chains");

                assert_eq!(chain_op.lexeme, "==");

                let inner = chain.rest.as_ref().expect("c<d is a pair");

                assert_eq!(inner.op.lexeme, "<");
                assert!(inner.chain.is_none());
            }

            other => panic!("expected a boolean expression, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_12_chained_relations_in_return_position() {
        assert_parses("main[]:Boolean{return a>b==c<d;}");
    }

    // ───────────────────────── diagnostics ─────────────────────────

    #[test]
    fn test_parser_13_double_expression_rejects_int_literal() {
        let (message, _) = parse_err("a[]:Void{x=3.0+4;}");

        assert_eq!(message, "Expected double got int");
    }

    #[test]
    fn test_parser_14_int_expression_rejects_double_literal() {
        let (message, _) = parse_err("a[]:Void{x=3+4.0;}");

        assert_eq!(message, "Expected int got double");
    }

    #[test]
    fn test_parser_15_unaccompanied_sign() {
        let (message, _) = parse_err("a[]:Void{x=+;}");

        assert_eq!(message, "unaccompanied -/+ missing term or expr");
    }

    #[test]
    fn test_parser_15b_trailing_junk_after_single_terms() {
        // the boolean trial got furthest, so its diagnostic is the one reported
        assert_eq!(
            parse_err("a[]:Void{x=True+1;}").0,
            "Unexpected token - + after boolean"
        );

        // a committed integer expression stops before a rel op; the
        // expression-level terminator check then rejects it
        assert_eq!(parse_err("a[]:Void{x=3>;}").0, "expected ;|,|] got >");
    }

    #[test]
    fn test_parser_16_orphan_else_and_elseif() {
        assert_eq!(parse_err("a[]:Void{elseif[True]{}}").0, "elseif without an if");
        assert_eq!(parse_err("a[]:Void{else{}}").0, "else without an if");
    }

    #[test]
    fn test_parser_17_return_requires_an_expression() {
        assert_eq!(parse_err("a[]:Void{return;}").0, "Expected return expr got ;");
    }

    #[test]
    fn test_parser_18_reserved_words_are_not_identifiers() {
        assert_eq!(parse_err("Integer[]:Void{}").0, "expected id got type");
        assert_eq!(parse_err("a[True:Integer]:Void{}").0, "expected id got boolean");
        assert_eq!(parse_err("a[x:Void]:Void{}").0, "expected type got Void");
    }

    #[test]
    fn test_parser_19_params_need_separators() {
        assert_eq!(
            parse_err("a[x:Integer y:Double]:Void{}").0,
            "expected , or ] got id"
        );
    }

    #[test]
    fn test_parser_20_missing_condition() {
        assert_eq!(parse_err("a[]:Void{if[]{}}").0, "if stmt missing condition");
        assert_eq!(parse_err("a[]:Void{while[]{}}").0, "while stmt missing condition");
    }

    #[test]
    fn test_parser_21_error_line_is_the_offending_tokens_line() {
        let (message, line) = parse_err("a[]:Void{\nx=3.0+4;\n}");

        assert_eq!(message, "Expected double got int");
        assert_eq!(line, 2);
    }

    #[test]
    fn test_parser_22_empty_stream_is_rejected() {
        match parse(&[], "test.jott") {
            Err(JottError::Parse { message, .. }) => {
                assert_eq!(message, "program missing function def");
            }
            other => panic!("expected a Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_23_truncated_function_header() {
        assert_eq!(parse_err("a[]").0, "func def missing :");
        assert_eq!(parse_err("a[]:Void{").0, "func def missing }");
    }

    // ──────────────────────── whole-parse properties ───────────────

    #[test]
    fn test_parser_24_truncation_always_fails() {
        let source = "a[x:Integer]:Integer{Integer z;z=x+1;if[z>1]{return z;}else{}while[True]{z=z-1;}return x;}";
        let tokens = tokenize(source.as_bytes(), "test.jott").unwrap();

        // the full stream parses ...
        assert!(parse(&tokens, "test.jott").is_ok());

        // ... and every proper prefix fails, without panicking
        for cut in 0..tokens.len() {
            assert!(
                parse(&tokens[..cut], "test.jott").is_err(),
                "prefix of {} tokens unexpectedly parsed",
                cut
            );
        }
    }

    #[test]
    fn test_parser_25_parsing_is_deterministic() {
        let source = "a[]:Void{x=a>b==c<d;y=1+2+3;if[f[]<=2.5]{z=\"s\";}}";
        let tokens = tokenize(source.as_bytes(), "test.jott").unwrap();

        let first = parse(&tokens, "test.jott").unwrap();
        let second = parse(&tokens, "test.jott").unwrap();

        assert_eq!(first, second);
    }
}
