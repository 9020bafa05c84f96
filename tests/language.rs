use std::io::{self, Cursor, Write};

use orthoc::{
    config::Config,
    error::{EvalError, RuntimeError},
    interpreter::{
        core::{CancelToken, Interpreter, Io},
        evaluator::{evaluate, evaluate_default},
        program::HEADER_REMINDER,
    },
    report::{Diagnostics, Reporter, TerminalReporter, error_tag},
    run,
};

fn run_with_input(src: &str, input: &str) -> (String, Vec<RuntimeError>) {
    let mut output = Vec::<u8>::new();
    let mut input = Cursor::new(input.as_bytes());
    let mut diagnostics = Diagnostics::default();

    if let Err(e) = run(src, &Config::default(), &mut output, &mut input, &mut diagnostics) {
        panic!("Script hit a fatal error: {e}");
    }

    (String::from_utf8(output).expect("output is not UTF-8"), diagnostics.errors().to_vec())
}

fn run_program(src: &str) -> (String, Vec<RuntimeError>) {
    run_with_input(src, "")
}

fn assert_output(src: &str, expected: &str) {
    let (output, errors) = run_program(src);
    assert!(errors.is_empty(), "Script reported errors: {errors:?}");
    assert_eq!(output, expected);
}

fn single_error(src: &str) -> RuntimeError {
    let (_, errors) = run_program(src);
    assert_eq!(errors.len(), 1, "Expected exactly one error, got {errors:?}");
    errors[0].clone()
}

#[test]
fn arithmetic_respects_precedence() {
    assert_eq!(evaluate_default("2 + 3 * 4"), Ok(14.0));
    assert_eq!(evaluate_default("( 2 + 3 ) * 4"), Ok(20.0));
    assert_eq!(evaluate_default("2 * 3 + 4"), Ok(10.0));
    assert_eq!(evaluate_default("( ( 1 + 2 ) * ( 3 + 4 ) )"), Ok(21.0));
    assert_eq!(evaluate_default("-1.5 * 2"), Ok(-3.0));
    assert_eq!(evaluate_default("1e2 / .5"), Ok(200.0));
}

#[test]
fn arithmetic_is_left_associative() {
    assert_eq!(evaluate_default("10 - 4 - 3"), Ok(3.0));
    assert_eq!(evaluate_default("64 / 4 / 2"), Ok(8.0));
    assert_eq!(evaluate_default("10 - 2 + 3"), Ok(11.0));
}

#[test]
fn division_by_zero_fails_in_any_position() {
    for expression in ["1 / 0", "( 4 + 2 ) / ( 3 - 3 )", "1 + 2 / 0 * 5", "8 / 0.0 - 1"] {
        assert_eq!(evaluate_default(expression),
                   Err(EvalError::DivisionByZero),
                   "{expression}");
    }
}

#[test]
fn malformed_expressions_are_rejected() {
    for expression in ["", "2 +", "+ 2", "2 3", "2x + 1", "(2 + 3)", "( 1 + 2", "two + 2",
                       "1e308 * 10 - 1e308 * 10"]
    {
        assert!(matches!(evaluate_default(expression),
                         Err(EvalError::MalformedExpression { .. })),
                "{expression:?} should be malformed");
    }
}

#[test]
fn stray_closing_paren_is_drained() {
    assert_eq!(evaluate_default("2 + 3 )"), Ok(5.0));
    assert_eq!(evaluate_default("2 * 3 ) + 1"), Ok(7.0));
}

#[test]
fn expression_limit_is_enforced() {
    assert_eq!(evaluate("1 + 2 + 3", 2), Err(EvalError::ExpressionTooComplex { limit: 2 }));
    assert_eq!(evaluate("1 + 2 + 3", 3), Ok(6.0));

    let long = vec!["1"; 101].join(" + ");
    assert_eq!(evaluate_default(&long), Ok(101.0));

    let nested = format!("{}1{}", "( ".repeat(100), " )".repeat(100));
    assert_eq!(evaluate_default(&nested), Err(EvalError::ExpressionTooComplex { limit: 100 }));
}

#[test]
fn hello_world() {
    assert_output("Prayer:\ninvoke greet() {\n    chant(\"Hello, world!\")\n}\ncall.upon greet\n",
                  "Hello, world!\n");
}

#[test]
fn suppressed_arithmetic_and_substitution() {
    let src = r#"Prayer:
incense x = "42";
invoke main() {
    theosis(10 + 5 > null)
    chant("x is", x)
}
call.upon main
"#;
    assert_output(src, "x is 42\n");
}

#[test]
fn arithmetic_output_uses_six_decimals() {
    let src = "Prayer:\ninvoke f() {\ntheosis(7 / 2)\ntheosis(2 * 3) > null\ntheosis(1 - 3)\n}\ncall.upon f\n";
    assert_output(src, "3.500000\n-2.000000\n");
}

#[test]
fn missing_header_prints_reminder() {
    let (output, errors) = run_program("invoke f() {\nchant(\"body\")\n}\ncall.upon f\n");
    assert!(errors.is_empty());
    assert_eq!(output, format!("{HEADER_REMINDER}\nbody\n"));
}

#[test]
fn placeholder_substitution() {
    let src = "Prayer:\nincense name = \"Basil\";\ninvoke f() {\nchant(\"Glory to %s!\", name)\n}\ncall.upon f\n";
    assert_output(src, "Glory to Basil!\n");
}

#[test]
fn repeated_declaration_updates_in_place() {
    let src = "Prayer:\nincense x = \"1\";\nincense x = \"2\";\nincense x = \"3\";\n";
    let mut output = Vec::<u8>::new();
    let mut input = io::empty();
    let mut diagnostics = Diagnostics::default();
    let mut interpreter = Interpreter::new(src,
                                           Config::default(),
                                           Io { output:   &mut output,
                                                input:    &mut input,
                                                reporter: &mut diagnostics, });

    interpreter.load().unwrap();
    assert_eq!(interpreter.variables().len(), 1);
    assert_eq!(interpreter.variables().get("x"), Some("3"));
}

#[test]
fn declarations_inside_bodies_run_when_called() {
    let src = r#"Prayer:
incense mood = "calm";
invoke change() {
    incense mood = "joyful";
}
invoke show() {
    chant("mood: %s", mood)
}
call.upon show
call.upon change
call.upon show
"#;
    assert_output(src, "mood: calm\nmood: joyful\n");
}

#[test]
fn undefined_function_is_reported_and_changes_nothing() {
    let src = "Prayer:\nincense x = \"1\";\ncall.upon nowhere\n";
    let mut output = Vec::<u8>::new();
    let mut input = io::empty();
    let mut diagnostics = Diagnostics::default();
    let mut interpreter = Interpreter::new(src,
                                           Config::default(),
                                           Io { output:   &mut output,
                                                input:    &mut input,
                                                reporter: &mut diagnostics, });

    interpreter.run().unwrap();
    assert_eq!(interpreter.variables().len(), 1);
    assert_eq!(interpreter.functions().len(), 0);
    assert_eq!(interpreter.cursor(), 3);
    drop(interpreter);

    assert_eq!(diagnostics.errors(),
               [RuntimeError::UndefinedFunction { name: "nowhere".to_string(),
                                                  line: 3, }]);
}

#[test]
fn cursor_is_restored_after_every_call() {
    let src = "invoke ok() {\nchant(\"a\")\n}\ninvoke broken() {\ntheosis(1 / 0)\nchant(\"b\", missing)\n}\ninvoke open() {\nchant(\"c\")\n";
    let mut output = Vec::<u8>::new();
    let mut input = io::empty();
    let mut diagnostics = Diagnostics::default();
    let mut interpreter = Interpreter::new(src,
                                           Config::default(),
                                           Io { output:   &mut output,
                                                input:    &mut input,
                                                reporter: &mut diagnostics, });
    interpreter.load().unwrap();

    for (position, name) in [(0, "ok"), (4, "broken"), (7, "open"), (9, "missing")] {
        interpreter.seek(position);
        interpreter.execute(name, 1).unwrap();
        assert_eq!(interpreter.cursor(), position, "after calling {name}");
    }
    drop(interpreter);

    assert_eq!(String::from_utf8(output).unwrap(), "a\nc\n");
    assert!(matches!(diagnostics.errors(),
                     [RuntimeError::MissingTerminator { line: 8, .. },
                      RuntimeError::DivisionByZero { line: 5 },
                      RuntimeError::UndefinedVariable { line: 6, .. },
                      RuntimeError::MissingTerminator { line: 8, .. },
                      RuntimeError::UndefinedFunction { line: 1, .. }]));
}

#[test]
fn errors_do_not_stop_execution() {
    let src = r#"Prayer:
invoke f() {
    chant(no quotes)
    chant("unterminated)
    chant("hi", ghost)
    incense y = "no semicolon"
    theosis(4 / 0)
    theosis(2 +)
    theosis(1 + 2
    theosis(1e308 * 10 - 1e308 * 10)
    chant("still here")
}
call.upon f
"#;
    let (output, errors) = run_program(src);
    assert_eq!(output, "still here\n");
    assert!(matches!(errors.as_slice(),
                     [RuntimeError::InvalidOutputSyntax { line: 3, .. },
                      RuntimeError::InvalidOutputSyntax { line: 4, .. },
                      RuntimeError::UndefinedVariable { line: 5, .. },
                      RuntimeError::InvalidDeclarationSyntax { line: 6, .. },
                      RuntimeError::DivisionByZero { line: 7 },
                      RuntimeError::MalformedExpression { line: 8, .. },
                      RuntimeError::MalformedExpression { line: 9, .. },
                      RuntimeError::MalformedExpression { line: 10, .. }]));
    assert_eq!(errors[6].to_string(),
               "Line 9: Malformed expression: Missing closing parenthesis in theosis");
}

#[test]
fn malformed_top_level_declarations_are_reported_by_the_scan() {
    for (src, details) in [("Prayer:\nincense x \"1\";\n", "Invalid variable declaration syntax"),
                           ("Prayer:\nincense x = 1;\n", "Invalid variable value format"),
                           ("Prayer:\nincense x = \"1;\n", "Unterminated string literal"),
                           ("Prayer:\nincense x = \"1\"\n", "Missing semicolon after variable declaration"),
                           ("Prayer:\nincense = \"1\";\n", "Missing variable name in declaration")]
    {
        assert_eq!(single_error(src),
                   RuntimeError::InvalidDeclarationSyntax { details: details.to_string(),
                                                            line:    2, });
    }
}

#[test]
fn repent_reads_one_line_per_call() {
    let src = r#"Prayer:
invoke ask() {
    repent("Name? ", name)
    chant("Peace be with you, %s.", name)
}
call.upon ask
call.upon ask
"#;
    let (output, errors) = run_with_input(src, "Anna\r\nSimeon\n");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(output, "Name? Peace be with you, Anna.\nName? Peace be with you, Simeon.\n");
}

#[test]
fn repent_at_end_of_input_leaves_variable_unset() {
    let src = "Prayer:\ninvoke ask() {\nrepent(\"? \", answer)\nchant(\"got\", answer)\n}\ncall.upon ask\n";
    let (output, errors) = run_program(src);
    assert_eq!(output, "? ");
    assert!(matches!(errors.as_slice(),
                     [RuntimeError::StreamReadFailure { line: 3, .. },
                      RuntimeError::UndefinedVariable { line: 4, .. }]));
}

#[test]
fn repent_requires_a_variable() {
    let src = "Prayer:\ninvoke ask() {\nrepent(\"? \")\n}\ncall.upon ask\n";
    assert!(matches!(single_error(src), RuntimeError::InvalidInputSyntax { line: 3, .. }));
}

#[test]
fn later_definition_wins() {
    let src = "Prayer:\ninvoke f() {\nchant(\"first\")\n}\ninvoke f() {\nchant(\"second\")\n}\ncall.upon f\n";
    assert_output(src, "second\n");
}

#[test]
fn calls_inside_bodies_are_not_top_level() {
    let src = "Prayer:\ninvoke a() {\ncall.upon b\nchant(\"a\")\n}\ninvoke b() {\nchant(\"b\")\n}\ncall.upon a\n";
    assert_output(src, "a\n");
}

#[test]
fn missing_terminator_runs_to_end_of_source() {
    let src = "Prayer:\ncall.upon f\ninvoke f() {\nchant(\"one\")\nchant(\"two\")\n";
    let (output, errors) = run_program(src);
    assert_eq!(output, "one\ntwo\n");

    let missing = RuntimeError::MissingTerminator { name: "f".to_string(),
                                                    line: 3, };
    assert_eq!(errors, [missing.clone(), missing]);
}

#[test]
fn unterminated_definition_does_not_hide_later_calls() {
    let src = "Prayer:\ninvoke f() {\nchant(\"a\")\ncall.upon f\n";
    let (output, errors) = run_program(src);
    assert_eq!(output, "a\n");

    let missing = RuntimeError::MissingTerminator { name: "f".to_string(),
                                                    line: 2, };
    assert_eq!(errors, [missing.clone(), missing]);
}

#[test]
fn unterminated_definition_is_reported_even_when_never_called() {
    let src = "Prayer:\ninvoke done() {\n}\ninvoke open() {\nchant(\"never\")\n";
    let (output, errors) = run_program(src);
    assert_eq!(output, "");
    assert_eq!(errors,
               [RuntimeError::MissingTerminator { name: "open".to_string(),
                                                  line: 4, }]);
}

/// Cancels the run once enough lines were written.
struct StopAfter {
    lines:  Vec<u8>,
    limit:  usize,
    cancel: CancelToken,
}

impl Write for StopAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lines.extend_from_slice(buf);
        if self.lines.iter().filter(|&&b| b == b'\n').count() >= self.limit {
            self.cancel.cancel();
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn repeat_call_runs_until_cancelled() {
    let src = r#"Prayer:
incense word = "Kyrie";
invoke pray() {
    chant("%s eleison", word)
    theosis(( 1 + 2 ) * 3)
}
unceasingly.pray: pray
chant("never reached")
"#;
    let cancel = CancelToken::new();
    let mut output = StopAfter { lines:  Vec::new(),
                                 limit:  10,
                                 cancel: cancel.clone(), };
    let mut input = io::empty();
    let mut diagnostics = Diagnostics::default();

    Interpreter::new(src,
                     Config::default(),
                     Io { output:   &mut output,
                          input:    &mut input,
                          reporter: &mut diagnostics, }).with_cancel_token(cancel)
                                                         .run()
                                                         .unwrap();

    let text = String::from_utf8(output.lines).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    for pair in lines.chunks(2) {
        assert_eq!(pair, ["Kyrie eleison", "9.000000"]);
    }
    assert!(diagnostics.is_empty());
}

#[test]
fn repeat_call_of_undefined_function_keeps_reporting() {
    struct Budget {
        seen:   usize,
        cancel: CancelToken,
    }

    impl orthoc::report::Reporter for Budget {
        fn report(&mut self, error: &RuntimeError) {
            assert!(matches!(error, RuntimeError::UndefinedFunction { line: 2, .. }));
            self.seen += 1;
            if self.seen == 5 {
                self.cancel.cancel();
            }
        }
    }

    let cancel = CancelToken::new();
    let mut reporter = Budget { seen:   0,
                                cancel: cancel.clone(), };
    let mut output = Vec::<u8>::new();
    let mut input = io::empty();

    Interpreter::new("Prayer:\nunceasingly.pray: ghost\n",
                     Config::default(),
                     Io { output:   &mut output,
                          input:    &mut input,
                          reporter: &mut reporter, }).with_cancel_token(cancel)
                                                      .run()
                                                      .unwrap();

    assert_eq!(reporter.seen, 5);
}

#[test]
fn expression_limit_comes_from_config() {
    let src = "Prayer:\ninvoke f() {\ntheosis(1 + 2 + 3)\n}\ncall.upon f\n";
    let mut output = Vec::<u8>::new();
    let mut diagnostics = Diagnostics::default();
    let config = Config { max_expr_elements: 2 };

    run(src, &config, &mut output, &mut io::empty(), &mut diagnostics).unwrap();

    assert!(output.is_empty());
    assert_eq!(diagnostics.errors(), [RuntimeError::ExpressionTooComplex { limit: 2, line: 3 }]);
}

/// A writer whose every write fails.
struct Broken;

impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("stream closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("stream closed"))
    }
}

#[test]
fn terminal_reporter_counts_diagnostics_it_failed_to_write() {
    let mut reporter = TerminalReporter::new(Broken, true);
    reporter.report(&RuntimeError::DivisionByZero { line: 1 });
    reporter.report(&RuntimeError::DivisionByZero { line: 2 });

    assert_eq!(reporter.count(), 2);
}

#[test]
fn colored_error_tag_uses_red_background() {
    assert_eq!(error_tag(true), "\x1b[41m\x1b[37m[ERROR]\x1b[0m");
    assert_eq!(error_tag(false), "[ERROR]");

    let mut reporter = TerminalReporter::new(Vec::<u8>::new(), true);
    reporter.report(&RuntimeError::DivisionByZero { line: 3 });
    assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(),
               "\x1b[41m\x1b[37m[ERROR]\x1b[0m Line 3: Division by zero\n");
}
