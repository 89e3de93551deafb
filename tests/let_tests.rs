use monkey_lang::ast::Statement;
use monkey_lang::lexer::Lexer;
use monkey_lang::parser::Parser;

fn parse_ok(input: &str) -> monkey_lang::ast::Program {
    let lexer = Lexer::new(input.to_string());
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "unexpected parser errors: {:?}",
        parser.error_messages()
    );
    program
}

#[test]
fn parses_multiple_let_statements() {
    let input = "variable x = 5;\nvariable y = 10;\nvariable foobar = 838383;\n";
    let program = parse_ok(input);

    assert_eq!(program.statements.len(), 3);
    let expected = [("x", "5"), ("y", "10"), ("foobar", "838383")];
    for (stmt, (name, value)) in program.statements.iter().zip(expected) {
        match stmt {
            Statement::Let(let_stmt) => {
                assert_eq!(let_stmt.name.value, name);
                assert_eq!(let_stmt.value.as_ref().unwrap().to_string(), value);
            }
            other => panic!("expected a let statement, got {:?}", other),
        }
    }
}

#[test]
fn let_statement_without_semicolon_still_parses() {
    let program = parse_ok("variable x = 5");
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn missing_assign_token_is_a_single_parser_error() {
    let lexer = Lexer::new("variable x 5;".to_string());
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    assert_eq!(parser.errors().len(), 1);
    assert!(program.statements.is_empty());
}
