use monkey_lang::ast::Statement;
use monkey_lang::lexer::Lexer;
use monkey_lang::parser::Parser;

#[test]
fn parses_multiple_return_statements() {
    let input = "regresa 5;\nregresa 10;\nregresa 993322;\n";
    let lexer = Lexer::new(input.to_string());
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    assert!(parser.errors().is_empty(), "{:?}", parser.error_messages());
    assert_eq!(program.statements.len(), 3);
    for stmt in &program.statements {
        assert!(matches!(stmt, Statement::Return(_)), "expected a return statement, got {:?}", stmt);
    }
}

#[test]
fn return_statement_renders_with_trailing_semicolon() {
    let lexer = Lexer::new("regresa 5".to_string());
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "regresa 5;");
}
