use monkey_lang::lexer::Lexer;
use monkey_lang::parser::Parser;

fn render(input: &str) -> String {
    let lexer = Lexer::new(input.to_string());
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(), "{:?}", parser.error_messages());
    program.to_string()
}

#[test]
fn operator_precedence_matches_the_grammar() {
    let cases = [
        ("-a * b;", "((-a) * b)"),
        ("!-a;", "(!(-a))"),
        ("a + b + c;", "((a + b) + c)"),
        ("a + b - c;", "((a + b) - c)"),
        ("a * b * c;", "((a * b) * c)"),
        ("a * b / c;", "((a * b) / c)"),
        ("a + b / c;", "(a + (b / c))"),
        ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f)"),
        ("5 > 4 == 3 < 4;", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4;", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5;",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("1 + (2 + 3) + 4;", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2;", "((5 + 5) * 2)"),
        ("2 / (5 + 5);", "(2 / (5 + 5))"),
        ("-(5 + 5);", "(-(5 + 5))"),
        ("!(verdadero == verdadero);", "(!(verdadero == verdadero))"),
        (
            "a + suma(b * c) + d;",
            "((a + suma((b * c))) + d)",
        ),
        (
            "suma(a, b, 1, 2 * 3, 4 + 5, suma(6, 7 * 8));",
            "suma(a, b, 1, (2 * 3), (4 + 5), suma(6, (7 * 8)))",
        ),
    ];

    for (input, expected) in cases {
        assert_eq!(render(input), expected, "input: {}", input);
    }
}
