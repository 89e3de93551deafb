//! Pratt parser turning a token stream into the AST defined in `crate::ast`.
//!
//! Maintains a two-token lookahead (`curr_token`, `peek_token`) and a table of
//! prefix/infix parse functions keyed by `TokenType`. Parsing does not abort on
//! the first error: a failing statement is skipped and the parser keeps going,
//! so a single REPL line or script can report every problem it has at once.

pub mod error;
mod precedence;

use crate::ast::{
    BlockStatement, BooleanLiteral, CallExpression, Expression, ExpressionStatement,
    FunctionLiteral, Identifier, IfExpression, InfixExpression, IntegerLiteral, LetStatement,
    PrefixExpression, Program, ReturnStatement, Statement, StringLiteral,
};
use crate::lexer::{
    Lexer,
    token::{Token, TokenType},
};
use error::ParserError;
use precedence::Precedence;
use std::collections::HashMap;

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

/// Converts a token stream into an Abstract Syntax Tree.
pub struct Parser {
    l: Lexer,
    curr_token: Token,
    peek_token: Token,
    errors: Vec<ParserError>,
    prefix_parse_fns: HashMap<TokenType, PrefixParseFn>,
    infix_parse_fns: HashMap<TokenType, InfixParseFn>,
}

impl Parser {
    pub fn new(l: Lexer) -> Self {
        let mut p = Parser {
            l,
            curr_token: Token::new(TokenType::EOF, "".to_string(), 0, 0),
            peek_token: Token::new(TokenType::EOF, "".to_string(), 0, 0),
            errors: Vec::new(),
            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
        };

        p.register_prefix_parse_fn(TokenType::IDENT, Parser::parse_identifier);
        p.register_prefix_parse_fn(TokenType::INT, Parser::parse_integer_literal);
        p.register_prefix_parse_fn(TokenType::STRING, Parser::parse_string_literal);
        p.register_prefix_parse_fn(TokenType::NEGATION, Parser::parse_prefix_expression);
        p.register_prefix_parse_fn(TokenType::MINUS, Parser::parse_prefix_expression);
        p.register_prefix_parse_fn(TokenType::TRUE, Parser::parse_boolean_literal);
        p.register_prefix_parse_fn(TokenType::FALSE, Parser::parse_boolean_literal);
        p.register_prefix_parse_fn(TokenType::LPAREN, Parser::parse_grouped_expression);
        p.register_prefix_parse_fn(TokenType::IF, Parser::parse_if_expression);
        p.register_prefix_parse_fn(TokenType::FUNCTION, Parser::parse_function_literal);

        p.register_infix_parse_fn(TokenType::PLUS, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::MINUS, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::DIVISION, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::MULTIPLICATION, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::EQ, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::NOT_EQ, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::LT, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::GT, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::LPAREN, Parser::parse_call_expression);

        p.next_token();
        p.next_token();
        p
    }

    fn next_token(&mut self) {
        self.curr_token = self.peek_token.clone();
        self.peek_token = self.l.next_token();
    }

    fn is_curr_token(&self, token_type: TokenType) -> bool {
        self.curr_token.token_type == token_type
    }

    fn is_peek_token(&self, token_type: TokenType) -> bool {
        self.peek_token.token_type == token_type
    }

    /// If the peek token matches, consumes it and advances. Otherwise records
    /// an error and leaves the token stream where it was.
    fn expect_peek(&mut self, token_type: TokenType) -> bool {
        if self.is_peek_token(token_type) {
            self.next_token();
            true
        } else {
            let error = ParserError::expected_token(token_type, &self.peek_token);
            log::error!("{}", error);
            self.errors.push(error);
            false
        }
    }

    /// Consumes a trailing semicolon if one is present. Semicolons are never
    /// required to terminate a statement.
    fn skip_optional_semicolon(&mut self) {
        if self.is_peek_token(TokenType::SEMICOLON) {
            self.next_token();
        }
    }

    fn no_prefix_parse_function_error(&mut self) {
        let error = ParserError::no_prefix_fn(&self.curr_token);
        log::error!("{}", error);
        self.errors.push(error);
    }

    fn register_prefix_parse_fn(&mut self, token_type: TokenType, parse_fn: PrefixParseFn) {
        self.prefix_parse_fns.insert(token_type, parse_fn);
    }

    fn register_infix_parse_fn(&mut self, token_type: TokenType, parse_fn: InfixParseFn) {
        self.infix_parse_fns.insert(token_type, parse_fn);
    }

    /// Accumulated parser errors, in the order they were encountered.
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    /// Renders `errors()` as strings, for callers that only want text.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn parse_program(&mut self) -> Program {
        log::debug!("empezando a parsear el programa");
        let mut program = Program {
            statements: Vec::new(),
        };
        while !self.is_curr_token(TokenType::EOF) {
            match self.parse_statement() {
                Some(stmt) => {
                    program.statements.push(stmt);
                    self.next_token();
                }
                None => self.synchronize(),
            }
        }
        log::debug!(
            "programa parseado, {} declaraciones",
            program.statements.len()
        );
        program
    }

    /// Discards tokens up to and including the next `;` (or `EOF`) so a
    /// statement that failed to parse doesn't leave stray tokens behind to be
    /// misread as the start of the next one.
    fn synchronize(&mut self) {
        while !self.is_curr_token(TokenType::SEMICOLON) && !self.is_curr_token(TokenType::EOF) {
            self.next_token();
        }
        if self.is_curr_token(TokenType::SEMICOLON) {
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.curr_token.token_type {
            TokenType::LET => self.parse_let_statement().map(Statement::Let),
            TokenType::RETURN => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    /// `variable <identificador> = <expresion>;` — trailing `;` is optional.
    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.curr_token.clone();

        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }
        let name = Identifier {
            token: self.curr_token.clone(),
            value: self.curr_token.literal.clone(),
        };

        if !self.expect_peek(TokenType::ASSIGN) {
            return None;
        }
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST as i32)?;
        self.skip_optional_semicolon();

        Some(LetStatement {
            token,
            name,
            value: Some(value),
        })
    }

    /// `regresa <expresion>;` — trailing `;` is optional.
    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.curr_token.clone();

        self.next_token();
        let return_value = self.parse_expression(Precedence::LOWEST as i32)?;
        self.skip_optional_semicolon();

        Some(ReturnStatement {
            token,
            return_value: Some(return_value),
        })
    }

    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.curr_token.clone();
        let expression = self.parse_expression(Precedence::LOWEST as i32);
        self.skip_optional_semicolon();
        Some(ExpressionStatement { token, expression })
    }

    fn parse_expression(&mut self, precedence: i32) -> Option<Expression> {
        let token_type = self.curr_token.token_type;
        let prefix = self.prefix_parse_fns.get(&token_type).copied();
        let mut left = match prefix {
            Some(prefix_parse_fn) => prefix_parse_fn(self)?,
            None => {
                self.no_prefix_parse_function_error();
                return None;
            }
        };

        while !self.is_peek_token(TokenType::SEMICOLON) && precedence < self.peek_precedence() {
            let peek_token_type = self.peek_token.token_type;
            let Some(infix_parse_fn) = self.infix_parse_fns.get(&peek_token_type).copied() else {
                return Some(left);
            };
            self.next_token();
            left = infix_parse_fn(self, left)?;
        }

        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(Identifier {
            token: self.curr_token.clone(),
            value: self.curr_token.literal.clone(),
        }))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(IntegerLiteral { token, value })),
            Err(_) => {
                let error = ParserError::invalid_integer(&token);
                log::error!("{}", error);
                self.errors.push(error);
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let value = token.literal.clone();
        Some(Expression::StringLiteral(StringLiteral { token, value }))
    }

    fn parse_boolean_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let value = self.is_curr_token(TokenType::TRUE);
        Some(Expression::BooleanLiteral(BooleanLiteral { token, value }))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let operator = self.curr_token.literal.clone();

        self.next_token();
        let right = self.parse_expression(Precedence::PREFIX as i32)?;

        Some(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn peek_precedence(&self) -> i32 {
        Precedence::from_token_type(&self.peek_token.token_type)
    }

    fn curr_precedence(&self) -> i32 {
        Precedence::from_token_type(&self.curr_token.token_type)
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.curr_token.clone();
        let operator = self.curr_token.literal.clone();
        let precedence = self.curr_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::LOWEST as i32)?;
        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();

        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        self.next_token();
        let condition = self.parse_expression(Precedence::LOWEST as i32)?;

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }
        let consequence = self.parse_block_statement()?;

        let alternative = if self.is_peek_token(TokenType::ELSE) {
            self.next_token();
            if !self.expect_peek(TokenType::LBRACE) {
                return None;
            }
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// `{ <statements> }` — expects `curr_token` to already be `{`.
    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        let token = self.curr_token.clone();
        let mut statements = Vec::new();

        while !self.is_peek_token(TokenType::RBRACE) && !self.is_peek_token(TokenType::EOF) {
            self.next_token();
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
        }

        if !self.expect_peek(TokenType::RBRACE) {
            return None;
        }

        Some(BlockStatement { token, statements })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();

        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }
        let body = self.parse_block_statement()?;

        Some(Expression::Function(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.is_peek_token(TokenType::RPAREN) {
            self.next_token();
            return Some(parameters);
        }

        self.next_token();
        parameters.push(self.parse_parameter_identifier()?);

        while self.is_peek_token(TokenType::COMMA) {
            self.next_token();
            self.next_token();
            parameters.push(self.parse_parameter_identifier()?);
        }

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }

        Some(parameters)
    }

    fn parse_parameter_identifier(&mut self) -> Option<Identifier> {
        if !self.is_curr_token(TokenType::IDENT) {
            let error = ParserError::expected_param_ident(&self.curr_token);
            log::error!("{}", error);
            self.errors.push(error);
            return None;
        }
        Some(Identifier {
            token: self.curr_token.clone(),
            value: self.curr_token.literal.clone(),
        })
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.curr_token.clone();
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();

        if self.is_peek_token(TokenType::RPAREN) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::LOWEST as i32)?);

        while self.is_peek_token(TokenType::COMMA) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::LOWEST as i32)?);
        }

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }

        Some(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(input: &str) -> (Program, Parser) {
        let lexer = Lexer::new(input.to_string());
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        (program, parser)
    }

    fn assert_no_errors(parser: &Parser) {
        assert!(
            parser.errors().is_empty(),
            "parser errors: {:?}",
            parser.error_messages()
        );
    }

    #[test]
    fn let_statements_with_semicolons() {
        let (program, parser) = parse("variable x = 5; variable y = verdadero;");
        assert_no_errors(&parser);
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.statements[0].to_string(), "variable x = 5;");
        assert_eq!(program.statements[1].to_string(), "variable y = verdadero;");
    }

    #[test]
    fn semicolons_are_optional() {
        let (program, parser) = parse("variable x = 5\nregresa x");
        assert_no_errors(&parser);
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn operator_precedence_rendering() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b * c", "(a + (b * c))"),
            ("a + (b + c) + d", "((a + (b + c)) + d)"),
            ("!-a", "(!(-a))"),
            ("a * b / c", "((a * b) / c)"),
            ("3 > 5 == falso", "((3 > 5) == falso)"),
        ];
        for (input, expected) in cases {
            let (program, parser) = parse(input);
            assert_no_errors(&parser);
            assert_eq!(program.to_string(), expected, "input: {}", input);
        }
    }

    #[test]
    fn if_else_expression() {
        let (program, parser) = parse("si (x < y) { x } si_no { y }");
        assert_no_errors(&parser);
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.to_string(), "si (x < y) x si_no y");
    }

    #[test]
    fn function_literal_parameters() {
        let (program, parser) = parse("procedimiento(x, y) { x + y; }");
        assert_no_errors(&parser);
        assert_eq!(program.to_string(), "procedimiento(x, y) (x + y)");
    }

    #[test]
    fn call_expression_arguments() {
        let (program, parser) = parse("suma(1, 2 * 3, 4 + 5)");
        assert_no_errors(&parser);
        assert_eq!(program.to_string(), "suma(1, (2 * 3), (4 + 5))");
    }

    #[test]
    fn string_literal_expression() {
        let (program, parser) = parse("\"hola mundo\"");
        assert_no_errors(&parser);
        assert_eq!(program.to_string(), "hola mundo");
    }

    #[test]
    fn missing_expected_token_reports_spanish_error() {
        let (_, parser) = parse("variable x 5;");
        assert_eq!(parser.errors().len(), 1);
        assert!(parser.error_messages()[0].contains("Se esperaba que el siguiente token fuera"));
    }

    #[test]
    fn no_prefix_parse_function_reports_spanish_error() {
        let (_, parser) = parse("variable x = ;");
        assert!(!parser.errors().is_empty());
        assert!(
            parser.error_messages()[0].contains("No se encontro ninguna funcion para parsear")
        );
    }

    #[test]
    fn parser_continues_after_error() {
        let (program, parser) = parse("variable = 5; variable y = 10;");
        assert_eq!(parser.errors().len(), 1);
        assert_eq!(program.statements.len(), 1);
    }
}
