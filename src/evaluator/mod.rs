//! Tree-walking evaluator.
//!
//! `evaluate` dispatches on the AST node kind and returns an `Object`
//! directly — no exceptions. `Object::Return` and `Object::Error` are
//! ordinary values that short-circuit evaluation of the enclosing statement
//! list; `eval_program` unwraps a `Return` at the top level, while
//! `eval_block_statement` lets it pass through unwrapped so that a `regresa`
//! inside a nested `si`/`si_no` block escapes every enclosing block up to
//! the function or program boundary.

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::object::environment::Environment;
use crate::object::{FunctionObject, Object};
use std::rc::Rc;

pub fn eval_program(program: &Program, env: &Environment) -> Object {
    let mut result = Object::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Object::Return(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_block_statement(block: &BlockStatement, env: &Environment) -> Object {
    let mut result = Object::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Object::Return(_) | Object::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Environment) -> Object {
    match statement {
        Statement::Let(stmt) => {
            let value = match &stmt.value {
                Some(expr) => eval_expression(expr, env),
                None => Object::Null,
            };
            if value.is_error() {
                return value;
            }
            env.set(stmt.name.value.clone(), value)
        }
        Statement::Return(stmt) => {
            let value = match &stmt.return_value {
                Some(expr) => eval_expression(expr, env),
                None => Object::Null,
            };
            if value.is_error() {
                return value;
            }
            Object::Return(Box::new(value))
        }
        Statement::Expression(stmt) => match &stmt.expression {
            Some(expr) => eval_expression(expr, env),
            None => Object::Null,
        },
        Statement::Block(block) => eval_block_statement(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Environment) -> Object {
    match expression {
        Expression::IntegerLiteral(lit) => Object::Integer(lit.value),
        Expression::BooleanLiteral(lit) => Object::Boolean(lit.value),
        Expression::StringLiteral(lit) => Object::Str(lit.value.clone()),
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Prefix(expr) => {
            let right = eval_expression(&expr.right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(&expr.operator, right)
        }
        Expression::Infix(expr) => {
            let left = eval_expression(&expr.left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(&expr.right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(&expr.operator, left, right)
        }
        Expression::If(expr) => eval_if_expression(expr, env),
        Expression::Function(lit) => {
            Object::Function(Rc::new(FunctionObject::from_literal(lit, env.clone())))
        }
        Expression::Call(expr) => {
            let function = eval_expression(&expr.function, env);
            if function.is_error() {
                return function;
            }
            let mut arguments = Vec::with_capacity(expr.arguments.len());
            for arg in &expr.arguments {
                let evaluated = eval_expression(arg, env);
                if evaluated.is_error() {
                    return evaluated;
                }
                arguments.push(evaluated);
            }
            apply_function(function, arguments)
        }
    }
}

fn eval_identifier(name: &str, env: &Environment) -> Object {
    match env.get(name) {
        Some(value) => value,
        None => Object::Error(format!("Identificador no encontrado: {}", name)),
    }
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(value) => Object::Integer(-value),
            other => Object::Error(format!("Operador desconocido: -{}", other.type_name())),
        },
        _ => Object::Error(format!("Operador desconocido: {}{}", operator, right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Object::Str(l), Object::Str(r)) => eval_string_infix(operator, l, r),
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            "==" => Object::Boolean(l == r),
            "!=" => Object::Boolean(l != r),
            _ => Object::Error(format!(
                "Operador desconocido: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
        },
        _ if left.type_name() != right.type_name() => Object::Error(format!(
            "Tipos incompatibles: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
        _ => Object::Error(format!(
            "Operador desconocido: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Object::Error("Division por cero".to_string())
            } else {
                Object::Integer(left / right)
            }
        }
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("Operador desconocido: ENTERO {} ENTERO", operator)),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Object {
    match operator {
        "+" => Object::Str(format!("{}{}", left, right)),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("Operador desconocido: CADENA {} CADENA", operator)),
    }
}

fn eval_if_expression(expr: &crate::ast::IfExpression, env: &Environment) -> Object {
    let condition = eval_expression(&expr.condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block_statement(&expr.consequence, env)
    } else if let Some(alternative) = &expr.alternative {
        eval_block_statement(alternative, env)
    } else {
        Object::Null
    }
}

fn apply_function(function: Object, arguments: Vec<Object>) -> Object {
    match function {
        Object::Function(func) => {
            if func.parameters.len() != arguments.len() {
                return Object::Error(format!(
                    "Numero incorrecto de argumentos: se esperaban {}, se obtuvieron {}",
                    func.parameters.len(),
                    arguments.len()
                ));
            }
            let call_env = Environment::new_enclosed(func.env.clone());
            for (param, arg) in func.parameters.iter().zip(arguments) {
                call_env.set(param.clone(), arg);
            }
            let evaluated = eval_block_statement(&func.body, &call_env);
            unwrap_return_value(evaluated)
        }
        other => Object::Error(format!("No es una funcion: {}", other.type_name())),
    }
}

fn unwrap_return_value(object: Object) -> Object {
    match object {
        Object::Return(value) => *value,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn eval(input: &str) -> Object {
        let lexer = Lexer::new(input.to_string());
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "parser errors: {:?}", parser.error_messages());
        let env = Environment::new();
        eval_program(&program, &env)
    }

    #[test]
    fn integer_arithmetic() {
        assert!(matches!(eval("5 + 5 * 2 - 10"), Object::Integer(10)));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        match eval("5 / 0") {
            Object::Error(message) => assert_eq!(message, "Division por cero"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn boolean_and_comparison_expressions() {
        assert!(matches!(eval("1 < 2 == verdadero"), Object::Boolean(true)));
        assert!(matches!(eval("falso == falso"), Object::Boolean(true)));
    }

    #[test]
    fn if_else_truthiness() {
        assert!(matches!(eval("si (1 < 2) { 10 } si_no { 20 }"), Object::Integer(10)));
        assert!(matches!(eval("si (falso) { 10 }"), Object::Null));
    }

    #[test]
    fn return_escapes_nested_blocks() {
        let input = "si (verdadero) { si (verdadero) { regresa 10; } regresa 1; }";
        assert!(matches!(eval(input), Object::Integer(10)));
    }

    #[test]
    fn identifier_not_found_is_an_error() {
        match eval("foobar") {
            Object::Error(message) => assert_eq!(message, "Identificador no encontrado: foobar"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_operator_errors_use_type_tags() {
        match eval("5 + verdadero") {
            Object::Error(message) => assert_eq!(message, "Tipos incompatibles: ENTERO + BOOLEANO"),
            other => panic!("expected error, got {:?}", other),
        }
        match eval("verdadero + falso") {
            Object::Error(message) => assert_eq!(message, "Operador desconocido: BOOLEANO + BOOLEANO"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn error_short_circuits_further_evaluation() {
        let input = "5 + verdadero; 5;";
        match eval(input) {
            Object::Error(message) => assert_eq!(message, "Tipos incompatibles: ENTERO + BOOLEANO"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn function_application_and_closures() {
        let input = "variable suma = procedimiento(x, y) { x + y; }; suma(2, 3);";
        assert!(matches!(eval(input), Object::Integer(5)));

        let adder = "variable hacer_sumador = procedimiento(x) { procedimiento(y) { x + y }; }; \
                     variable sumar2 = hacer_sumador(2); sumar2(3);";
        assert!(matches!(eval(adder), Object::Integer(5)));
    }

    #[test]
    fn recursive_function_via_let_binding() {
        let input = "variable factorial = procedimiento(n) { \
                       si (n == 0) { regresa 1; } si_no { regresa n * factorial(n - 1); } \
                     }; factorial(5);";
        assert!(matches!(eval(input), Object::Integer(120)));
    }

    #[test]
    fn wrong_arity_is_an_error() {
        let input = "variable f = procedimiento(x) { x }; f();";
        match eval(input) {
            Object::Error(message) => assert_eq!(
                message,
                "Numero incorrecto de argumentos: se esperaban 1, se obtuvieron 0"
            ),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn string_concatenation() {
        match eval("\"Hola \" + \"mundo\"") {
            Object::Str(value) => assert_eq!(value, "Hola mundo"),
            other => panic!("expected string, got {:?}", other),
        }
    }
}
