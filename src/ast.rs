//! Owned syntax-tree nodes retained by tree-walking [`Function`] objects.
//!
//! The parser that builds these lives outside this crate. What the object
//! model needs is a tree that outlives the token buffer (a function value may
//! be called long after parsing) and that renders back to source text for
//! `Inspect`.
//!
//! [`Function`]: crate::object::Object::Function

use std::fmt;

/// A bare name at a binding or reference site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub value: String,
}

impl Identifier {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Every kind of *expression* the language has.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),

    IntegerLiteral(i64),

    StringLiteral(String),

    Boolean(bool),

    /// `!x`, `-x`
    Prefix {
        operator: String,
        right: Box<Expression>,
    },

    /// `a + b`, `a == b`, ...
    Infix {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },

    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },

    /// `fn(a, b) { ... }`
    FunctionLiteral {
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },

    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },

    ArrayLiteral(Vec<Expression>),

    /// Pairs in source order.
    HashLiteral(Vec<(Expression, Expression)>),

    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

/// Statements that can appear in a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let { name: Identifier, value: Expression },

    Return(Expression),

    Expression(Expression),
}

/// `{ ... }` body of a function or conditional branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Source rendering
// ─────────────────────────────────────────────────────────────────────────────

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),

            Expression::IntegerLiteral(n) => {
                let mut buf = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Expression::StringLiteral(s) => f.write_str(s),

            Expression::Boolean(b) => write!(f, "{}", b),

            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),

            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),

            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, "else {}", alt)?;
                }
                Ok(())
            }

            Expression::FunctionLiteral { parameters, body } => {
                f.write_str("fn(")?;
                write_joined(f, parameters)?;
                write!(f, ") {}", body)
            }

            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{}(", function)?;
                write_joined(f, arguments)?;
                f.write_str(")")
            }

            Expression::ArrayLiteral(elements) => {
                f.write_str("[")?;
                write_joined(f, elements)?;
                f.write_str("]")
            }

            Expression::HashLiteral(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                f.write_str("}")
            }

            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
