//! Data expressions.
//!
//! A `DataExpression` is an immutable, reference-counted tree. Cloning is O(1)
//! and equality, ordering and hashing are structural, so expressions can be
//! used directly as map keys and compared without a rewriter.

use crate::sort::Sort;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Name of the boolean constant `true`.
pub const TRUE_NAME: &str = "true";
/// Name of the boolean constant `false`.
pub const FALSE_NAME: &str = "false";
/// Name of conjunction.
pub const AND_NAME: &str = "&&";
/// Name of disjunction.
pub const OR_NAME: &str = "||";
/// Name of negation.
pub const NOT_NAME: &str = "!";
/// Name of equality.
pub const EQUAL_NAME: &str = "==";
/// Name of the sentinel used for "no time stamp".
pub const UNDEFINED_REAL_NAME: &str = "@undefined_real";

/// A typed variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub sort: Sort,
}

impl Variable {
    pub fn new(name: impl Into<String>, sort: Sort) -> Self {
        Self {
            name: name.into(),
            sort,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A typed function symbol (constants are nullary function symbols).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub sort: Sort,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, sort: Sort) -> Self {
        Self {
            name: name.into(),
            sort,
        }
    }
}

/// The node stored behind a [`DataExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataNode {
    Variable(Variable),
    Function(FunctionSymbol),
    Application {
        head: DataExpression,
        arguments: Vec<DataExpression>,
    },
}

/// A shared, immutable data expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataExpression(Arc<DataNode>);

fn bool_op(arity: usize) -> Sort {
    Sort::function(vec![Sort::Bool; arity], Sort::Bool)
}

// === Constructors ===

impl DataExpression {
    pub fn new(node: DataNode) -> Self {
        DataExpression(Arc::new(node))
    }

    pub fn variable(v: Variable) -> Self {
        Self::new(DataNode::Variable(v))
    }

    pub fn function(f: FunctionSymbol) -> Self {
        Self::new(DataNode::Function(f))
    }

    /// A constant (nullary function symbol).
    pub fn constant(name: impl Into<String>, sort: Sort) -> Self {
        Self::function(FunctionSymbol::new(name, sort))
    }

    /// Apply `head` to `arguments`. An empty argument list yields `head` itself.
    pub fn application(head: DataExpression, arguments: Vec<DataExpression>) -> Self {
        if arguments.is_empty() {
            return head;
        }
        Self::new(DataNode::Application { head, arguments })
    }

    pub fn true_() -> Self {
        Self::constant(TRUE_NAME, Sort::Bool)
    }

    pub fn false_() -> Self {
        Self::constant(FALSE_NAME, Sort::Bool)
    }

    pub fn bool_(b: bool) -> Self {
        if b {
            Self::true_()
        } else {
            Self::false_()
        }
    }

    /// A numeral of a number sort.
    pub fn number(sort: Sort, value: i64) -> Self {
        Self::constant(value.to_string(), sort)
    }

    /// The sentinel time stamp of untimed multi-actions and deadlocks.
    pub fn undefined_real() -> Self {
        Self::constant(UNDEFINED_REAL_NAME, Sort::Real)
    }

    /// `a && b`, without any simplification.
    pub fn and_(a: DataExpression, b: DataExpression) -> Self {
        Self::application(Self::constant(AND_NAME, bool_op(2)), vec![a, b])
    }

    /// `a || b`, without any simplification.
    pub fn or_(a: DataExpression, b: DataExpression) -> Self {
        Self::application(Self::constant(OR_NAME, bool_op(2)), vec![a, b])
    }

    /// `!a`, without any simplification.
    pub fn not_(a: DataExpression) -> Self {
        Self::application(Self::constant(NOT_NAME, bool_op(1)), vec![a])
    }

    /// `a == b`; the operands are expected to have the same sort.
    pub fn equal_to(a: DataExpression, b: DataExpression) -> Self {
        let s = a.sort();
        Self::application(
            Self::constant(EQUAL_NAME, Sort::function(vec![s.clone(), s], Sort::Bool)),
            vec![a, b],
        )
    }
}

impl From<Variable> for DataExpression {
    fn from(v: Variable) -> Self {
        DataExpression::variable(v)
    }
}

// === Accessors and recognisers ===

impl DataExpression {
    pub fn node(&self) -> &DataNode {
        &self.0
    }

    /// True if both handles point to the same node.
    pub fn ptr_eq(&self, other: &DataExpression) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The sort of this expression, assuming it is well typed.
    pub fn sort(&self) -> Sort {
        match self.node() {
            DataNode::Variable(v) => v.sort.clone(),
            DataNode::Function(f) => f.sort.clone(),
            DataNode::Application { head, .. } => head.sort().codomain().clone(),
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self.node() {
            DataNode::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionSymbol> {
        match self.node() {
            DataNode::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Head and arguments if this is an application.
    pub fn as_application(&self) -> Option<(&DataExpression, &[DataExpression])> {
        match self.node() {
            DataNode::Application { head, arguments } => Some((head, arguments)),
            _ => None,
        }
    }

    fn is_constant_named(&self, name: &str) -> bool {
        self.as_function().is_some_and(|f| f.name == name)
    }

    /// Arguments of an application of the function symbol called `name` with
    /// exactly `arity` arguments.
    fn operator_arguments(&self, name: &str, arity: usize) -> Option<&[DataExpression]> {
        let (head, args) = self.as_application()?;
        if head.is_constant_named(name) && args.len() == arity {
            Some(args)
        } else {
            None
        }
    }

    pub fn is_true(&self) -> bool {
        self.as_function()
            .is_some_and(|f| f.name == TRUE_NAME && f.sort == Sort::Bool)
    }

    pub fn is_false(&self) -> bool {
        self.as_function()
            .is_some_and(|f| f.name == FALSE_NAME && f.sort == Sort::Bool)
    }

    pub fn is_undefined_real(&self) -> bool {
        self.is_constant_named(UNDEFINED_REAL_NAME)
    }

    pub fn is_and_application(&self) -> bool {
        self.operator_arguments(AND_NAME, 2).is_some()
    }

    pub fn is_or_application(&self) -> bool {
        self.operator_arguments(OR_NAME, 2).is_some()
    }

    pub fn is_not_application(&self) -> bool {
        self.operator_arguments(NOT_NAME, 1).is_some()
    }

    pub fn is_equal_to_application(&self) -> bool {
        self.operator_arguments(EQUAL_NAME, 2).is_some()
    }

    /// Operands of `a && b`.
    pub fn and_operands(&self) -> Option<(&DataExpression, &DataExpression)> {
        self.operator_arguments(AND_NAME, 2).map(|a| (&a[0], &a[1]))
    }

    /// Operands of `a || b`.
    pub fn or_operands(&self) -> Option<(&DataExpression, &DataExpression)> {
        self.operator_arguments(OR_NAME, 2).map(|a| (&a[0], &a[1]))
    }

    /// Operand of `!a`.
    pub fn not_operand(&self) -> Option<&DataExpression> {
        self.operator_arguments(NOT_NAME, 1).map(|a| &a[0])
    }

    /// Operands of `a == b`.
    pub fn equal_to_operands(&self) -> Option<(&DataExpression, &DataExpression)> {
        self.operator_arguments(EQUAL_NAME, 2).map(|a| (&a[0], &a[1]))
    }

    /// The integer value of a numeral constant.
    pub fn numeral_value(&self) -> Option<i64> {
        let f = self.as_function()?;
        if f.sort.is_numeric() {
            f.name.parse().ok()
        } else {
            None
        }
    }

    /// Split a condition into its top-level conjuncts.
    pub fn conjuncts(&self) -> Vec<DataExpression> {
        let mut result = Vec::new();
        let mut todo = vec![self.clone()];
        while let Some(e) = todo.pop() {
            match e.and_operands() {
                Some((l, r)) => {
                    todo.push(r.clone());
                    todo.push(l.clone());
                }
                None => result.push(e),
            }
        }
        result
    }
}

// === Pretty printing ===

fn infix_name(e: &DataExpression) -> Option<&'static str> {
    if e.is_and_application() {
        Some(AND_NAME)
    } else if e.is_or_application() {
        Some(OR_NAME)
    } else if e.is_equal_to_application() {
        Some(EQUAL_NAME)
    } else {
        None
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, e: &DataExpression) -> fmt::Result {
    if infix_name(e).is_some() {
        write!(f, "({})", e)
    } else {
        write!(f, "{}", e)
    }
}

impl fmt::Display for DataExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(op), Some((_, args))) = (infix_name(self), self.as_application()) {
            write_operand(f, &args[0])?;
            write!(f, " {} ", op)?;
            return write_operand(f, &args[1]);
        }
        if let Some(a) = self.not_operand() {
            write!(f, "!")?;
            return write_operand(f, a);
        }
        match self.node() {
            DataNode::Variable(v) => write!(f, "{}", v),
            DataNode::Function(s) => write!(f, "{}", s.name),
            DataNode::Application { head, arguments } => {
                write!(f, "{}(", head)?;
                for (i, a) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", a)?;
                }
                write!(f, ")")
            }
        }
    }
}
