//! Operation nodes - the immutable tree under every expression.
//!
//! An [`Operation`] is a kind tag, an ordered argument list and the result
//! type computed when the node was built. Nodes are shared behind an `Arc`,
//! so cloning a tree is cheap and trees can be sent across threads.
//!
//! Equality is structural: two operations are equal when their kinds and
//! arguments are recursively equal, no matter how they were constructed.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::table::Table;
use crate::types::lattice::integer_literal_type;
use crate::types::DataType;

/// Whether an expression denotes one value or one value per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Column,
}

impl Shape {
    /// Column if any input is a column, else scalar.
    pub fn broadcast<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Shape {
        if shapes.into_iter().any(|s| *s == Shape::Column) {
            Shape::Column
        } else {
            Shape::Scalar
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => f.write_str("Scalar"),
            Shape::Column => f.write_str("Column"),
        }
    }
}

/// Raw literal values.
///
/// Floats compare and hash by bit pattern so that equality stays reflexive.
#[derive(Debug, Clone)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Literal {
    /// The natural type of this value.
    pub fn dtype(&self) -> DataType {
        match self {
            Literal::Null => DataType::Null,
            Literal::Bool(_) => DataType::Boolean,
            Literal::Int(n) => integer_literal_type(*n),
            Literal::Float(_) => DataType::Float64,
            Literal::String(_) => DataType::String,
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Null, Literal::Null) => true,
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (Literal::String(a), Literal::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Literal::Null => {}
            Literal::Bool(b) => b.hash(state),
            Literal::Int(n) => n.hash(state),
            Literal::Float(f) => f.to_bits().hash(state),
            Literal::String(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("None"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Int(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Int(n as i64)
    }
}

impl From<f64> for Literal {
    fn from(f: f64) -> Self {
        Literal::Float(f)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

/// Operation kind tag, with the non-expression parameters some kinds carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OpKind {
    Literal(Literal),
    ColumnRef { table: Table, name: String },
    Cast(DataType),
    Alias(String),

    Abs,
    Ceil,
    Floor,
    Sign,
    /// Arguments: value, digits.
    Round,

    Coalesce,
    Greatest,
    Least,

    /// Arguments: value, separator, optional filter.
    GroupConcat,

    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OpKind {
    /// Display name of the kind, e.g. `Coalesce`.
    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Literal(_) => "Literal",
            OpKind::ColumnRef { .. } => "ColumnRef",
            OpKind::Cast(_) => "Cast",
            OpKind::Alias(_) => "Alias",
            OpKind::Abs => "Abs",
            OpKind::Ceil => "Ceil",
            OpKind::Floor => "Floor",
            OpKind::Sign => "Sign",
            OpKind::Round => "Round",
            OpKind::Coalesce => "Coalesce",
            OpKind::Greatest => "Greatest",
            OpKind::Least => "Least",
            OpKind::GroupConcat => "GroupConcat",
            OpKind::Add => "Add",
            OpKind::Subtract => "Subtract",
            OpKind::Multiply => "Multiply",
            OpKind::Divide => "Divide",
        }
    }

    /// Whether the kind collapses a column into a single value.
    pub fn is_reduction(&self) -> bool {
        matches!(self, OpKind::GroupConcat)
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            OpKind::Add | OpKind::Subtract | OpKind::Multiply | OpKind::Divide
        )
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Node {
    kind: OpKind,
    args: Vec<Option<Operation>>,
    dtype: DataType,
    shape: Shape,
}

/// An immutable, typed operation node.
#[derive(Debug, Clone)]
pub struct Operation(Arc<Node>);

impl Operation {
    pub(crate) fn new(
        kind: OpKind,
        args: Vec<Option<Operation>>,
        dtype: DataType,
        shape: Shape,
    ) -> Self {
        Operation(Arc::new(Node {
            kind,
            args,
            dtype,
            shape,
        }))
    }

    pub(crate) fn literal(value: Literal) -> Self {
        let dtype = value.dtype();
        Operation::new(OpKind::Literal(value), vec![], dtype, Shape::Scalar)
    }

    pub(crate) fn column(table: Table, name: &str, dtype: DataType) -> Self {
        Operation::new(
            OpKind::ColumnRef {
                table,
                name: name.to_string(),
            },
            vec![],
            dtype,
            Shape::Column,
        )
    }

    pub fn kind(&self) -> &OpKind {
        &self.0.kind
    }

    /// All argument slots, in order. Absent optional arguments are `None`.
    pub fn args(&self) -> &[Option<Operation>] {
        &self.0.args
    }

    /// The argument in slot `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&Operation> {
        self.0.args.get(index).and_then(|a| a.as_ref())
    }

    pub fn dtype(&self) -> DataType {
        self.0.dtype
    }

    pub fn shape(&self) -> Shape {
        self.0.shape
    }

    /// The literal value if this is a literal node.
    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.0.kind {
            OpKind::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Number of nodes in the tree rooted here.
    pub fn node_count(&self) -> usize {
        1 + self
            .args()
            .iter()
            .flatten()
            .map(Operation::node_count)
            .sum::<usize>()
    }

    /// Distinct tables referenced by column nodes, in first-seen order.
    pub fn tables(&self) -> Vec<Table> {
        let mut found = Vec::new();
        self.collect_tables(&mut found);
        found
    }

    fn collect_tables(&self, found: &mut Vec<Table>) {
        if let OpKind::ColumnRef { table, .. } = &self.0.kind {
            if !found.contains(table) {
                found.push(table.clone());
            }
        }
        for arg in self.args().iter().flatten() {
            arg.collect_tables(found);
        }
    }

    /// Output name: the alias, the column name, or a rendering of the tree.
    pub fn name(&self) -> String {
        match &self.0.kind {
            OpKind::Alias(name) => name.clone(),
            OpKind::ColumnRef { name, .. } => name.clone(),
            _ => self.to_string(),
        }
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for Operation {}

impl Hash for Operation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            OpKind::Literal(lit) => write!(f, "{}", lit),
            OpKind::ColumnRef { name, .. } => f.write_str(name),
            kind => {
                write!(f, "{}(", kind.name())?;
                let mut first = true;
                for arg in self.args().iter().flatten() {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                    first = false;
                }
                match kind {
                    OpKind::Cast(to) => write!(f, ", {}", to)?,
                    OpKind::Alias(name) => write!(f, ", {:?}", name)?,
                    _ => {}
                }
                f.write_str(")")
            }
        }
    }
}
