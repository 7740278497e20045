//! Table schemas and column references.

use std::fmt;
use std::sync::Arc;

use crate::config::TypeSettings;
use crate::error::{QuarryError, Result};
use crate::expr::op::Operation;
use crate::expr::Expr;
use crate::types::DataType;

/// A named, typed column in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub dtype: DataType,
}

/// Ordered column definitions. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Build a schema, rejecting duplicate column names.
    ///
    /// `table` is only used in the error message.
    pub fn new(table: &str, fields: Vec<Field>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(QuarryError::DuplicateColumn {
                    table: table.to_string(),
                    column: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct TableInner {
    name: String,
    schema: Schema,
}

/// An unbound table: a name plus a schema.
///
/// Cheap to clone. Two tables are equal when both name and schema match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table(Arc<TableInner>);

impl Table {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Table(Arc::new(TableInner {
            name: name.into(),
            schema,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn schema(&self) -> &Schema {
        &self.0.schema
    }

    /// Reference a column by name.
    pub fn column(&self, name: &str) -> Result<Expr> {
        let field = self
            .schema()
            .get(name)
            .ok_or_else(|| QuarryError::NoSuchColumn {
                table: self.name().to_string(),
                column: name.to_string(),
            })?;
        Ok(Expr::from_op(Operation::column(
            self.clone(),
            &field.name,
            field.dtype,
        )))
    }

    /// References to every column, in schema order.
    pub fn columns(&self) -> Vec<Expr> {
        self.schema()
            .fields()
            .iter()
            .map(|f| Expr::from_op(Operation::column(self.clone(), &f.name, f.dtype)))
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, field) in self.schema().fields().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field.name, field.dtype)?;
        }
        f.write_str(")")
    }
}

/// Define a table from `(column, type spec)` pairs.
///
/// ```ignore
/// let t = define_table(&[("v1", "decimal(12, 2)"), ("v3", "int32")], "t")?;
/// ```
pub fn define_table(columns: &[(&str, &str)], name: &str) -> Result<Table> {
    define_table_with(columns, name, &TypeSettings::default())
}

/// Like [`define_table`], taking bare `decimal` defaults from `settings`.
pub fn define_table_with(
    columns: &[(&str, &str)],
    name: &str,
    settings: &TypeSettings,
) -> Result<Table> {
    let fields = columns
        .iter()
        .map(|(col, spec)| {
            Ok(Field {
                name: col.to_string(),
                dtype: DataType::parse_with(spec, settings)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let schema = Schema::new(name, fields)?;
    log::trace!("defined table {} with {} columns", name, schema.len());
    Ok(Table::new(name, schema))
}
