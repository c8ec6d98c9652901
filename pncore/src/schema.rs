//! Declarative records of column definitions, as captured by schema
//! migrations.  These carry no behaviour of their own.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    Decimal {
        max_digits: u32,
        decimal_places: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    pub kind: ColumnKind,
    pub null: bool,
    pub blank: bool,
    pub db_index: bool,
    pub verbose_name: Option<String>,
    pub help_text: Option<String>,
}

/// A schema change that redefines an existing column of a model.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AlterField {
    pub model_name: String,
    pub name: String,
    pub field: ColumnSchema,
}
