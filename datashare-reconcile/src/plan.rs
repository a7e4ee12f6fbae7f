//! Expansion of a [`ReconciliationPlan`] into an ordered operation sequence.
//!
//! ## Order
//!
//! 1. `AddSchema(x)` then `EnableIncludeNew(x)`, per added schema.
//! 2. `AddTable` for every added table.
//! 3. `DropTable` for every removed table.
//! 4. `DropSchema` for every removed schema.
//!
//! The control plane rejects a table whose schema is not yet shared, and a
//! schema drop while the schema still exposes tables. Within a phase the
//! targets are independent; they come out in lexicographic order.

use std::fmt;

use serde::Serialize;

use datashare_core::{Identifier, IdentifierError, SchemaRef, ShareName, TableRef};

use crate::command::ShareCommand;
use crate::diff::ReconciliationPlan;

/// One atomic change to the share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    AddSchema { schema: SchemaRef },
    EnableIncludeNew { schema: SchemaRef },
    AddTable { table: TableRef },
    DropTable { table: TableRef },
    DropSchema { schema: SchemaRef },
}

impl Operation {
    /// The schema this operation touches.
    pub fn schema(&self) -> &SchemaRef {
        match self {
            Operation::AddSchema { schema }
            | Operation::EnableIncludeNew { schema }
            | Operation::DropSchema { schema } => schema,
            Operation::AddTable { table } | Operation::DropTable { table } => &table.schema,
        }
    }

    /// Validate every name involved and build the control-plane command.
    pub fn command(&self, share: &ShareName) -> Result<ShareCommand, IdentifierError> {
        let share = Identifier::new(&share.0)?;
        let command = match self {
            Operation::AddSchema { schema } => ShareCommand::AddSchema {
                share,
                schema: Identifier::new(&schema.0)?,
            },
            Operation::EnableIncludeNew { schema } => ShareCommand::EnableIncludeNew {
                share,
                schema: Identifier::new(&schema.0)?,
            },
            Operation::AddTable { table } => ShareCommand::AddTable {
                share,
                schema: Identifier::new(&table.schema.0)?,
                table: Identifier::new(&table.table)?,
            },
            Operation::DropTable { table } => ShareCommand::DropTable {
                share,
                schema: Identifier::new(&table.schema.0)?,
                table: Identifier::new(&table.table)?,
            },
            Operation::DropSchema { schema } => ShareCommand::DropSchema {
                share,
                schema: Identifier::new(&schema.0)?,
            },
        };
        Ok(command)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddSchema { schema } => write!(f, "add schema {schema}"),
            Operation::EnableIncludeNew { schema } => {
                write!(f, "enable include-new for schema {schema}")
            }
            Operation::AddTable { table } => write!(f, "add table {table}"),
            Operation::DropTable { table } => write!(f, "remove table {table}"),
            Operation::DropSchema { schema } => write!(f, "remove schema {schema}"),
        }
    }
}

/// Order the plan's four sets into the sequence the executor consumes.
pub fn plan(reconciliation: &ReconciliationPlan) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(reconciliation.operation_count());

    for schema in &reconciliation.add_schemas {
        ops.push(Operation::AddSchema {
            schema: schema.clone(),
        });
        ops.push(Operation::EnableIncludeNew {
            schema: schema.clone(),
        });
    }
    ops.extend(
        reconciliation
            .add_tables
            .iter()
            .cloned()
            .map(|table| Operation::AddTable { table }),
    );
    ops.extend(
        reconciliation
            .drop_tables
            .iter()
            .cloned()
            .map(|table| Operation::DropTable { table }),
    );
    ops.extend(
        reconciliation
            .drop_schemas
            .iter()
            .cloned()
            .map(|schema| Operation::DropSchema { schema }),
    );

    ops
}
