//! Control-plane commands with validated identifiers.
//!
//! Rendering is one pure function per variant. Names only ever enter the
//! statement text through [`Identifier::quoted`].

use datashare_core::Identifier;

use crate::backend::{BackendError, ShareControlPlane};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareCommand {
    AddSchema {
        share: Identifier,
        schema: Identifier,
    },
    EnableIncludeNew {
        share: Identifier,
        schema: Identifier,
    },
    AddTable {
        share: Identifier,
        schema: Identifier,
        table: Identifier,
    },
    DropTable {
        share: Identifier,
        schema: Identifier,
        table: Identifier,
    },
    DropSchema {
        share: Identifier,
        schema: Identifier,
    },
}

impl ShareCommand {
    /// Redshift `ALTER DATASHARE` statement text.
    pub fn to_sql(&self) -> String {
        match self {
            ShareCommand::AddSchema { share, schema } => {
                format!("ALTER DATASHARE {share} ADD SCHEMA {schema}")
            }
            ShareCommand::EnableIncludeNew { share, schema } => {
                format!("ALTER DATASHARE {share} SET INCLUDENEW = TRUE FOR SCHEMA {schema}")
            }
            ShareCommand::AddTable {
                share,
                schema,
                table,
            } => format!("ALTER DATASHARE {share} ADD TABLE {schema}.{table}"),
            ShareCommand::DropTable {
                share,
                schema,
                table,
            } => format!("ALTER DATASHARE {share} REMOVE TABLE {schema}.{table}"),
            ShareCommand::DropSchema { share, schema } => {
                format!("ALTER DATASHARE {share} REMOVE SCHEMA {schema}")
            }
        }
    }

    /// Route to the matching control-plane call.
    pub fn dispatch<C>(&self, control_plane: &mut C) -> Result<(), BackendError>
    where
        C: ShareControlPlane + ?Sized,
    {
        match self {
            ShareCommand::AddSchema { share, schema } => control_plane.add_schema(share, schema),
            ShareCommand::EnableIncludeNew { share, schema } => {
                control_plane.enable_include_new(share, schema)
            }
            ShareCommand::AddTable {
                share,
                schema,
                table,
            } => control_plane.add_table(share, schema, table),
            ShareCommand::DropTable {
                share,
                schema,
                table,
            } => control_plane.drop_table(share, schema, table),
            ShareCommand::DropSchema { share, schema } => control_plane.drop_schema(share, schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Identifier {
        Identifier::new(name).unwrap()
    }

    #[test]
    fn renders_each_statement() {
        let share = id("sales_share");
        let cases = [
            (
                ShareCommand::AddSchema {
                    share: share.clone(),
                    schema: id("sales"),
                },
                r#"ALTER DATASHARE "sales_share" ADD SCHEMA "sales""#,
            ),
            (
                ShareCommand::EnableIncludeNew {
                    share: share.clone(),
                    schema: id("sales"),
                },
                r#"ALTER DATASHARE "sales_share" SET INCLUDENEW = TRUE FOR SCHEMA "sales""#,
            ),
            (
                ShareCommand::AddTable {
                    share: share.clone(),
                    schema: id("sales"),
                    table: id("orders"),
                },
                r#"ALTER DATASHARE "sales_share" ADD TABLE "sales"."orders""#,
            ),
            (
                ShareCommand::DropTable {
                    share: share.clone(),
                    schema: id("legacy"),
                    table: id("old"),
                },
                r#"ALTER DATASHARE "sales_share" REMOVE TABLE "legacy"."old""#,
            ),
            (
                ShareCommand::DropSchema {
                    share,
                    schema: id("legacy"),
                },
                r#"ALTER DATASHARE "sales_share" REMOVE SCHEMA "legacy""#,
            ),
        ];
        for (command, expected) in cases {
            assert_eq!(command.to_sql(), expected);
        }
    }

    #[test]
    fn hostile_table_name_stays_inside_quotes() {
        let command = ShareCommand::AddTable {
            share: id("s"),
            schema: id("sales"),
            table: id(r#"x"; DROP DATASHARE s; --"#),
        };
        assert_eq!(
            command.to_sql(),
            r#"ALTER DATASHARE "s" ADD TABLE "sales"."x""; DROP DATASHARE s; --""#
        );
    }
}
