//! Schema synchronization at startup: create the users and books tables when absent and add any
//! column a table is missing. Never drops or narrows columns.

use crate::error::AppError;
use sqlx::PgPool;

struct TableDef {
    name: &'static str,
    columns: &'static [(&'static str, &'static str)],
}

const TABLES: &[TableDef] = &[
    TableDef {
        name: "users",
        columns: &[
            ("name", "TEXT NOT NULL DEFAULT ''"),
            ("email", "TEXT NOT NULL DEFAULT ''"),
            ("password", "TEXT NOT NULL DEFAULT ''"),
            ("token", "TEXT"),
        ],
    },
    TableDef {
        name: "books",
        columns: &[
            ("title", "TEXT NOT NULL DEFAULT ''"),
            ("author", "TEXT NOT NULL DEFAULT ''"),
            ("publisher", "TEXT NOT NULL DEFAULT ''"),
            ("token", "TEXT"),
        ],
    },
];

/// Audit columns every table carries.
const AUDIT_COLUMNS: &[(&str, &str)] = &[
    ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("deleted_at", "TIMESTAMPTZ"),
];

fn create_table_sql(table: &TableDef) -> String {
    let mut col_defs = vec!["id BIGSERIAL PRIMARY KEY".to_string()];
    for (name, def) in table.columns.iter().chain(AUDIT_COLUMNS) {
        col_defs.push(format!("{} {}", name, def));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        table.name,
        col_defs.join(",\n  ")
    )
}

fn add_column_sql(table: &TableDef) -> Vec<String> {
    table
        .columns
        .iter()
        .chain(AUDIT_COLUMNS)
        .map(|(name, def)| {
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
                table.name, name, def
            )
        })
        .collect()
}

fn index_sql(table: &TableDef) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{}_deleted_at ON {} (deleted_at)",
        table.name, table.name
    )
}

/// Idempotent; safe to run on every start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for table in TABLES {
        tracing::info!(table = table.name, "synchronizing table");
        sqlx::query(&create_table_sql(table)).execute(pool).await?;
        for sql in add_column_sql(table) {
            sqlx::query(&sql).execute(pool).await?;
        }
        sqlx::query(&index_sql(table)).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_table_has_audit_columns() {
        let sql = create_table_sql(&TABLES[0]);
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS users"));
        assert!(sql.contains("id BIGSERIAL PRIMARY KEY"));
        assert!(sql.contains("password TEXT NOT NULL DEFAULT ''"));
        assert!(sql.contains("deleted_at TIMESTAMPTZ"));
    }

    #[test]
    fn every_column_gets_an_add_if_missing() {
        let stmts = add_column_sql(&TABLES[1]);
        assert_eq!(stmts.len(), 7);
        assert!(stmts
            .iter()
            .all(|s| s.starts_with("ALTER TABLE books ADD COLUMN IF NOT EXISTS")));
    }
}
