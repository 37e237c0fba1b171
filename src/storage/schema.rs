//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query
//! building.

use sea_query::Iden;

/// Toggles table schema.
#[derive(Iden)]
pub enum Toggles {
    Table,
    #[iden = "key"]
    Key,
    #[iden = "is_enabled"]
    IsEnabled,
    #[iden = "description"]
    Description,
    #[iden = "created_at"]
    CreatedAt,
    #[iden = "updated_at"]
    UpdatedAt,
}

/// SQL for creating the toggles table.
pub const CREATE_TOGGLES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS toggles (
    key TEXT PRIMARY KEY,
    is_enabled BOOLEAN NOT NULL DEFAULT FALSE,
    description TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;
