//! Part catalog store.

use sqlx::FromRow;
use tracing::instrument;

use stockroom_core::{DomainError, Entity, PartId};
use stockroom_inventory::{Part, PartDraft};

use crate::db::Database;
use crate::error::{StoreResult, is_unique_violation, map_sqlx_error};

const PART_COLUMNS: &str =
    "id, part_number, description, machine_type, supplier, min_qty, current_qty, location";

/// SQLite-backed catalog of spare parts.
///
/// Quantity on hand normally moves through
/// [`StockAdjustmentService`](crate::adjustment::StockAdjustmentService);
/// [`PartCatalog::update`] is the only other writer.
#[derive(Debug, Clone)]
pub struct PartCatalog {
    db: Database,
}

impl PartCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a new part. The part number must be unique.
    #[instrument(skip(self, draft), fields(part_number = %draft.part_number), err)]
    pub async fn insert(&self, draft: PartDraft) -> StoreResult<Part> {
        let draft = draft.validate()?;

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO spare_parts (
                part_number, description, machine_type, supplier, min_qty, current_qty, location
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id
            "#,
        )
        .bind(&draft.part_number)
        .bind(&draft.description)
        .bind(&draft.machine_type)
        .bind(&draft.supplier)
        .bind(draft.min_qty)
        .bind(draft.current_qty)
        .bind(&draft.location)
        .fetch_one(self.db.pool())
        .await;

        let id = match inserted {
            Ok(id) => PartId::new(id),
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::duplicate_key(draft.part_number).into());
            }
            Err(e) => return Err(map_sqlx_error("insert_part", e)),
        };

        let part = Part::from_draft(id, draft);
        tracing::info!(part_id = %part.id(), part_number = part.business_key(), "part created");
        Ok(part)
    }

    #[instrument(skip(self), err)]
    pub async fn get(&self, id: PartId) -> StoreResult<Option<Part>> {
        let row = sqlx::query_as::<_, PartRow>(&format!(
            "SELECT {PART_COLUMNS} FROM spare_parts WHERE id = ?1"
        ))
        .bind(id.get())
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| map_sqlx_error("get_part", e))?;

        Ok(row.map(Part::from))
    }

    /// Overwrite every attribute of a part, including its quantity on hand.
    ///
    /// This is the administrative override path: a quantity changed here is a
    /// manual correction and leaves no ledger entry.
    #[instrument(skip(self, draft), fields(part_number = %draft.part_number), err)]
    pub async fn update(&self, id: PartId, draft: PartDraft) -> StoreResult<Part> {
        let draft = draft.validate()?;

        let updated = sqlx::query(
            r#"
            UPDATE spare_parts SET
                part_number = ?1,
                description = ?2,
                machine_type = ?3,
                supplier = ?4,
                min_qty = ?5,
                current_qty = ?6,
                location = ?7
            WHERE id = ?8
            "#,
        )
        .bind(&draft.part_number)
        .bind(&draft.description)
        .bind(&draft.machine_type)
        .bind(&draft.supplier)
        .bind(draft.min_qty)
        .bind(draft.current_qty)
        .bind(&draft.location)
        .bind(id.get())
        .execute(self.db.pool())
        .await;

        let rows = match updated {
            Ok(res) => res.rows_affected(),
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::duplicate_key(draft.part_number).into());
            }
            Err(e) => return Err(map_sqlx_error("update_part", e)),
        };

        if rows == 0 {
            return Err(DomainError::not_found(id).into());
        }

        tracing::info!(
            part_id = %id,
            current_qty = draft.current_qty,
            "part edited (unaudited quantity override)"
        );
        Ok(Part::from_draft(id, draft))
    }

    /// Remove a part and, by cascade, its transaction history.
    ///
    /// Deleting an id that does not exist is a no-op.
    #[instrument(skip(self), err)]
    pub async fn delete(&self, id: PartId) -> StoreResult<()> {
        let res = sqlx::query("DELETE FROM spare_parts WHERE id = ?1")
            .bind(id.get())
            .execute(self.db.pool())
            .await
            .map_err(|e| map_sqlx_error("delete_part", e))?;

        if res.rows_affected() > 0 {
            tracing::info!(part_id = %id, "part deleted");
        }
        Ok(())
    }

    /// Parts whose number, description, machine type or supplier contains
    /// `query`, ordered by part number. An empty query lists every part.
    ///
    /// The query is matched as given, whitespace included.
    #[instrument(skip(self), err)]
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Part>> {
        let pattern = format!("%{}%", escape_like(query));

        let rows = sqlx::query_as::<_, PartRow>(&format!(
            r#"
            SELECT {PART_COLUMNS}
            FROM spare_parts
            WHERE part_number LIKE ?1 ESCAPE '\'
               OR description LIKE ?1 ESCAPE '\'
               OR machine_type LIKE ?1 ESCAPE '\'
               OR supplier LIKE ?1 ESCAPE '\'
            ORDER BY part_number ASC
            "#
        ))
        .bind(pattern)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| map_sqlx_error("search_parts", e))?;

        Ok(rows.into_iter().map(Part::from).collect())
    }
}

/// Make `%`, `_` and the escape character itself match literally.
fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, FromRow)]
pub(crate) struct PartRow {
    id: i64,
    part_number: String,
    description: String,
    machine_type: String,
    supplier: String,
    min_qty: i64,
    current_qty: i64,
    location: String,
}

impl From<PartRow> for Part {
    fn from(row: PartRow) -> Self {
        Part {
            id: PartId::new(row.id),
            part_number: row.part_number,
            description: row.description,
            machine_type: row.machine_type,
            supplier: row.supplier,
            min_qty: row.min_qty,
            current_qty: row.current_qty,
            location: row.location,
        }
    }
}

pub(crate) fn part_columns() -> &'static str {
    PART_COLUMNS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("BRG"), "BRG");
    }
}
