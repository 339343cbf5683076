use crate::error::{Result, StoreError};
use crate::local_storage::core_local_storage::CoreLocalStorage;
use crate::local_storage::part::part_tables::PartTable;
use chrono::Local;
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Format of `date_added`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time rendered in [`DATE_FORMAT`].
pub fn timestamp_now() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// One inventory record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: i64,
    pub name: String,
    pub part_number: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub supplier: String,
    pub description: String,
    pub date_added: String,
}

impl Part {
    /// The replaceable fields of this part.
    pub fn to_draft(&self) -> PartDraft {
        PartDraft {
            name: self.name.clone(),
            part_number: self.part_number.clone(),
            quantity: self.quantity,
            price: self.price,
            supplier: self.supplier.clone(),
            description: self.description.clone(),
        }
    }

    // Row layout follows `PartTable::columns`.
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Part {
            id: row.get(0)?,
            name: row.get(1)?,
            part_number: row.get(2)?,
            quantity: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
            price: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
            supplier: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            description: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            date_added: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        })
    }
}

/// A part without `id` and `date_added`: the values of an insert or the
/// replacement values of an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartDraft {
    pub name: String,
    pub part_number: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub supplier: String,
    pub description: String,
}

impl PartDraft {
    /// An empty `part_number` means the part has none.
    pub fn new(
        name: impl Into<String>,
        part_number: impl Into<String>,
        quantity: i64,
        price: f64,
        supplier: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let part_number = part_number.into();
        PartDraft {
            name: name.into(),
            part_number: (!part_number.is_empty()).then_some(part_number),
            quantity,
            price,
            supplier: supplier.into(),
            description: description.into(),
        }
    }

    /// The part number as it is written to the table.
    pub fn part_number(&self) -> Option<&str> {
        self.part_number.as_deref().filter(|value| !value.is_empty())
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        // NaN would be stored as NULL and read back as zero.
        if !self.price.is_finite() {
            return Err(StoreError::InvalidPrice(self.price));
        }
        Ok(())
    }
}

/// CRUD and search over the `parts` table of one database file.
#[derive(Debug, Clone)]
pub struct PartLocalStorage {
    core_storage: CoreLocalStorage,
}

impl PartLocalStorage {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        PartLocalStorage {
            core_storage: CoreLocalStorage::new(db_path),
        }
    }

    pub fn path(&self) -> &Path {
        self.core_storage.path()
    }

    /// Creates a new database file with an empty parts table. Refuses to
    /// touch a file that already exists.
    pub fn create_database(&self) -> Result<()> {
        if self.core_storage.exists() {
            return Err(StoreError::DatabaseExists(self.path().to_path_buf()));
        }

        self.ensure_schema()?;
        info!("Created database. path: {}", self.path().display());
        Ok(())
    }

    /// Opens an existing database file and makes sure it has a parts table.
    pub fn open_database(&self) -> Result<()> {
        if !self.core_storage.exists() {
            return Err(StoreError::DatabaseNotFound(self.path().to_path_buf()));
        }

        self.ensure_schema()?;
        info!("Opened database. path: {}", self.path().display());
        Ok(())
    }

    /// Creates the parts table if it is absent. An existing table is left
    /// alone whatever its shape.
    pub fn ensure_schema(&self) -> Result<()> {
        self.open_verified()?;
        Ok(())
    }

    fn open_verified(&self) -> Result<Connection> {
        let conn = self.core_storage.open_or_create()?;
        CoreLocalStorage::create_table(&conn, &PartTable::create_table())?;
        Ok(conn)
    }

    /// Inserts a part with an explicit creation timestamp and returns its id.
    pub fn insert(&self, draft: &PartDraft, date_added: &str) -> Result<i64> {
        draft.validate()?;

        let conn = self.core_storage.get_connection()?;
        let query = format!(
            "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?, ?, ?)",
            PartTable::TABLE_NAME,
            PartTable::COLUMN_NAME,
            PartTable::COLUMN_PART_NUMBER,
            PartTable::COLUMN_QUANTITY,
            PartTable::COLUMN_PRICE,
            PartTable::COLUMN_SUPPLIER,
            PartTable::COLUMN_DESCRIPTION,
            PartTable::COLUMN_DATE_ADDED
        );

        conn.execute(
            &query,
            params![
                draft.name,
                draft.part_number(),
                draft.quantity,
                draft.price,
                draft.supplier,
                draft.description,
                date_added
            ],
        )
        .map_err(|err| StoreError::from_write(err, draft.part_number()))?;

        let id = conn.last_insert_rowid();
        info!("Inserted part. id: {}, name: '{}'", id, draft.name);
        Ok(id)
    }

    /// Inserts a part stamped with the current time.
    pub fn save_part(&self, draft: &PartDraft) -> Result<i64> {
        self.insert(draft, &timestamp_now())
    }

    /// Replaces every field of part `id` except `id` and `date_added`.
    /// Updating an id that does not exist changes nothing and succeeds.
    pub fn update(&self, id: i64, draft: &PartDraft) -> Result<()> {
        draft.validate()?;

        let conn = self.core_storage.get_connection()?;
        let query = format!(
            "UPDATE {} SET {} = ?, {} = ?, {} = ?, {} = ?, {} = ?, {} = ? WHERE {} = ?",
            PartTable::TABLE_NAME,
            PartTable::COLUMN_NAME,
            PartTable::COLUMN_PART_NUMBER,
            PartTable::COLUMN_QUANTITY,
            PartTable::COLUMN_PRICE,
            PartTable::COLUMN_SUPPLIER,
            PartTable::COLUMN_DESCRIPTION,
            PartTable::COLUMN_ID
        );

        let rows_affected = conn
            .execute(
                &query,
                params![
                    draft.name,
                    draft.part_number(),
                    draft.quantity,
                    draft.price,
                    draft.supplier,
                    draft.description,
                    id
                ],
            )
            .map_err(|err| StoreError::from_write(err, draft.part_number()))?;

        info!("Updated part. id: {}, rows: {}", id, rows_affected);
        Ok(())
    }

    /// Removes part `id`. A missing id is not an error.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected =
            self.core_storage
                .delete_by_column(PartTable::TABLE_NAME, PartTable::COLUMN_ID, &id)?;

        info!("Deleted part. id: {}, rows: {}", id, rows_affected);
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Option<Part>> {
        let conn = self.core_storage.get_connection()?;
        let query = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            PartTable::columns(),
            PartTable::TABLE_NAME,
            PartTable::COLUMN_ID
        );

        let mut stmt = conn.prepare(&query)?;
        let mut rows = stmt.query_map(params![id], Part::from_row)?;

        match rows.next() {
            Some(part) => Ok(Some(part?)),
            None => Ok(None),
        }
    }

    pub fn count(&self) -> Result<i64> {
        self.core_storage.count(PartTable::TABLE_NAME)
    }

    /// Every part, by ascending id.
    pub fn list_all(&self) -> Result<Vec<Part>> {
        let conn = self.open_verified()?;
        let query = format!(
            "SELECT {} FROM {} ORDER BY {} ASC",
            PartTable::columns(),
            PartTable::TABLE_NAME,
            PartTable::COLUMN_ID
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([], Part::from_row)?;

        let mut parts = Vec::new();
        for row in rows {
            parts.push(row?);
        }

        debug!("Listed parts. count: {}", parts.len());
        Ok(parts)
    }

    /// Parts whose name, part number or description contains `term`, by
    /// ascending id. Matching is SQLite `LIKE`: ASCII letters compare without
    /// case, everything else exactly. An empty term lists every part.
    pub fn search(&self, term: &str) -> Result<Vec<Part>> {
        if term.is_empty() {
            return self.list_all();
        }

        let conn = self.open_verified()?;
        let query = format!(
            r"SELECT {columns} FROM {table}
              WHERE {name} LIKE ?1 ESCAPE '\'
                 OR {part_number} LIKE ?1 ESCAPE '\'
                 OR {description} LIKE ?1 ESCAPE '\'
              ORDER BY {id} ASC",
            columns = PartTable::columns(),
            table = PartTable::TABLE_NAME,
            name = PartTable::COLUMN_NAME,
            part_number = PartTable::COLUMN_PART_NUMBER,
            description = PartTable::COLUMN_DESCRIPTION,
            id = PartTable::COLUMN_ID
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params![like_pattern(term)], Part::from_row)?;

        let mut parts = Vec::new();
        for row in rows {
            parts.push(row?);
        }

        debug!("Searched parts. term: '{}', count: {}", term, parts.len());
        Ok(parts)
    }
}

/// Wraps `term` in `%` wildcards, escaping the LIKE metacharacters it contains.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
