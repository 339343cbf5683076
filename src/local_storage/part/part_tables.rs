/// Provides constants and utilities for working with
/// the "parts" database table.
pub struct PartTable;

impl PartTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "parts";

    /// The column name for the primary key identifier of a part.
    pub const COLUMN_ID: &'static str = "id";

    /// The column name for storing the part's name.
    pub const COLUMN_NAME: &'static str = "name";

    /// The column name for the part number. Unique; NULL when the part has none.
    pub const COLUMN_PART_NUMBER: &'static str = "part_number";

    /// The column name for the quantity in stock.
    pub const COLUMN_QUANTITY: &'static str = "quantity";

    /// The column name for the unit price.
    pub const COLUMN_PRICE: &'static str = "price";

    /// The column name for the supplier.
    pub const COLUMN_SUPPLIER: &'static str = "supplier";

    /// The column name for the free text description.
    pub const COLUMN_DESCRIPTION: &'static str = "description";

    /// The column name for the creation timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub const COLUMN_DATE_ADDED: &'static str = "date_added";

    /// SQL statement for creating the parts table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                {} INTEGER PRIMARY KEY AUTOINCREMENT,
                {} TEXT NOT NULL,
                {} TEXT UNIQUE,
                {} INTEGER,
                {} REAL,
                {} TEXT,
                {} TEXT,
                {} TEXT
            )",
            Self::TABLE_NAME,
            Self::COLUMN_ID,
            Self::COLUMN_NAME,
            Self::COLUMN_PART_NUMBER,
            Self::COLUMN_QUANTITY,
            Self::COLUMN_PRICE,
            Self::COLUMN_SUPPLIER,
            Self::COLUMN_DESCRIPTION,
            Self::COLUMN_DATE_ADDED
        )
    }

    /// Column list in row order, for SELECT statements.
    pub fn columns() -> String {
        [
            Self::COLUMN_ID,
            Self::COLUMN_NAME,
            Self::COLUMN_PART_NUMBER,
            Self::COLUMN_QUANTITY,
            Self::COLUMN_PRICE,
            Self::COLUMN_SUPPLIER,
            Self::COLUMN_DESCRIPTION,
            Self::COLUMN_DATE_ADDED,
        ]
        .join(", ")
    }
}
