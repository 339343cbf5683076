//! Single-row clipboard format: the fields of one part joined by tabs.
//!
//! A copied row carries all eight columns, id first. A pasted row may carry
//! either those eight or just the seven columns after the id. The id and the
//! timestamp of a pasted row are never used: the store assigns both when the
//! draft is saved. Text fields containing a tab do not survive the trip: such
//! a line has the wrong field count or a non-numeric id and is rejected.

use crate::error::MalformedRow;
use crate::local_storage::part::{Part, PartDraft};

pub const FIELD_SEPARATOR: &str = "\t";

/// Fields of a row without its leading id.
const DRAFT_FIELDS: usize = 7;

/// Fields of a copied row, id included.
const ROW_FIELDS: usize = DRAFT_FIELDS + 1;

/// Renders `part` as one tab separated line, in column order.
pub fn serialize(part: &Part) -> String {
    [
        part.id.to_string(),
        part.name.clone(),
        part.part_number.clone().unwrap_or_default(),
        part.quantity.to_string(),
        part.price.to_string(),
        part.supplier.clone(),
        part.description.clone(),
        part.date_added.clone(),
    ]
    .join(FIELD_SEPARATOR)
}

/// Parses a pasted line into a draft.
///
/// Seven fields are read as name, part number, quantity, price, supplier,
/// description and date added. With eight the first must be a numeric row
/// id and is skipped. Any other field count is malformed.
pub fn deserialize(text: &str) -> Result<PartDraft, MalformedRow> {
    let line = text.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    let fields = match fields.len() {
        DRAFT_FIELDS => &fields[..],
        ROW_FIELDS => {
            let id = fields[0].trim();
            if id.parse::<i64>().is_err() {
                return Err(MalformedRow::new(format!("invalid row id '{}'", id)));
            }
            &fields[1..]
        }
        found => {
            return Err(MalformedRow::new(format!(
                "expected {} or {} tab separated fields, found {}",
                DRAFT_FIELDS, ROW_FIELDS, found
            )));
        }
    };

    let quantity = parse_quantity(fields[2])?;
    let price = parse_price(fields[3])?;

    Ok(PartDraft::new(
        fields[0],
        fields[1],
        quantity,
        price,
        fields[4],
        fields[5],
    ))
}

/// Integer-of-float: "5" and "5.0" are 5, "5.9" truncates to 5.
fn parse_quantity(value: &str) -> Result<i64, MalformedRow> {
    let value = value.trim();
    if let Ok(quantity) = value.parse::<i64>() {
        return Ok(quantity);
    }

    let invalid = || MalformedRow::new(format!("invalid quantity '{}'", value));
    let quantity = value.parse::<f64>().map_err(|_| invalid())?;
    if !quantity.is_finite() || quantity < i64::MIN as f64 || quantity >= i64::MAX as f64 {
        return Err(invalid());
    }

    Ok(quantity.trunc() as i64)
}

fn parse_price(value: &str) -> Result<f64, MalformedRow> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(MalformedRow::new(format!("invalid price '{}'", value))),
    }
}
