use crate::error::{MalformedRow, StoreError};
use crate::interchange;
use crate::local_storage::part::{Part, PartDraft, PartLocalStorage};
use std::io::{self, Write};
use tracing::{info, warn};

/// Column headings of the table view.
pub const HEADINGS: [&str; 8] = [
	"ID",
	"Name",
	"Part number",
	"Quantity",
	"Price",
	"Supplier",
	"Description",
	"Date added",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
	Table,
	Json,
}

/// Field replacements for an edit. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartChanges {
	pub name: Option<String>,
	pub part_number: Option<String>,
	pub quantity: Option<i64>,
	pub price: Option<f64>,
	pub supplier: Option<String>,
	pub description: Option<String>,
}

impl PartChanges {
	pub fn apply(self, draft: PartDraft) -> PartDraft {
		PartDraft {
			name: self.name.unwrap_or(draft.name),
			part_number: match self.part_number {
				Some(part_number) => (!part_number.is_empty()).then_some(part_number),
				None => draft.part_number,
			},
			quantity: self.quantity.unwrap_or(draft.quantity),
			price: self.price.unwrap_or(draft.price),
			supplier: self.supplier.unwrap_or(draft.supplier),
			description: self.description.unwrap_or(draft.description),
		}
	}
}

/// The user actions of the inventory window, on top of one database file.
pub struct PartHandler {
	storage: PartLocalStorage,
}

impl PartHandler {
	pub fn new(storage: PartLocalStorage) -> Self {
		Self { storage }
	}

	#[cfg(test)]
	pub fn storage(&self) -> &PartLocalStorage {
		&self.storage
	}

	pub fn list(&self, out: &mut impl Write, format: OutputFormat) -> Result<usize, HandlerError> {
		let parts = self.storage.list_all()?;
		render(&parts, out, format)?;
		Ok(parts.len())
	}

	pub fn search(
		&self,
		term: &str,
		out: &mut impl Write,
		format: OutputFormat,
	) -> Result<usize, HandlerError> {
		let parts = self.storage.search(term)?;
		render(&parts, out, format)?;
		Ok(parts.len())
	}

	pub fn add(&self, draft: &PartDraft) -> Result<i64, HandlerError> {
		let id = self.storage.save_part(draft).inspect_err(report)?;
		Ok(id)
	}

	/// Loads part `id`, applies `changes` and writes it back.
	pub fn edit(&self, id: i64, changes: PartChanges) -> Result<Part, HandlerError> {
		let part = self.find(id)?;
		let draft = changes.apply(part.to_draft());

		self.storage.update(id, &draft).inspect_err(report)?;

		Ok(Part {
			id: part.id,
			date_added: part.date_added,
			name: draft.name,
			part_number: draft.part_number,
			quantity: draft.quantity,
			price: draft.price,
			supplier: draft.supplier,
			description: draft.description,
		})
	}

	pub fn delete(&self, id: i64, confirmed: bool) -> Result<(), HandlerError> {
		if !confirmed {
			return Err(HandlerError::DeleteNotConfirmed(id));
		}

		self.find(id)?;
		self.storage.delete(id)?;
		Ok(())
	}

	/// The clipboard line for part `id`.
	pub fn copy(&self, id: i64) -> Result<String, HandlerError> {
		let part = self.find(id)?;
		Ok(interchange::serialize(&part))
	}

	/// Saves the part described by a clipboard line as a new record.
	pub fn paste(&self, text: &str) -> Result<i64, HandlerError> {
		let draft = interchange::deserialize(text).inspect_err(|err| warn!("{}", err))?;
		let id = self.storage.save_part(&draft).inspect_err(report)?;

		info!("Pasted part. id: {}", id);
		Ok(id)
	}

	fn find(&self, id: i64) -> Result<Part, HandlerError> {
		self.storage.get(id)?.ok_or(HandlerError::PartNotFound(id))
	}
}

fn report(err: &StoreError) {
	if !err.is_persistence() {
		warn!("{}", err);
	}
}

/// Writes `parts` as a tab separated table with headings, or as a JSON array.
pub fn render(parts: &[Part], out: &mut impl Write, format: OutputFormat) -> Result<(), HandlerError> {
	match format {
		OutputFormat::Table => {
			writeln!(out, "{}", HEADINGS.join(interchange::FIELD_SEPARATOR))?;
			for part in parts {
				let part = Part {
					description: part.description.replace('\n', " "),
					..part.clone()
				};
				writeln!(out, "{}", interchange::serialize(&part))?;
			}
		}
		OutputFormat::Json => {
			serde_json::to_writer_pretty(&mut *out, parts)?;
			writeln!(out)?;
		}
	}

	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Row(#[from] MalformedRow),

	#[error("No part with id {0}")]
	PartNotFound(i64),

	#[error("Refusing to delete part {0} without confirmation")]
	DeleteNotConfirmed(i64),

	#[error("Output error: {0}")]
	Io(#[from] io::Error),

	#[error("JSON serialization error: {0}")]
	Json(#[from] serde_json::Error),
}
