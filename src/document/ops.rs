//! In-memory operations on a [`Collection`].
//!
//! None of these touch the disk. Lookups by id scan in order and act on the
//! first match only.

use std::fmt;
use std::io::{self, Write};

use super::record::{Collection, Record};
use crate::file::format::Format;

/// Result of an update, insert or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated { id: i64 },
    Inserted { name: String },
    Removed { id: i64 },
    NotFound { id: i64 },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::NotFound { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Updated { id } => write!(f, "User with ID {} updated.", id),
            Outcome::Inserted { name } => write!(f, "User {} added successfully.", name),
            Outcome::Removed { id } => write!(f, "User with ID {} removed.", id),
            Outcome::NotFound { id } => write!(f, "User with ID {} not found.", id),
        }
    }
}

impl Collection {
    /// Sets the age of the first record with `id`.
    pub fn update_age(&mut self, id: i64, age: i64) -> Outcome {
        match self.records_mut().iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.age = age;
                Outcome::Updated { id }
            }
            None => Outcome::NotFound { id },
        }
    }

    /// Appends `record`. Duplicate ids are accepted.
    pub fn insert(&mut self, record: Record) -> Outcome {
        let name = record.name.clone();
        self.records_mut().push(record);
        Outcome::Inserted { name }
    }

    /// Removes the first record with `id`.
    pub fn remove(&mut self, id: i64) -> Outcome {
        let records = self.records_mut();
        match records.iter().position(|r| r.id == id) {
            Some(index) => {
                records.remove(index);
                Outcome::Removed { id }
            }
            None => Outcome::NotFound { id },
        }
    }
}

/// Writes every record between header and footer markers.
///
/// An absent or empty collection produces a single "no users" line.
pub fn render<W: Write + ?Sized>(
    collection: Option<&Collection>,
    format: Format,
    out: &mut W,
) -> io::Result<()> {
    let records = match collection {
        Some(c) if !c.is_empty() => c.records(),
        _ => {
            writeln!(out, "The {} file contains no users!", format.label())?;
            return Ok(());
        }
    };

    writeln!(out)?;
    writeln!(out, "--- Current {} Contents ---", format.label())?;
    for record in records {
        writeln!(
            out,
            "ID: {}, Name: {}, Age: {}",
            record.id, record.name, record.age
        )?;
    }
    writeln!(out, "--- End of Contents ---")?;
    Ok(())
}
