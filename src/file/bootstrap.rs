//! Seeding the working file from a template.
//!
//! A session reads and writes a destination file. When that file is missing
//! or does not load, it is recreated from a source template: XML templates are
//! copied as-is, JSON templates are parsed and written back out with the
//! configured indentation.

use std::path::Path;

use tracing::{error, info, warn};

use super::format::Format;
use super::loader::{load_collection, parse_collection, read_text};
use super::saver::{save_collection, write_file_atomic};
use crate::config::Config;
use crate::error::StoreError;

/// What [`ensure_destination`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The destination already loaded; nothing was copied.
    Existing,
    /// The destination was (re)created from the source.
    Copied,
    /// A copy was needed but the source could not be used. The destination
    /// was left as it was.
    Failed,
}

/// Copies `source` to `destination`.
///
/// The source must parse as a collection in `format`; a malformed template is
/// never copied. Parent directories of `destination` are created.
///
/// # Errors
///
/// Returns the source's load error ([`StoreError::FileNotFound`],
/// [`StoreError::Parse`], ...) or the destination's write error.
pub fn bootstrap<S, D>(source: S, destination: D, format: Format, config: &Config) -> Result<(), StoreError>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    let source = source.as_ref();
    let destination = destination.as_ref();

    match format {
        Format::Json => {
            let collection = load_collection(source, format)?;
            save_collection(destination, &collection, format, config)?;
        }
        Format::Xml => {
            let content = read_text(source)?;
            parse_collection(&content, format).map_err(|message| StoreError::parse(source, message))?;
            write_file_atomic(destination, content.as_bytes())?;
        }
    }
    Ok(())
}

/// Makes sure `destination` holds a loadable collection.
///
/// The source is copied over when the destination is missing, fails to
/// load, or `force` is set. Failures are logged, never returned.
pub fn ensure_destination<S, D>(
    source: S,
    destination: D,
    format: Format,
    config: &Config,
    force: bool,
) -> BootstrapOutcome
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    let source = source.as_ref();
    let destination = destination.as_ref();

    if !force {
        match load_collection(destination, format) {
            Ok(_) => return BootstrapOutcome::Existing,
            Err(StoreError::FileNotFound { .. }) => {
                info!(path = %destination.display(), "destination missing, initializing from template");
            }
            Err(err) => {
                warn!("destination unusable, initializing from template: {}", err);
            }
        }
    }

    match bootstrap(source, destination, format, config) {
        Ok(()) => {
            info!(
                source = %source.display(),
                destination = %destination.display(),
                "data initialized from template"
            );
            BootstrapOutcome::Copied
        }
        Err(err) => {
            error!("could not initialize data, nothing was copied: {}", err);
            BootstrapOutcome::Failed
        }
    }
}
