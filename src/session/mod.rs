//! The scripted demo session.
//!
//! A session seeds the working file from its template if needed, loads it,
//! then walks through a fixed list of steps, showing the collection after
//! each one and pausing for a keypress in between. Changes are only written
//! back once, at the end.
//!
//! Every failure inside the session is logged and the script carries on,
//! falling back to an empty collection when nothing could be loaded. Only
//! console errors abort it.

pub mod console;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::Config;
use crate::document::ops::{render, Outcome};
use crate::document::record::{Collection, Record};
use crate::file::bootstrap::ensure_destination;
use crate::file::format::Format;
use crate::file::loader::load_or_report;
use crate::file::saver::save_or_report;

pub use console::{Console, TermConsole};

const PAUSE_PROMPT: &str = "Press any key to continue . . .";

/// One scripted change to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    UpdateAge { id: i64, age: i64 },
    Insert(Record),
    Delete { id: i64 },
}

impl Step {
    pub fn apply(&self, collection: &mut Collection) -> Outcome {
        match self {
            Step::UpdateAge { id, age } => collection.update_age(*id, *age),
            Step::Insert(record) => collection.insert(record.clone()),
            Step::Delete { id } => collection.remove(*id),
        }
    }
}

/// The fixed demo: raise user 1 to 31, add Pedro (3, 40), remove user 2.
pub fn demo_steps() -> Vec<Step> {
    vec![
        Step::UpdateAge { id: 1, age: 31 },
        Step::Insert(Record::new(3, "Pedro", 40)),
        Step::Delete { id: 2 },
    ]
}

/// Per-run switches, usually taken from [`Config`] and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub format: Format,
    /// Re-seed the working file even when it loads.
    pub reset: bool,
    pub pause: bool,
    pub clear_screen: bool,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            format: config.format,
            reset: false,
            pause: config.pause_between_steps,
            clear_screen: config.clear_screen,
        }
    }
}

/// What a finished session left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub collection: Collection,
    pub outcomes: Vec<Outcome>,
    pub saved: bool,
}

/// Runs the demo script against the files named in `config`.
pub fn run_session<C: Console + ?Sized>(
    config: &Config,
    options: SessionOptions,
    steps: &[Step],
    console: &mut C,
) -> Result<SessionReport> {
    let format = options.format;
    let (source, destination) = config.paths_for(format);

    if options.clear_screen {
        console.clear()?;
    }

    let bootstrap = ensure_destination(source, destination, format, config, options.reset);
    debug!(?bootstrap, "destination checked");

    let mut collection = load_or_report(destination, format)
        .unwrap_or_else(|| Collection::with_root(config.root_element.as_str()));
    info!(records = collection.len(), format = %format, "session started");

    render(Some(&collection), format, console.out())?;
    wait(console, options)?;

    let mut outcomes = Vec::with_capacity(steps.len());
    for step in steps {
        let outcome = step.apply(&mut collection);
        debug!(?step, ?outcome, "step applied");
        writeln!(console.out(), "{}", outcome)?;
        render(Some(&collection), format, console.out())?;
        wait(console, options)?;
        outcomes.push(outcome);
    }

    let saved = save_or_report(destination, &collection, format, config);
    if saved {
        writeln!(console.out(), "Operations completed. File updated.\n")?;
    } else {
        writeln!(
            console.out(),
            "Operations completed, but the file could not be updated.\n"
        )?;
    }
    console.out().flush()?;

    Ok(SessionReport {
        collection,
        outcomes,
        saved,
    })
}

fn wait<C: Console + ?Sized>(console: &mut C, options: SessionOptions) -> Result<()> {
    if options.pause {
        console.pause(PAUSE_PROMPT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_steps_on_sample() {
        let mut users = Collection::new(vec![Record::new(1, "Ana", 30), Record::new(2, "Luis", 25)]);
        let outcomes: Vec<Outcome> = demo_steps().iter().map(|s| s.apply(&mut users)).collect();

        assert!(outcomes.iter().all(Outcome::is_success));
        assert_eq!(
            users.records(),
            &[Record::new(1, "Ana", 31), Record::new(3, "Pedro", 40)]
        );
    }

    #[test]
    fn test_demo_steps_on_empty() {
        let mut users = Collection::default();
        let outcomes: Vec<Outcome> = demo_steps().iter().map(|s| s.apply(&mut users)).collect();

        assert_eq!(outcomes[0], Outcome::NotFound { id: 1 });
        assert_eq!(outcomes[2], Outcome::NotFound { id: 2 });
        assert_eq!(users.records(), &[Record::new(3, "Pedro", 40)]);
    }
}
