//! Terminal access for the scripted session.

use std::fs::File;
use std::io::{self, IsTerminal, Stdin, Stdout, Write};

use anyhow::{Context, Result};
use termion::input::{Keys, TermRead};
use termion::raw::IntoRawMode;

/// Where the session writes its output and waits for the user.
pub trait Console {
    /// Sink for everything the session prints.
    fn out(&mut self) -> &mut dyn Write;

    /// Clears the screen and homes the cursor.
    fn clear(&mut self) -> Result<()>;

    /// Shows `prompt` and blocks until a key is pressed.
    fn pause(&mut self, prompt: &str) -> Result<()>;
}

/// Key source for [`TermConsole`].
///
/// Keeps the keys iterator alive between pauses so buffered input is not lost.
enum KeySource {
    Stdin(Keys<Stdin>),
    /// Reading from /dev/tty (when stdin is not a terminal)
    Tty(Keys<File>),
    /// No keyboard available; pauses return immediately.
    None,
}

/// A [`Console`] on the real terminal, backed by termion.
pub struct TermConsole {
    stdout: Stdout,
    keys: KeySource,
}

impl TermConsole {
    /// Creates a console reading keys from stdin, or from /dev/tty when stdin
    /// is piped. Without either, pauses are skipped.
    pub fn new() -> Self {
        let keys = if io::stdin().is_terminal() {
            KeySource::Stdin(io::stdin().keys())
        } else {
            match File::options().read(true).write(true).open("/dev/tty") {
                Ok(tty) => KeySource::Tty(tty.keys()),
                Err(_) => KeySource::None,
            }
        };

        Self {
            stdout: io::stdout(),
            keys,
        }
    }

    /// Creates a console that never waits for input.
    pub fn non_interactive() -> Self {
        Self {
            stdout: io::stdout(),
            keys: KeySource::None,
        }
    }

    fn read_key(&mut self) -> Result<()> {
        // Raw mode so a single key is enough, restored when `_raw` drops.
        // Redirected stdout has no raw mode; the key then needs Enter.
        let _raw = io::stdout().into_raw_mode().ok();

        let next = match &mut self.keys {
            KeySource::Stdin(keys) => keys.next(),
            KeySource::Tty(keys) => keys.next(),
            KeySource::None => return Ok(()),
        };

        if let Some(key) = next {
            key.context("Failed to read key")?;
        }
        Ok(())
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }

    fn clear(&mut self) -> Result<()> {
        if !self.stdout.is_terminal() {
            return Ok(());
        }
        write!(
            self.stdout,
            "{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1)
        )?;
        self.stdout.flush().context("Failed to clear screen")
    }

    fn pause(&mut self, prompt: &str) -> Result<()> {
        if matches!(self.keys, KeySource::None) {
            return Ok(());
        }

        write!(self.stdout, "{}", prompt)?;
        self.stdout.flush()?;
        self.read_key()?;
        writeln!(self.stdout)?;
        Ok(())
    }
}
