#![cfg_attr(not(feature = "colored"), allow(unused_variables))]

use crate::{Entry, History};
#[cfg(feature = "chrono")]
use chrono::Local;
#[cfg(feature = "colored")]
use colored::Colorize;
use std::fmt::{self, Write};

/// Configurable display formatting for the [`History`].
///
/// Entries are listed newest first, followed by the initial state at index `0`.
///
/// # Examples
/// ```
/// # use rewind::{History, TextBuffer, Write};
/// let mut target = TextBuffer::new();
/// let mut history = History::new();
/// history.execute(&mut target, Write::new("a")).unwrap();
/// history.execute(&mut target, Write::new("b")).unwrap();
/// history.undo(&mut target).unwrap().unwrap();
///
/// let mut display = history.display();
/// display.detailed(false);
/// # #[cfg(feature = "colored")]
/// # display.colored(false);
/// assert_eq!(
///     display.to_string(),
///     "2 write \"b\"\n1 [HEAD] write \"a\"\n0 [SAVED]\n"
/// );
/// ```
pub struct Display<'a, C, S> {
    history: &'a History<C, S>,
    #[cfg(feature = "colored")]
    colored: bool,
    detailed: bool,
    head: bool,
    saved: bool,
}

/// What a piece of output is, used to pick its color.
#[derive(Copy, Clone)]
enum Tone {
    Index,
    Head,
    Saved,
    Bracket,
    Time,
}

impl<C, S> Display<'_, C, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.colored = on;
        self
    }

    /// Show detailed output (on by default).
    ///
    /// Detailed output puts each message on its own indented lines and,
    /// with the `chrono` feature, shows when each entry was last changed.
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.detailed = on;
        self
    }

    /// Show the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.head = on;
        self
    }

    /// Show the saved command (on by default).
    pub fn saved(&mut self, on: bool) -> &mut Self {
        self.saved = on;
        self
    }

    fn paint(&self, f: &mut fmt::Formatter, text: &str, tone: Tone) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            let painted = match tone {
                Tone::Index => text.yellow().bold(),
                Tone::Head => text.cyan().bold(),
                Tone::Saved => text.green().bold(),
                Tone::Bracket | Tone::Time => text.yellow(),
            };
            return write!(f, "{painted}");
        }
        f.write_str(text)
    }

    fn fmt_labels(&self, f: &mut fmt::Formatter, at: usize) -> fmt::Result {
        let mut labels = Vec::with_capacity(2);
        if self.head && at == self.history.head() {
            labels.push(("HEAD", Tone::Head));
        }
        if self.saved && self.history.saved() == Some(at) {
            labels.push(("SAVED", Tone::Saved));
        }
        if labels.is_empty() {
            return Ok(());
        }
        f.write_char(' ')?;
        self.paint(f, "[", Tone::Bracket)?;
        for (i, (label, tone)) in labels.into_iter().enumerate() {
            if i > 0 {
                self.paint(f, ",", Tone::Bracket)?;
                f.write_char(' ')?;
            }
            self.paint(f, label, tone)?;
        }
        self.paint(f, "]", Tone::Bracket)
    }
}

impl<C: fmt::Display, S> Display<'_, C, S> {
    fn fmt_message(&self, f: &mut fmt::Formatter, entry: &Entry<C>) -> fmt::Result {
        let message = entry.to_string();
        if self.detailed {
            for line in message.lines() {
                writeln!(f, "    {}", line.trim())?;
            }
            return Ok(());
        }
        match message.lines().map(str::trim).find(|line| !line.is_empty()) {
            Some(line) => f.write_str(line),
            None => Ok(()),
        }
    }

    fn fmt_line(&self, f: &mut fmt::Formatter, at: usize, entry: Option<&Entry<C>>) -> fmt::Result {
        self.paint(f, &at.to_string(), Tone::Index)?;

        #[cfg(feature = "chrono")]
        if let Some(entry) = entry.filter(|_| self.detailed) {
            let time = entry.updated_at().with_timezone(&Local).format("%H:%M:%S");
            f.write_char(' ')?;
            self.paint(f, &time.to_string(), Tone::Time)?;
        }

        self.fmt_labels(f, at)?;

        match entry {
            Some(entry) if self.detailed => {
                writeln!(f)?;
                self.fmt_message(f, entry)
            }
            Some(entry) => {
                f.write_char(' ')?;
                self.fmt_message(f, entry)?;
                writeln!(f)
            }
            None => writeln!(f),
        }
    }
}

impl<'a, C, S> From<&'a History<C, S>> for Display<'a, C, S> {
    fn from(history: &'a History<C, S>) -> Self {
        Display {
            history,
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
            saved: true,
        }
    }
}

impl<C: fmt::Display, S> fmt::Display for Display<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: Vec<_> = self.history.entries().collect();
        for (i, entry) in entries.into_iter().enumerate().rev() {
            self.fmt_line(f, i + 1, Some(entry))?;
        }
        self.fmt_line(f, 0, None)
    }
}

#[cfg(test)]
mod tests {
    use crate::{History, TextBuffer, Write};

    #[test]
    fn head_and_saved_share_a_label() {
        let mut target = TextBuffer::new();
        let mut history = History::new();
        history.execute(&mut target, Write::new("a")).unwrap();
        history.set_saved(true);
        let mut display = history.display();
        display.detailed(false);
        #[cfg(feature = "colored")]
        display.colored(false);
        assert_eq!(display.to_string(), "1 [HEAD, SAVED] write \"a\"\n0\n");
    }

    #[test]
    fn detailed_indents_messages() {
        let mut target = TextBuffer::new();
        let mut history = History::new();
        history.execute(&mut target, Write::new("a")).unwrap();
        let mut display = history.display();
        display.head(false).saved(false);
        #[cfg(feature = "colored")]
        display.colored(false);
        let output = display.to_string();
        assert!(output.ends_with("\n    write \"a\"\n0\n"));
        assert!(output.starts_with('1'));
    }
}
