//! Human-readable sizes and the live progress line.

use std::io::{self, IsTerminal, Write};

const UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Format bytes into a human-readable size using binary units.
///
/// ```
/// use gdrive_download::format_size;
///
/// assert_eq!(format_size(0), "0.0 B");
/// assert_eq!(format_size(1536), "1.5 KiB");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut num = bytes as f64;
    for unit in UNITS {
        if num.abs() < 1024.0 {
            return format!("{:.1} {}B", num, unit);
        }
        num /= 1024.0;
    }
    format!("{:.1} YiB", num)
}

/// Writes the cumulative download size, either rewriting one line in place
/// or appending a line per update.
pub struct ProgressLine<W: Write> {
    out: W,
    in_place: bool,
}

impl ProgressLine<io::Stderr> {
    /// Progress on stderr, in place only when stderr is a terminal.
    pub fn stderr() -> Self {
        let out = io::stderr();
        let in_place = out.is_terminal();
        Self::new(out, in_place)
    }
}

impl<W: Write> ProgressLine<W> {
    pub fn new(out: W, in_place: bool) -> Self {
        Self { out, in_place }
    }

    pub fn update(&mut self, total: u64) -> io::Result<()> {
        if self.in_place {
            write!(self.out, "\r{}  ", format_size(total))?;
        } else {
            writeln!(self.out, "{}", format_size(total))?;
        }
        self.out.flush()
    }

    /// End the in-place line so later output starts on a fresh one.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.in_place {
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
