use std::io::{self, Write};

/// Groups the digits of `value` in threes for readable iteration counts
#[must_use]
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut buf = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            buf.push(',');
        }
        buf.push(digit);
    }
    buf
}

/// Writes the same bytes to up to two sinks (typically stdout and a results
/// file). `new_from_option` yields `None` when neither sink is configured.
pub struct PairedWriter<A: Write, B: Write> {
    first: Option<A>,
    second: Option<B>,
}

impl<A: Write, B: Write> PairedWriter<A, B> {
    pub fn new_from_option(first: Option<A>, second: Option<B>) -> Option<Self> {
        if first.is_none() && second.is_none() {
            None
        } else {
            Some(Self { first, second })
        }
    }
}

impl<A: Write, B: Write> Write for PairedWriter<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(first) = &mut self.first {
            first.write_all(buf)?;
        }
        if let Some(second) = &mut self.second {
            second.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(first) = &mut self.first {
            first.flush()?;
        }
        if let Some(second) = &mut self.second {
            second.flush()?;
        }
        Ok(())
    }
}

/// Print an error message with a styled "error:" tag
pub fn error(msg: &str) {
    let tag = console::style("error:").bold().red();
    eprintln!("{tag} {msg}", msg = console::style(msg).bold());
}

/// Print a warning message with a styled "warning:" tag
pub fn warning(msg: &str) {
    let tag = console::style("warning:").bold().yellow();
    eprintln!("{tag} {msg}", msg = console::style(msg).bold());
}
