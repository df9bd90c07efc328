use std::io::{self, BufRead, Write};

/// Line oriented user interaction.
pub(crate) trait Terminal {
    /// Show `prompt` and read one trimmed line, `None` once input is exhausted.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>>;
    /// Print one line of feedback.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

pub(crate) struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Terminal for Console<R, W> {
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }
}
