use std::fs::File;
use std::io::{self, prelude::*};

/// Read a file into a mutable buffer
pub struct BufReader {
    reader: io::BufReader<File>,
    line: usize,
}

impl BufReader {
    /// Opens the file from the path into a reader
    pub fn open(path: impl AsRef<std::path::Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = io::BufReader::new(file);

        Ok(Self { reader, line: 0 })
    }

    /// Reads a line from the buffer reader to mutable string
    pub fn read_line<'buf>(&mut self,
                           buffer: &'buf mut String)
                           -> Option<io::Result<(&'buf mut String, usize)>>
    {
        buffer.clear();
        self.line += 1;

        self.reader
            .read_line(buffer)
            .map(|u| if u == 0 { None } else { Some((buffer, u)) })
            .transpose()
    }

    /// The number of the last line read, starting from 1.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Reads everything left in the file into the buffer.
    pub fn read_to_end(&mut self, buffer: &mut String) -> io::Result<usize> {
        buffer.clear();
        self.reader.read_to_string(buffer)
    }
}
