use std::io::Error as IoError;

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::io::{BufRead, BufReader, Read};

#[cfg(feature = "async_tokio")]
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

#[cfg(feature = "async_std")]
use async_std::io::{prelude::BufReadExt, BufReader, Read};

/// Line-wise reader over `.osu` content that skips comments and blank lines.
pub(crate) struct FileReader<R> {
    buf: Vec<u8>,
    inner: BufReader<R>,
}

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
impl<R: Read> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
        }
    }

    /// Read the next relevant line. Returns `0` at the end of the input.
    pub(crate) fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf)?;

            if !skip_line(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

#[cfg(feature = "async_tokio")]
impl<R: AsyncRead + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
        }
    }

    /// Read the next relevant line. Returns `0` at the end of the input.
    pub(crate) async fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf).await?;

            if !skip_line(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

#[cfg(feature = "async_std")]
impl<R: Read + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
        }
    }

    /// Read the next relevant line. Returns `0` at the end of the input.
    pub(crate) async fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf).await?;

            if !skip_line(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

impl<R> FileReader<R> {
    pub(crate) fn is_initial_empty_line(&self) -> bool {
        let pats: [&[u8]; 5] = [
            &[b' '],
            &[b'\t'],
            &[b'\n'],
            &[b'\r'],
            &[239, 187, 191], // U+FEFF
        ];

        consists_of(&self.buf, pats)
    }

    pub(crate) fn version(&self) -> Option<u8> {
        const OSU_FILE_HEADER: &[u8] = b"osu file format v";

        self.find(OSU_FILE_HEADER)
            .and_then(|i| self.buf.get(i + OSU_FILE_HEADER.len()..))
            .map(|infix| {
                infix
                    .iter()
                    .take_while(|byte| byte.is_ascii_digit())
                    .fold(0_u8, |n, byte| n.saturating_mul(10).saturating_add(byte & 0xF))
            })
    }

    /// The current line with any trailing comment and whitespace removed.
    ///
    /// Returns `None` if the line is no valid UTF-8.
    pub(crate) fn get_line(&self) -> Option<&str> {
        let line = std::str::from_utf8(&self.buf).ok()?;

        let line = match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        };

        Some(line.trim_end())
    }

    fn find(&self, pat: &[u8]) -> Option<usize> {
        self.buf.windows(pat.len()).position(|window| window == pat)
    }
}

fn skip_line(line: &[u8]) -> bool {
    !line.is_empty()
        && (matches!(line[0], b'\n' | b' ' | b'_') || (line.len() >= 2 && &line[..2] == b"//"))
}

/// Check if `src` is a combination of the given patterns.
fn consists_of<const N: usize>(src: &[u8], pats: [&[u8]; N]) -> bool {
    let mut i = 0;

    'outer: while i < src.len() {
        for pat in pats {
            if src[i..].starts_with(pat) {
                i += pat.len();

                continue 'outer;
            }
        }

        return false;
    }

    true
}

#[cfg(all(test, not(any(feature = "async_std", feature = "async_tokio"))))]
mod tests {
    use super::*;

    fn reader(content: &str) -> FileReader<&[u8]> {
        FileReader::new(content.as_bytes())
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let mut reader = reader("// comment\n\n_storyboard\n Indented\nMode: 3\n");

        assert_ne!(reader.next_line().unwrap(), 0);
        assert_eq!(reader.get_line(), Some("Mode: 3"));
        assert_eq!(reader.next_line().unwrap(), 0);
    }

    #[test]
    fn trims_trailing_comment() {
        let mut reader = reader("CircleSize:7 // seven keys\r\n");

        reader.next_line().unwrap();
        assert_eq!(reader.get_line(), Some("CircleSize:7"));
    }

    #[test]
    fn header_version() {
        let mut with_bom = reader("\u{feff}osu file format v14\r\n");

        with_bom.next_line().unwrap();
        assert_eq!(with_bom.version(), Some(14));

        let mut without_version = reader("osu file format\n");

        without_version.next_line().unwrap();
        assert_eq!(without_version.version(), None);
    }

    #[test]
    fn initial_empty_lines() {
        let mut reader = reader("\u{feff} \t\r\nosu file format v7\n");

        reader.next_line().unwrap();
        assert!(reader.is_initial_empty_line());

        reader.next_line().unwrap();
        assert!(!reader.is_initial_empty_line());
    }
}
