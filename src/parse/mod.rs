mod error;
mod note;
mod reader;

pub use error::{ParseError, ParseResult};
pub use note::Note;

use note::RawNote;
use reader::FileReader;

use std::cmp::Ordering;

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::{fs::File, io::Read, path::Path};

#[cfg(feature = "async_tokio")]
use {std::path::Path, tokio::fs::File, tokio::io::AsyncRead};

#[cfg(feature = "async_std")]
use async_std::{fs::File, io::Read, path::Path};

macro_rules! log_skipped {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

/// The game mode of a `.osu` file.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq)]
pub enum GameMode {
    #[default]
    Osu = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3,
}

/// A decoded osu!mania map, containing all data relevant
/// for difficulty and performance calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    /// The version of the .osu file.
    pub version: u8,
    /// The amount of keys, i.e. columns.
    pub key_count: usize,
    /// The overall difficulty.
    pub od: f64,
    /// All notes of the map, sorted by their start time.
    pub notes: Vec<Note>,
}

impl Beatmap {
    /// The file format version to which the decoder is aligned.
    pub const LATEST_VERSION: u8 = 14;

    /// Create a map out of already decoded notes.
    ///
    /// Notes are sorted by start time while preserving the given
    /// order of notes that start at the same time.
    pub fn from_notes(key_count: usize, od: f64, mut notes: Vec<Note>) -> Self {
        sort_notes(&mut notes);

        Self {
            version: Self::LATEST_VERSION,
            key_count,
            od,
            notes,
        }
    }

    /// The amount of tap notes.
    pub fn n_taps(&self) -> usize {
        self.notes.len() - self.n_holds()
    }

    /// The amount of hold notes.
    pub fn n_holds(&self) -> usize {
        self.notes.iter().filter(|note| note.is_hold()).count()
    }
}

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
impl Beatmap {
    /// Parse a map from the content of a `.osu` file.
    ///
    /// Fails for maps of any mode other than osu!mania, see
    /// [`ParseError::UnsupportedMode`].
    pub fn parse<R: Read>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);

        loop {
            if reader.next_line()? == 0 {
                return Err(ParseError::IncorrectFileHeader);
            }

            if !reader.is_initial_empty_line() {
                break;
            }
        }

        let version = reader.version().ok_or(ParseError::IncorrectFileHeader)?;
        let mut builder = BeatmapBuilder::new();

        while reader.next_line()? != 0 {
            builder.process_line(reader.get_line())?;
        }

        builder.build(version)
    }

    /// Read and parse the `.osu` file at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        Self::parse(File::open(path)?)
    }
}

#[cfg(feature = "async_tokio")]
impl Beatmap {
    /// Parse a map from the content of a `.osu` file.
    ///
    /// Fails for maps of any mode other than osu!mania, see
    /// [`ParseError::UnsupportedMode`].
    pub async fn parse<R: AsyncRead + Unpin>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);

        loop {
            if reader.next_line().await? == 0 {
                return Err(ParseError::IncorrectFileHeader);
            }

            if !reader.is_initial_empty_line() {
                break;
            }
        }

        let version = reader.version().ok_or(ParseError::IncorrectFileHeader)?;
        let mut builder = BeatmapBuilder::new();

        while reader.next_line().await? != 0 {
            builder.process_line(reader.get_line())?;
        }

        builder.build(version)
    }

    /// Read and parse the `.osu` file at the given path.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        Self::parse(File::open(path).await?).await
    }
}

#[cfg(feature = "async_std")]
impl Beatmap {
    /// Parse a map from the content of a `.osu` file.
    ///
    /// Fails for maps of any mode other than osu!mania, see
    /// [`ParseError::UnsupportedMode`].
    pub async fn parse<R: Read + Unpin>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);

        loop {
            if reader.next_line().await? == 0 {
                return Err(ParseError::IncorrectFileHeader);
            }

            if !reader.is_initial_empty_line() {
                break;
            }
        }

        let version = reader.version().ok_or(ParseError::IncorrectFileHeader)?;
        let mut builder = BeatmapBuilder::new();

        while reader.next_line().await? != 0 {
            builder.process_line(reader.get_line())?;
        }

        builder.build(version)
    }

    /// Read and parse the `.osu` file at the given path.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        Self::parse(File::open(path).await?).await
    }
}

/// Stable sort by start time.
pub(crate) fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(Ordering::Equal)
    });
}

pub(crate) fn is_sorted(notes: &[Note]) -> bool {
    notes
        .windows(2)
        .all(|pair| pair[0].start_time <= pair[1].start_time)
}

/// Collects the relevant content of a `.osu` file line by line.
struct BeatmapBuilder {
    section: Section,
    key_count: Option<f64>,
    od: Option<f64>,
    raw_notes: Vec<RawNote>,
}

impl BeatmapBuilder {
    const MAX_KEYS: f64 = 18.0;

    fn new() -> Self {
        Self {
            section: Section::None,
            key_count: None,
            od: None,
            raw_notes: Vec::with_capacity(256),
        }
    }

    fn process_line(&mut self, line: Option<&str>) -> ParseResult<()> {
        let line = match line {
            Some(line) if !line.is_empty() => line,
            Some(_) => return Ok(()),
            None => {
                log_skipped!("skipping line that is no valid UTF-8");

                return Ok(());
            }
        };

        if line.starts_with('[') && line.ends_with(']') {
            self.section = Section::from_str(&line[1..line.len() - 1]);

            return Ok(());
        }

        match self.section {
            Section::General => {
                let Some((key, value)) = split_colon(line) else {
                    log_skipped!(line, "skipping [General] line without colon");

                    return Ok(());
                };

                if key == "Mode" {
                    match value {
                        "3" => {}
                        "0" => return Err(ParseError::UnsupportedMode(GameMode::Osu)),
                        "1" => return Err(ParseError::UnsupportedMode(GameMode::Taiko)),
                        "2" => return Err(ParseError::UnsupportedMode(GameMode::Catch)),
                        _ => return Err(ParseError::InvalidMode),
                    }
                }
            }
            Section::Difficulty => {
                let Some((key, value)) = split_colon(line) else {
                    log_skipped!(line, "skipping [Difficulty] line without colon");

                    return Ok(());
                };

                match key {
                    "CircleSize" => self.key_count = Some(value.parse()?),
                    "OverallDifficulty" => self.od = Some(value.parse()?),
                    _ => {}
                }
            }
            Section::HitObjects => match RawNote::parse(line) {
                Some(note) => self.raw_notes.push(note),
                None => log_skipped!(line, "skipping malformed note"),
            },
            Section::None => {}
        }

        Ok(())
    }

    fn build(self, version: u8) -> ParseResult<Beatmap> {
        let key_count = self
            .key_count
            .ok_or(ParseError::MissingField("CircleSize"))?;

        let od = self
            .od
            .ok_or(ParseError::MissingField("OverallDifficulty"))?;

        let rounded_keys = key_count.round();

        if !(1.0..=Self::MAX_KEYS).contains(&rounded_keys) {
            return Err(ParseError::InvalidKeyCount(key_count));
        }

        let key_count = rounded_keys as usize;

        let mut notes: Vec<_> = self
            .raw_notes
            .into_iter()
            .map(|note| note.into_note(key_count))
            .collect();

        sort_notes(&mut notes);

        Ok(Beatmap {
            version,
            key_count,
            od,
            notes,
        })
    }
}

#[inline]
fn split_colon(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;

    Some((key.trim(), value.trim()))
}

#[derive(Copy, Clone, Debug)]
enum Section {
    None,
    General,
    Difficulty,
    HitObjects,
}

impl Section {
    #[inline]
    fn from_str(s: &str) -> Self {
        match s {
            "General" => Self::General,
            "Difficulty" => Self::Difficulty,
            "HitObjects" => Self::HitObjects,
            _ => Self::None,
        }
    }
}

#[cfg(all(test, not(any(feature = "async_std", feature = "async_tokio"))))]
mod tests {
    use super::*;

    const HEADER: &str = "osu file format v14\n\n[General]\nMode: 3\n\n";

    fn parse(body: &str) -> ParseResult<Beatmap> {
        Beatmap::parse(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn notes_are_sorted_stably() {
        let map = parse(
            "[Difficulty]\nCircleSize:4\nOverallDifficulty:8\n\n[HitObjects]\n\
             64,192,2000,1,0,0:0:0:0:\n\
             448,192,1000,1,0,0:0:0:0:\n\
             64,192,1000,128,0,1500:0:0:0:0:\n\
             320,192,1000,1,0,0:0:0:0:\n",
        )
        .unwrap();

        let columns: Vec<_> = map.notes.iter().map(|note| note.column).collect();

        assert_eq!(columns, [3, 0, 2, 0]);
        assert_eq!(map.n_holds(), 1);
        assert_eq!(map.n_taps(), 3);
    }

    #[test]
    fn difficulty_after_notes() {
        let map = parse(
            "[HitObjects]\n448,192,1000,1,0,0:0:0:0:\n\n\
             [Difficulty]\nOverallDifficulty:7.5\nCircleSize:7\n",
        )
        .unwrap();

        assert_eq!(map.key_count, 7);
        assert_eq!(map.od, 7.5);
        assert_eq!(map.notes[0].column, 6);
    }

    #[test]
    fn rejects_other_modes() {
        let content = "osu file format v14\n[General]\nMode: 1\n";

        assert!(matches!(
            Beatmap::parse(content.as_bytes()),
            Err(ParseError::UnsupportedMode(GameMode::Taiko))
        ));

        let content = "osu file format v14\n[General]\nMode: 9\n";

        assert!(matches!(
            Beatmap::parse(content.as_bytes()),
            Err(ParseError::InvalidMode)
        ));
    }

    #[test]
    fn missing_difficulty_fields() {
        assert!(matches!(
            parse("[Difficulty]\nOverallDifficulty:8\n"),
            Err(ParseError::MissingField("CircleSize"))
        ));

        assert!(matches!(
            parse("[Difficulty]\nCircleSize:4\n"),
            Err(ParseError::MissingField("OverallDifficulty"))
        ));
    }

    #[test]
    fn invalid_key_count() {
        assert!(matches!(
            parse("[Difficulty]\nCircleSize:0\nOverallDifficulty:8\n"),
            Err(ParseError::InvalidKeyCount(_))
        ));

        assert!(matches!(
            parse("[Difficulty]\nCircleSize:four\nOverallDifficulty:8\n"),
            Err(ParseError::InvalidDecimalNumber(_))
        ));
    }

    #[test]
    fn incorrect_header() {
        assert!(matches!(
            Beatmap::parse(&b"[General]\nMode: 3\n"[..]),
            Err(ParseError::IncorrectFileHeader)
        ));

        assert!(matches!(
            Beatmap::parse(&b"\n\r\n"[..]),
            Err(ParseError::IncorrectFileHeader)
        ));
    }

    #[test]
    fn from_notes_sorts() {
        let notes = vec![
            Note {
                column: 1,
                start_time: 300.0,
                end_time: 300.0,
            },
            Note {
                column: 0,
                start_time: 100.0,
                end_time: 100.0,
            },
        ];

        let map = Beatmap::from_notes(2, 5.0, notes);

        assert!(is_sorted(&map.notes));
        assert_eq!(map.notes[0].column, 0);
    }
}
