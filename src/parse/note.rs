/// A single tap or hold note of an osu!mania map.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Note {
    /// The column of the note, between `0` and the map's key count (exclusive).
    pub column: usize,
    /// The start time in milliseconds.
    pub start_time: f64,
    /// The end time in milliseconds. Equal to `start_time` for taps.
    pub end_time: f64,
}

impl Note {
    /// Whether the note is a hold note i.e. it has a duration.
    #[inline]
    pub fn is_hold(&self) -> bool {
        self.end_time > self.start_time
    }
}

/// Note data as it appears in the `[HitObjects]` section.
///
/// The column depends on the key count which might be declared
/// after the notes so it is only resolved at the end of parsing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct RawNote {
    x: f64,
    start_time: f64,
    end_time: f64,
}

impl RawNote {
    const FIELD_COUNT: usize = 6;

    /// Parse a line of the form `x,y,time,type,hitsound,end_time:hitsample`.
    ///
    /// Returns `None` for any line that does not have this shape.
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let mut fields = [""; Self::FIELD_COUNT];
        let mut split = line.split(',');

        for field in fields.iter_mut() {
            *field = split.next()?;
        }

        if split.next().is_some() {
            return None;
        }

        let x: f64 = fields[0].trim().parse().ok()?;
        let start_time: f64 = fields[2].trim().parse().ok()?;

        let end_time: f64 = fields[5]
            .split(':')
            .next()
            .map(str::trim)
            .and_then(|end| end.parse().ok())?;

        if !(x.is_finite() && start_time.is_finite() && end_time.is_finite()) {
            return None;
        }

        // taps carry a zero in place of the end time
        let end_time = if end_time == 0.0 {
            start_time
        } else {
            end_time.max(start_time)
        };

        Some(Self {
            x,
            start_time,
            end_time,
        })
    }

    pub(crate) fn into_note(self, key_count: usize) -> Note {
        let keys = key_count as f64;
        let column = (self.x * keys / 512.0).floor().max(0.0) as usize;

        Note {
            column: column.min(key_count - 1),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}
