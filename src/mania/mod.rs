mod pp;
mod strain;

pub use pp::*;

use std::borrow::Cow;

use crate::{
    parse::{is_sorted, sort_notes},
    Beatmap, Mods, Strains,
};

use self::strain::SECTION_LEN;

const STAR_SCALING_FACTOR: f64 = 0.018;

/// Difficulty calculator on osu!mania maps.
///
/// # Example
///
/// ```
/// use mania_pp::{Beatmap, ManiaStars, Note};
///
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::from_notes(4, 8.0, vec![Note::default()]);
///
/// let difficulty_attrs = ManiaStars::new(&map)
///     .mods(64) // DT
///     .calculate();
///
/// println!("Stars: {:?}", difficulty_attrs.stars());
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct ManiaStars<'map> {
    map: &'map Beatmap,
    mods: u32,
}

impl<'map> ManiaStars<'map> {
    /// Create a new difficulty calculator for osu!mania maps.
    #[inline]
    pub fn new(map: &'map Beatmap) -> Self {
        Self { map, mods: 0 }
    }

    /// Specify mods through their bit values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    #[inline]
    pub fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Calculate all difficulty related values, including stars.
    ///
    /// Maps without notes have no star rating.
    pub fn calculate(self) -> ManiaDifficultyAttributes {
        let n_objects = self.map.notes.len();

        if n_objects == 0 {
            return ManiaDifficultyAttributes {
                stars: None,
                n_objects,
            };
        }

        let mut strains = self.strains();
        let stars = strain::difficulty_value(&mut strains.strains) * STAR_SCALING_FACTOR;

        ManiaDifficultyAttributes {
            stars: Some(stars),
            n_objects,
        }
    }

    /// Calculate the strain peaks of the map's sections instead of
    /// evaluating them into a star rating.
    ///
    /// Suitable to plot the difficulty of a map over time.
    ///
    /// There is one peak for every section up to the last note, so maps whose
    /// notes start very late, e.g. through a corrupt start time, produce
    /// correspondingly many peaks. This also applies to [`calculate`](Self::calculate).
    pub fn strains(self) -> Strains {
        let clock_rate = self.mods.clock_rate();

        let notes = if is_sorted(&self.map.notes) {
            Cow::Borrowed(self.map.notes.as_slice())
        } else {
            let mut notes = self.map.notes.clone();
            sort_notes(&mut notes);

            Cow::Owned(notes)
        };

        let note_strains = strain::note_strains(&notes, self.map.key_count, clock_rate);

        Strains {
            section_length: SECTION_LEN * clock_rate,
            strains: strain::strain_peaks(&notes, &note_strains, clock_rate),
        }
    }
}

impl Beatmap {
    /// Create a difficulty calculator for this map.
    #[inline]
    pub fn stars(&self) -> ManiaStars<'_> {
        ManiaStars::new(self)
    }

    /// Create a performance calculator for this map.
    #[inline]
    pub fn pp(&self) -> ManiaPP<'_> {
        ManiaPP::new(self)
    }
}

/// The result of a difficulty calculation on an osu!mania map.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ManiaDifficultyAttributes {
    /// The final star rating, `None` if the map has no notes.
    pub stars: Option<f64>,
    /// The amount of notes in the map.
    pub n_objects: usize,
}

impl ManiaDifficultyAttributes {
    /// Return the star value.
    #[inline]
    pub fn stars(&self) -> Option<f64> {
        self.stars
    }
}

/// The result of a performance calculation on an osu!mania map.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ManiaPerformanceAttributes {
    /// The difficulty attributes that were used for the performance calculation
    pub difficulty: ManiaDifficultyAttributes,
    /// The final performance points.
    pub pp: f64,
    /// The accuracy portion of the final pp.
    pub pp_acc: f64,
    /// The strain portion of the final pp.
    pub pp_strain: f64,
}

impl ManiaPerformanceAttributes {
    /// Return the star value.
    #[inline]
    pub fn stars(&self) -> Option<f64> {
        self.difficulty.stars
    }

    /// Return the performance point value.
    #[inline]
    pub fn pp(&self) -> f64 {
        self.pp
    }
}

impl From<ManiaPerformanceAttributes> for ManiaDifficultyAttributes {
    #[inline]
    fn from(attributes: ManiaPerformanceAttributes) -> Self {
        attributes.difficulty
    }
}
