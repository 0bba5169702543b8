use super::{ManiaDifficultyAttributes, ManiaPerformanceAttributes, ManiaStars};
use crate::{Beatmap, Mods};

/// Performance calculator on osu!mania maps.
///
/// # Example
///
/// ```
/// use mania_pp::{Beatmap, ManiaPP, Note};
///
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::from_notes(4, 8.0, vec![Note::default()]);
///
/// let pp_result = ManiaPP::new(&map)
///     .mods(64) // DT
///     .score(765_432)
///     .calculate();
///
/// println!("PP: {} | Stars: {:?}", pp_result.pp(), pp_result.stars());
///
/// let next_result = ManiaPP::new(&map)
///     .attributes(pp_result)  // reusing previous results for performance
///     .mods(64)               // has to be the same to reuse attributes
///     .score(950_000)
///     .calculate();
///
/// println!("PP: {} | Stars: {:?}", next_result.pp(), next_result.stars());
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct ManiaPP<'map> {
    map: &'map Beatmap,
    attributes: Option<ManiaDifficultyAttributes>,
    mods: u32,
    score: u32,
}

impl<'map> ManiaPP<'map> {
    /// Create a new performance calculator for osu!mania maps.
    #[inline]
    pub fn new(map: &'map Beatmap) -> Self {
        Self {
            map,
            attributes: None,
            mods: 0,
            score: 1_000_000,
        }
    }

    /// Provide the result of a previous difficulty or performance calculation.
    /// If you already calculated the attributes for the current map-mod combination,
    /// be sure to put them in here so that they don't have to be recalculated.
    #[inline]
    pub fn attributes(mut self, attributes: impl Into<ManiaDifficultyAttributes>) -> Self {
        self.attributes = Some(attributes.into());

        self
    }

    /// Specify mods through their bit values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    #[inline]
    pub fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Specify the score of a play. Defaults to 1,000,000.
    #[inline]
    pub fn score(mut self, score: u32) -> Self {
        self.score = score;

        self
    }

    /// Calculate all performance related values, including pp and stars.
    ///
    /// A map without star rating, i.e. without notes, is worth no pp.
    pub fn calculate(self) -> ManiaPerformanceAttributes {
        let difficulty = self
            .attributes
            .unwrap_or_else(|| ManiaStars::new(self.map).mods(self.mods).calculate());

        let Some(stars) = difficulty.stars else {
            return ManiaPerformanceAttributes {
                difficulty,
                ..Default::default()
            };
        };

        let ez = self.mods.ez();
        let nf = self.mods.nf();
        let ht = self.mods.ht();

        let mut score_rate = 1.0;

        if nf {
            score_rate *= 0.5;
        }

        if ez {
            score_rate *= 0.5;
        }

        if ht {
            score_rate *= 0.5;
        }

        let scaled_score = f64::from(self.score) / score_rate;

        let mut multiplier = 0.8;

        if nf {
            multiplier *= 0.9;
        }

        if ez {
            multiplier *= 0.5;
        }

        let hit_window = 34.0 + 3.0 * (10.0 - self.map.od).clamp(0.0, 10.0);

        let strain_value = compute_strain(scaled_score, stars, difficulty.n_objects);
        let acc_value = compute_accuracy_value(scaled_score, strain_value, hit_window);

        let pp = (strain_value.powf(1.1) + acc_value.powf(1.1)).powf(1.0 / 1.1) * multiplier;

        ManiaPerformanceAttributes {
            difficulty,
            pp,
            pp_acc: acc_value,
            pp_strain: strain_value,
        }
    }
}

fn compute_strain(score: f64, stars: f64, n_objects: usize) -> f64 {
    let mut strain_value = (5.0 * (stars / 0.2).max(1.0) - 4.0).powf(2.2) / 135.0;

    strain_value *= 1.0 + 0.1 * (n_objects as f64 / 1500.0).min(1.0);

    if score <= 500_000.0 {
        strain_value = 0.0;
    } else if score <= 600_000.0 {
        strain_value *= (score - 500_000.0) / 100_000.0 * 0.3;
    } else if score <= 700_000.0 {
        strain_value *= 0.3 + (score - 600_000.0) / 100_000.0 * 0.25;
    } else if score <= 800_000.0 {
        strain_value *= 0.55 + (score - 700_000.0) / 100_000.0 * 0.2;
    } else if score <= 900_000.0 {
        strain_value *= 0.75 + (score - 800_000.0) / 100_000.0 * 0.15;
    } else {
        strain_value *= 0.9 + (score - 900_000.0) / 100_000.0 * 0.1;
    }

    strain_value
}

#[inline]
fn compute_accuracy_value(score: f64, strain: f64, hit_window: f64) -> f64 {
    (0.2 - (hit_window - 34.0) * 0.006_667).max(0.0)
        * strain
        * ((score - 960_000.0).max(0.0) / 40_000.0).powf(1.1)
}
