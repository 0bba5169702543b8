use std::cmp::Ordering;

use crate::parse::Note;

pub(crate) const SECTION_LEN: f64 = 400.0;

const INDIVIDUAL_DECAY_BASE: f64 = 0.125;
const OVERALL_DECAY_BASE: f64 = 0.3;
const DECAY_WEIGHT: f64 = 0.9;

const HOLD_FACTOR: f64 = 1.25;

/// Strain of a single note after processing it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct NoteStrain {
    /// Strain of the note's own column.
    individual: f64,
    overall: f64,
}

impl NoteStrain {
    const FIRST: Self = Self {
        individual: 0.0,
        overall: 1.0,
    };

    #[inline]
    fn total(self) -> f64 {
        self.individual + self.overall
    }

    #[inline]
    fn decayed(self, delta_time: f64) -> f64 {
        apply_decay(self.individual, delta_time, INDIVIDUAL_DECAY_BASE)
            + apply_decay(self.overall, delta_time, OVERALL_DECAY_BASE)
    }
}

/// Running state while walking through the notes in order.
pub(crate) struct Strain {
    clock_rate: f64,
    hold_end_times: Vec<f64>,
    individual_strains: Vec<f64>,
    overall_strain: f64,
}

impl Strain {
    pub(crate) fn new(column_count: usize, clock_rate: f64) -> Self {
        Self {
            clock_rate,
            hold_end_times: vec![0.0; column_count],
            individual_strains: vec![0.0; column_count],
            overall_strain: NoteStrain::FIRST.overall,
        }
    }

    /// Strain of `curr` given that `prev` was the previously processed note.
    pub(crate) fn process(&mut self, prev: &Note, curr: &Note) -> NoteStrain {
        let delta_time = (curr.start_time - prev.start_time) / self.clock_rate;

        let mut hold_factor = 1.0;
        let mut hold_addition = 0.0;

        for (hold_end_time, individual_strain) in self
            .hold_end_times
            .iter()
            .zip(self.individual_strains.iter_mut())
        {
            let hold_end_time = *hold_end_time;

            if curr.start_time < hold_end_time && curr.end_time > hold_end_time {
                hold_addition = 1.0;
            } else if curr.end_time == hold_end_time {
                hold_addition = 0.0;
            } else if curr.end_time < hold_end_time {
                hold_factor = HOLD_FACTOR;
            }

            *individual_strain = apply_decay(*individual_strain, delta_time, INDIVIDUAL_DECAY_BASE);
        }

        self.hold_end_times[curr.column] = curr.end_time;
        self.individual_strains[curr.column] += 2.0 * hold_factor;

        self.overall_strain = apply_decay(self.overall_strain, delta_time, OVERALL_DECAY_BASE)
            + (1.0 + hold_addition) * hold_factor;

        NoteStrain {
            individual: self.individual_strains[curr.column],
            overall: self.overall_strain,
        }
    }
}

/// Calculate the strain of every note. The first note always has the same strain
/// and does not count as held.
///
/// `notes` must be sorted by start time.
pub(crate) fn note_strains(notes: &[Note], key_count: usize, clock_rate: f64) -> Vec<NoteStrain> {
    let Some(first) = notes.first() else {
        return Vec::new();
    };

    let column_count = notes
        .iter()
        .map(|note| note.column + 1)
        .max()
        .map_or(key_count, |columns| columns.max(key_count));

    let mut strain = Strain::new(column_count, clock_rate);
    let mut strains = Vec::with_capacity(notes.len());
    strains.push(NoteStrain::FIRST);

    let mut prev = first;

    for curr in notes.iter().skip(1) {
        strains.push(strain.process(prev, curr));
        prev = curr;
    }

    strains
}

/// Collect the highest strain of each section.
///
/// Sections are `SECTION_LEN * clock_rate` long and start at time zero. The section
/// that is still open after the last note does not produce a peak.
///
/// Every section up to the last note produces a peak, including empty ones, so the
/// amount of peaks grows linearly with the start time of the last note.
pub(crate) fn strain_peaks(notes: &[Note], strains: &[NoteStrain], clock_rate: f64) -> Vec<f64> {
    let section_len = SECTION_LEN * clock_rate;
    let mut curr_section_end = section_len;
    let mut current_section_peak = 0.0;
    let mut prev: Option<(&Note, NoteStrain)> = None;

    let mut peaks = Vec::with_capacity(128);

    for (note, &strain) in notes.iter().zip(strains) {
        while note.start_time > curr_section_end {
            peaks.push(current_section_peak);

            current_section_peak = match prev {
                Some((prev_note, prev_strain)) => {
                    prev_strain.decayed(curr_section_end - prev_note.start_time)
                }
                None => 0.0,
            };

            curr_section_end += section_len;
        }

        let total = strain.total();

        if total > current_section_peak {
            current_section_peak = total;
        }

        prev = Some((note, strain));
    }

    peaks
}

/// Weighted sum of the strain peaks, highest first.
pub(crate) fn difficulty_value(strain_peaks: &mut [f64]) -> f64 {
    let mut difficulty = 0.0;
    let mut weight = 1.0;

    strain_peaks.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    for &strain in strain_peaks.iter() {
        difficulty += strain * weight;
        weight *= DECAY_WEIGHT;
    }

    difficulty
}

#[inline]
fn apply_decay(value: f64, delta_time: f64, decay_base: f64) -> f64 {
    value * decay_base.powf(delta_time / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(column: usize, start_time: f64, end_time: f64) -> Note {
        Note {
            column,
            start_time,
            end_time,
        }
    }

    #[test]
    fn first_note_has_base_strain() {
        let notes = [note(2, 100.0, 100.0)];
        let strains = note_strains(&notes, 4, 1.0);

        assert_eq!(strains, [NoteStrain::FIRST]);
        assert!(strain_peaks(&notes, &strains, 1.0).is_empty());
    }

    #[test]
    fn consecutive_taps() {
        let notes = [note(0, 0.0, 0.0), note(0, 500.0, 500.0)];
        let strains = note_strains(&notes, 4, 1.0);

        assert_eq!(strains[1].individual, 2.0);
        assert_eq!(strains[1].overall, 0.3_f64.powf(0.5) + 1.0);

        let mut peaks = strain_peaks(&notes, &strains, 1.0);

        assert_eq!(peaks, [1.0]);
        assert_eq!(difficulty_value(&mut peaks), 1.0);
    }

    #[test]
    fn tap_inside_hold_is_harder() {
        let notes = [
            note(0, 0.0, 0.0),
            note(0, 100.0, 100.0),
            note(1, 150.0, 1000.0),
            note(0, 200.0, 200.0),
        ];
        let strains = note_strains(&notes, 2, 1.0);
        let decay = 0.125_f64.powf(0.05);

        assert_eq!(strains[1].individual, 2.0);
        // the tap ends before the hold in column 1 does
        assert_eq!(strains[3].individual, 2.0 * decay * decay + 2.0 * HOLD_FACTOR);
    }

    #[test]
    fn hold_overlapping_hold_end() {
        let notes = [
            note(0, 0.0, 0.0),
            note(0, 100.0, 500.0),
            note(1, 300.0, 900.0),
        ];
        let strains = note_strains(&notes, 2, 1.0);
        let overall = strains[1].overall * 0.3_f64.powf(0.2) + 2.0;

        assert_eq!(strains[2].overall, overall);
    }

    #[test]
    fn section_len_scales_with_clock_rate() {
        let notes = [
            note(0, 0.0, 0.0),
            note(0, 350.0, 350.0),
            note(0, 700.0, 700.0),
        ];

        for (clock_rate, n_peaks) in [(1.0, 1), (1.5, 1), (0.75, 2)] {
            let strains = note_strains(&notes, 1, clock_rate);
            let peaks = strain_peaks(&notes, &strains, clock_rate);

            assert_eq!(peaks.len(), n_peaks, "clock rate {clock_rate}");
        }
    }

    #[test]
    fn empty_sections_decay() {
        let notes = [note(0, 0.0, 0.0), note(0, 1000.0, 1000.0)];
        let strains = note_strains(&notes, 1, 1.0);
        let peaks = strain_peaks(&notes, &strains, 1.0);

        assert_eq!(peaks, [1.0, 0.3_f64.powf(0.4)]);
    }

    #[test]
    fn long_gaps_fill_every_section() {
        let notes = [note(0, 0.0, 0.0), note(0, 3_600_000.0, 3_600_000.0)];
        let strains = note_strains(&notes, 1, 1.0);
        let mut peaks = strain_peaks(&notes, &strains, 1.0);

        assert_eq!(peaks.len(), 8999);
        assert_eq!(peaks[0], 1.0);
        assert_eq!(peaks[8998], 0.0);

        let with_gap = difficulty_value(&mut peaks);
        let mut without_gap = strain_peaks(&notes[..1], &strains[..1], 1.0);

        assert!(without_gap.is_empty());
        assert!(with_gap > difficulty_value(&mut without_gap));
    }

    #[test]
    fn difficulty_weights_highest_first() {
        let mut peaks = [1.0, 3.0, 2.0];

        assert_eq!(difficulty_value(&mut peaks), 3.0 + 2.0 * 0.9 + 1.0 * 0.9 * 0.9);
    }
}
