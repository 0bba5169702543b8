/// The strain peaks of a map, one for each section.
///
/// Suitable to plot the difficulty of a map over time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strains {
    /// Time in ms inbetween two strains.
    pub section_length: f64,
    /// Highest strain of each section in chronological order.
    pub strains: Vec<f64>,
}

impl Strains {
    /// Returns the number of strain peaks.
    #[inline]
    pub fn len(&self) -> usize {
        self.strains.len()
    }

    /// Whether there are no strain peaks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strains.is_empty()
    }
}
