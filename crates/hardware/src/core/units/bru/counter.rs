//! Two-bit saturating counter.

/// State of a two-bit saturating counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Counter {
    /// Predict not taken; two taken outcomes needed to flip.
    StronglyNotTaken,
    /// Predict not taken; one taken outcome flips.
    #[default]
    WeaklyNotTaken,
    /// Predict taken; one not-taken outcome flips.
    WeaklyTaken,
    /// Predict taken; two not-taken outcomes needed to flip.
    StronglyTaken,
}

impl Counter {
    /// Returns the predicted direction.
    #[inline]
    pub const fn taken(self) -> bool {
        matches!(self, Self::WeaklyTaken | Self::StronglyTaken)
    }

    /// Moves one step toward the extreme matching `taken`.
    #[inline]
    pub const fn train(self, taken: bool) -> Self {
        match (self, taken) {
            (Self::StronglyNotTaken, true) => Self::WeaklyNotTaken,
            (Self::WeaklyNotTaken, true) => Self::WeaklyTaken,
            (Self::WeaklyTaken | Self::StronglyTaken, true) => Self::StronglyTaken,
            (Self::StronglyTaken, false) => Self::WeaklyTaken,
            (Self::WeaklyTaken, false) => Self::WeaklyNotTaken,
            (Self::WeaklyNotTaken | Self::StronglyNotTaken, false) => Self::StronglyNotTaken,
        }
    }
}
