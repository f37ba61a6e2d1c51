//! Pad addressing and the active-pad selection.

/// Number of pads a controller pair can expose
pub const PAD_COUNT: usize = 2;

/// One physical pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PadIndex {
    P1 = 0,
    P2 = 1,
}

impl PadIndex {
    /// All pads in index order
    pub const ALL: [Self; PAD_COUNT] = [Self::P1, Self::P2];

    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::P1),
            1 => Some(Self::P2),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The other pad of the pair
    pub const fn other(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }
}

/// Small set of pads, stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PadSet(u8);

impl PadSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b11);

    pub const fn single(pad: PadIndex) -> Self {
        Self(1 << pad as u8)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, pad: PadIndex) -> bool {
        self.0 & (1 << pad as u8) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn insert(&mut self, pad: PadIndex) {
        self.0 |= 1 << pad as u8;
    }

    pub fn remove(&mut self, pad: PadIndex) {
        self.0 &= !(1 << pad as u8);
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self((self.0 | other.0) & Self::ALL.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Lowest-indexed pad in the set
    pub fn first(self) -> Option<PadIndex> {
        self.iter().next()
    }

    /// Iterate pads in index order
    pub fn iter(self) -> impl Iterator<Item = PadIndex> {
        PadIndex::ALL.into_iter().filter(move |pad| self.contains(*pad))
    }
}

impl FromIterator<PadIndex> for PadSet {
    fn from_iter<I: IntoIterator<Item = PadIndex>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for pad in iter {
            set.insert(pad);
        }
        set
    }
}

/// Which pads the user is currently editing
///
/// Owned by the UI and passed into every operation that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePadSelection {
    P1,
    P2,
    #[default]
    Both,
}

impl ActivePadSelection {
    /// Pads an edit should be applied to
    pub const fn targets(self, connected: PadSet) -> PadSet {
        let selected = match self {
            Self::P1 => PadSet::single(PadIndex::P1),
            Self::P2 => PadSet::single(PadIndex::P2),
            Self::Both => PadSet::ALL,
        };
        selected.intersection(connected)
    }

    /// Pad the UI reads from. `Both` reads the lowest connected pad.
    pub fn first(self, connected: PadSet) -> Option<PadIndex> {
        self.targets(connected).first()
    }

    /// Pad whose live sensor data feeds the level meter
    pub const fn meter_pad(self) -> PadIndex {
        match self {
            Self::P2 => PadIndex::P2,
            Self::P1 | Self::Both => PadIndex::P1,
        }
    }
}

impl From<PadIndex> for ActivePadSelection {
    fn from(pad: PadIndex) -> Self {
        match pad {
            PadIndex::P1 => Self::P1,
            PadIndex::P2 => Self::P2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_reads_lowest_connected_pad() {
        let only_p2 = PadSet::single(PadIndex::P2);
        assert_eq!(ActivePadSelection::Both.first(PadSet::ALL), Some(PadIndex::P1));
        assert_eq!(ActivePadSelection::Both.first(only_p2), Some(PadIndex::P2));
        assert_eq!(ActivePadSelection::P1.first(only_p2), None);
    }

    #[test]
    fn targets_are_limited_to_connected_pads() {
        let only_p1 = PadSet::single(PadIndex::P1);
        assert_eq!(ActivePadSelection::Both.targets(only_p1), only_p1);
        assert!(ActivePadSelection::P2.targets(only_p1).is_empty());
        assert_eq!(ActivePadSelection::Both.targets(PadSet::ALL).len(), 2);
    }
}
