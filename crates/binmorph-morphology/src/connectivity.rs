/// Pixel adjacency used to decide which pixels are neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Pixels sharing an edge are neighbors.
    Four,
    /// Pixels sharing an edge or a corner are neighbors.
    #[default]
    Eight,
}

const FOUR: [[isize; 2]; 4] = [[-1, 0], [0, -1], [0, 1], [1, 0]];

const EIGHT: [[isize; 2]; 8] = [
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

impl Connectivity {
    /// `[row, col]` offsets of the neighbors, excluding the pixel itself.
    pub fn offsets(&self) -> &'static [[isize; 2]] {
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }

    /// The adjacency the background must use so that foreground and background
    /// topologies stay consistent (8 for 4 and 4 for 8).
    pub fn dual(&self) -> Connectivity {
        match self {
            Connectivity::Four => Connectivity::Eight,
            Connectivity::Eight => Connectivity::Four,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Connectivity;

    #[test]
    fn test_offsets() {
        assert_eq!(Connectivity::Four.offsets().len(), 4);
        assert_eq!(Connectivity::Eight.offsets().len(), 8);
        assert!(Connectivity::Eight
            .offsets()
            .iter()
            .all(|&[dr, dc]| (dr, dc) != (0, 0)));
    }

    #[test]
    fn test_dual() {
        assert_eq!(Connectivity::default(), Connectivity::Eight);
        assert_eq!(Connectivity::Eight.dual(), Connectivity::Four);
        assert_eq!(Connectivity::Four.dual().dual(), Connectivity::Four);
    }
}
