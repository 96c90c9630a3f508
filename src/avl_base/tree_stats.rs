/// Counters kept up to date by every mutation of the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub size: usize,
    pub single_rotations: usize,
    pub double_rotations: usize,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotations(&self) -> usize {
        self.single_rotations + 2 * self.double_rotations
    }
}
