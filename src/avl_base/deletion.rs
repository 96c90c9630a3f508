use std::ops;

use bitmask_enum::bitmask;

#[bitmask(u8)]
pub enum DeletionResultFlags {
    Ok = 0,
    NotFound = 1,
    // The removed node had no children.
    Leaf = 2,
    // The removed node was replaced by its only child.
    OneChild = 4,
    // The found node took its predecessor's key and the predecessor's node
    // was removed from the left subtree.
    Predecessor = 8,
    // At least one rotation fired while unwinding.
    Rebalanced = 16,
}

#[derive(Debug)]
pub struct DeletionResult {
    pub flags: DeletionResultFlags,
}

impl DeletionResult {
    pub fn new(flags: DeletionResultFlags) -> Self {
        Self { flags }
    }

    pub fn has(&self, flag: DeletionResultFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn found(&self) -> bool {
        !self.has(DeletionResultFlags::NotFound)
    }
}

impl ops::BitOrAssign<DeletionResultFlags> for DeletionResult {
    fn bitor_assign(&mut self, rhs: DeletionResultFlags) {
        self.flags = self.flags | rhs;
    }
}

#[cfg(test)]
#[test]
fn flags_accumulate() {
    let mut result = DeletionResult::new(DeletionResultFlags::Predecessor);
    result |= DeletionResultFlags::Rebalanced;
    assert!(result.found());
    assert!(result.has(DeletionResultFlags::Predecessor));
    assert!(result.has(DeletionResultFlags::Rebalanced));
    assert!(!result.has(DeletionResultFlags::Leaf));
    assert!(!DeletionResult::new(DeletionResultFlags::NotFound).found());
}
