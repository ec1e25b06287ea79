//! Genealogy entities: the vampire node record and its arena handle.

use std::fmt;

use generational_arena::Index;

/// Handle to a vampire stored in a [`Genealogy`](crate::domain::Genealogy).
///
/// Equality is identity: two vampires with the same name and year still have
/// different ids. Ids carry the tag of the genealogy that issued them, so an
/// id from another genealogy never resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VampireId {
    pub(crate) genealogy: u64,
    pub(crate) index: Index,
}

impl fmt::Display for VampireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "#{}:{}.{}", self.genealogy, slot, generation)
    }
}

/// Tree node of the genealogy.
#[derive(Debug, Clone)]
pub struct Vampire {
    /// Display name, not unique across a tree
    pub name: String,
    /// Year the vampire was converted
    pub year_converted: i32,
    /// Vampire that converted this one, None for the original vampire
    pub(crate) creator: Option<VampireId>,
    /// Vampires converted by this one, in linking order
    pub(crate) offspring: Vec<VampireId>,
}

impl Vampire {
    pub(crate) fn new(name: impl Into<String>, year_converted: i32) -> Self {
        Self {
            name: name.into(),
            year_converted,
            creator: None,
            offspring: Vec::new(),
        }
    }

    pub fn creator(&self) -> Option<VampireId> {
        self.creator
    }

    pub fn offspring(&self) -> &[VampireId] {
        &self.offspring
    }

    /// Number of vampires directly converted by this one.
    pub fn number_of_offspring(&self) -> usize {
        self.offspring.len()
    }

    pub fn is_original(&self) -> bool {
        self.creator.is_none()
    }
}

impl fmt::Display for Vampire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.year_converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vampire_is_isolated() {
        let vampire = Vampire::new("Ansel", 1800);
        assert!(vampire.is_original());
        assert_eq!(vampire.number_of_offspring(), 0);
        assert_eq!(vampire.to_string(), "Ansel (1800)");
    }
}
