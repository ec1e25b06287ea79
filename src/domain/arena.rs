use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace, warn};

use crate::config::Settings;
use crate::domain::entities::{Vampire, VampireId};
use crate::domain::error::{DomainError, DomainResult};

static NEXT_GENEALOGY_TAG: AtomicU64 = AtomicU64::new(0);

/// Arena holding every vampire of one or more genealogy trees.
///
/// Nodes reference each other by [`VampireId`]: the creator link is a plain
/// handle, offspring lists are owned by their node. Dropping the arena drops
/// every vampire.
#[derive(Debug)]
pub struct Genealogy {
    /// Tag stamped into every id issued by this genealogy
    tag: u64,
    /// Arena storage for all vampires
    arena: Arena<Vampire>,
    /// Query settings (millennial threshold, rendering)
    settings: Settings,
}

impl Default for Genealogy {
    fn default() -> Self {
        Self::new()
    }
}

impl Genealogy {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            tag: NEXT_GENEALOGY_TAG.fetch_add(1, Ordering::Relaxed),
            arena: Arena::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Creates an isolated vampire with no creator and no offspring.
    pub fn add_vampire(&mut self, name: impl Into<String>, year_converted: i32) -> VampireId {
        let index = self.arena.insert(Vampire::new(name, year_converted));
        let id = self.id_for(index);
        trace!(%id, "added vampire");
        id
    }

    fn id_for(&self, index: Index) -> VampireId {
        VampireId {
            genealogy: self.tag,
            index,
        }
    }

    /// Looks up a vampire; ids issued by another genealogy are unknown here.
    pub fn vampire(&self, id: VampireId) -> DomainResult<&Vampire> {
        if id.genealogy != self.tag {
            return Err(DomainError::UnknownVampire(id));
        }
        self.arena.get(id.index).ok_or(DomainError::UnknownVampire(id))
    }

    fn vampire_mut(&mut self, id: VampireId) -> DomainResult<&mut Vampire> {
        if id.genealogy != self.tag {
            return Err(DomainError::UnknownVampire(id));
        }
        self.arena.get_mut(id.index).ok_or(DomainError::UnknownVampire(id))
    }

    pub fn creator(&self, id: VampireId) -> DomainResult<Option<VampireId>> {
        Ok(self.vampire(id)?.creator)
    }

    pub fn offspring(&self, id: VampireId) -> DomainResult<&[VampireId]> {
        Ok(self.vampire(id)?.offspring())
    }

    /// Ids of all original vampires (nodes without a creator).
    pub fn roots(&self) -> impl Iterator<Item = VampireId> + '_ {
        self.arena
            .iter()
            .filter(|(_, vampire)| vampire.is_original())
            .map(|(idx, _)| self.id_for(idx))
    }

    /// Links `child` as offspring of `creator`.
    ///
    /// A vampire is converted only once: linking a child that already has a
    /// creator fails with [`DomainError::InvalidOperation`], linking the root of
    /// the creator's own tree fails with [`DomainError::CycleDetected`]. On
    /// error neither vampire is modified.
    #[instrument(level = "debug", skip(self))]
    pub fn add_offspring(&mut self, creator: VampireId, child: VampireId) -> DomainResult<()> {
        self.vampire(creator)?;
        if creator == child {
            warn!("refusing to link vampire to itself");
            return Err(DomainError::InvalidOperation {
                message: format!("vampire {} cannot convert itself", child),
            });
        }
        if let Some(existing) = self.vampire(child)?.creator {
            warn!(%existing, "vampire already has a creator");
            return Err(DomainError::InvalidOperation {
                message: format!("vampire {} was already converted by {}", child, existing),
            });
        }
        if self.find_root(creator)? == child {
            warn!("link would make vampire its own ancestor");
            return Err(DomainError::CycleDetected(child));
        }

        self.vampire_mut(creator)?.offspring.push(child);
        self.vampire_mut(child)?.creator = Some(creator);
        debug!("linked offspring");
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn number_of_offspring(&self, id: VampireId) -> DomainResult<usize> {
        Ok(self.vampire(id)?.number_of_offspring())
    }

    /// Creators of `id`, from the direct creator up to the original vampire.
    pub fn ancestors(&self, id: VampireId) -> DomainResult<Ancestors<'_>> {
        let next = self.vampire(id)?.creator;
        Ok(Ancestors {
            genealogy: self,
            next,
        })
    }

    /// Number of creator hops between `id` and the original vampire.
    #[instrument(level = "trace", skip(self))]
    pub fn number_of_vampires_from_original(&self, id: VampireId) -> DomainResult<usize> {
        Ok(self.ancestors(id)?.count())
    }

    /// Walks creator links up to the original vampire of the tree holding `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn find_root(&self, id: VampireId) -> DomainResult<VampireId> {
        let mut current = id;
        let mut creator = self.vampire(id)?.creator;
        while let Some(next) = creator {
            current = next;
            creator = self.vampire(current)?.creator;
        }
        Ok(current)
    }

    /// True if `id` is at most as far from the original vampire as `other`.
    /// Equal distance counts as more senior.
    #[instrument(level = "trace", skip(self))]
    pub fn is_more_senior_than(&self, id: VampireId, other: VampireId) -> DomainResult<bool> {
        Ok(self.number_of_vampires_from_original(id)?
            <= self.number_of_vampires_from_original(other)?)
    }

    /// Pre-order traversal of the subtree rooted at `id`, `id` first.
    pub fn iter_from(&self, id: VampireId) -> DomainResult<PreOrder<'_>> {
        self.vampire(id)?;
        Ok(PreOrder {
            genealogy: self,
            stack: vec![id],
        })
    }

    /// First vampire named `name` in pre-order below (and including) `from`.
    #[instrument(level = "debug", skip(self))]
    pub fn vampire_with_name(&self, from: VampireId, name: &str) -> DomainResult<Option<VampireId>> {
        Ok(self
            .iter_from(from)?
            .find(|(_, vampire)| vampire.name == name)
            .map(|(id, _)| id))
    }

    /// Number of vampires below `id`, not counting `id` itself.
    #[instrument(level = "debug", skip(self))]
    pub fn total_descendants(&self, id: VampireId) -> DomainResult<usize> {
        Ok(self.iter_from(id)?.skip(1).count())
    }

    /// Vampires of the whole tree holding `id` converted strictly after
    /// `threshold`, in pre-order from the original vampire.
    #[instrument(level = "debug", skip(self))]
    pub fn collect_converted_after(
        &self,
        id: VampireId,
        threshold: i32,
    ) -> DomainResult<Vec<VampireId>> {
        let root = self.find_root(id)?;
        Ok(self
            .iter_from(root)?
            .filter(|(_, vampire)| vampire.year_converted > threshold)
            .map(|(id, _)| id)
            .collect())
    }

    /// Vampires of the tree holding `id` converted after the configured
    /// millennial year.
    pub fn millennial_vampires(&self, id: VampireId) -> DomainResult<Vec<VampireId>> {
        self.collect_converted_after(id, self.settings.millennial_year)
    }

    /// Closest vampire that is an ancestor of (or equal to) both `id` and `other`.
    ///
    /// If one of them descends from the other, the more senior one is returned.
    /// Vampires from different trees yield [`DomainError::DisjointTrees`].
    #[instrument(level = "debug", skip(self))]
    pub fn closest_common_ancestor(
        &self,
        id: VampireId,
        other: VampireId,
    ) -> DomainResult<VampireId> {
        let vampire = self.vampire(id)?;
        let other_vampire = self.vampire(other)?;
        if self.find_root(id)? != self.find_root(other)? {
            return Err(DomainError::DisjointTrees {
                left: id,
                right: other,
            });
        }

        if other_vampire.is_original() || vampire.creator == Some(other) {
            return Ok(other);
        }
        if vampire.is_original() || id == other || other_vampire.creator == Some(id) {
            return Ok(id);
        }

        let depth = self.number_of_vampires_from_original(id)?;
        let other_depth = self.number_of_vampires_from_original(other)?;

        // Bring both pointers to the same depth. If the raised pointer lands on
        // the other vampire, that vampire is a direct ancestor and the loop
        // below never runs.
        let mut left = id;
        let mut right = other;
        for _ in other_depth..depth {
            left = self.step_up(left, id, other)?;
        }
        for _ in depth..other_depth {
            right = self.step_up(right, id, other)?;
        }

        while left != right {
            left = self.step_up(left, id, other)?;
            right = self.step_up(right, id, other)?;
        }
        trace!(ancestor = %left, "found closest common ancestor");
        Ok(left)
    }

    fn step_up(&self, current: VampireId, left: VampireId, right: VampireId) -> DomainResult<VampireId> {
        self.vampire(current)?
            .creator
            .ok_or(DomainError::DisjointTrees { left, right })
    }
}

/// Iterator over the creators of a vampire, nearest first.
pub struct Ancestors<'a> {
    genealogy: &'a Genealogy,
    next: Option<VampireId>,
}

impl Iterator for Ancestors<'_> {
    type Item = VampireId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self
            .genealogy
            .arena
            .get(current.index)
            .and_then(|vampire| vampire.creator);
        Some(current)
    }
}

/// Stack-based pre-order iterator over a subtree.
pub struct PreOrder<'a> {
    genealogy: &'a Genealogy,
    stack: Vec<VampireId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (VampireId, &'a Vampire);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(vampire) = self.genealogy.arena.get(current.index) {
                // Push offspring in reverse order for left-to-right traversal
                for &child in vampire.offspring.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, vampire));
            }
        }
        None
    }
}
