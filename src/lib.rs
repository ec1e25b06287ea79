//! Vampire genealogy: an arena-backed tree recording who converted whom.
//!
//! ```
//! use vampire_genealogy::domain::Genealogy;
//!
//! let mut genealogy = Genealogy::new();
//! let ansel = genealogy.add_vampire("Ansel", 1800);
//! let sarah = genealogy.add_vampire("Sarah", 1850);
//! genealogy.add_offspring(ansel, sarah)?;
//!
//! assert_eq!(genealogy.closest_common_ancestor(ansel, sarah)?, ansel);
//! # Ok::<(), vampire_genealogy::domain::DomainError>(())
//! ```

pub mod config;
pub mod domain;
pub mod util;
