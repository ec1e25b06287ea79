//! Domain layer: genealogy entities, the arena and its queries
//!
//! This layer performs no I/O. It reads an already loaded
//! [`Settings`](crate::config::Settings) for the millennial threshold and
//! rendering labels; loading settings lives in [`crate::config`].

pub mod arena;
pub mod entities;
pub mod error;
pub mod render;

pub use arena::{Ancestors, Genealogy, PreOrder};
pub use entities::{Vampire, VampireId};
pub use error::{DomainError, DomainResult};
pub use render::GenealogyRender;
