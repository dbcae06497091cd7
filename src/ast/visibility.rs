//! Visibility of a top-level declaration.
//!
//! The source spec models public declarations as a parallel family of
//! `Pub*` statement variants (one per kind). We fold that into a single
//! `Visibility` field on each declaration payload instead of doubling the
//! enum surface — see DESIGN.md for the rationale.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}
