//! Courses interchangeable for prerequisite purposes.

use std::collections::HashMap;

use indexmap::IndexSet;

use degreeplan_core::{catalog::Catalog, identifier::Id};

/// Splits a raw equivalence string on commas and whitespace.
fn split_equivalents(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// Returns `id` followed by every id it declares as a no-credit equivalent.
///
/// An id missing from the catalog resolves to itself.
pub fn resolve_equivalents(id: Id, catalog: &Catalog) -> IndexSet<Id> {
    let mut set = IndexSet::from([id]);
    if let Some(raw) = catalog.get(id).and_then(|course| course.equivalents()) {
        set.extend(split_equivalents(raw).map(Id::new));
    }
    set
}

/// Equivalence sets of every catalog course, resolved once.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceIndex {
    extra: HashMap<Id, Vec<Id>>,
}

impl EquivalenceIndex {
    pub fn new(catalog: &Catalog) -> Self {
        let extra = catalog
            .iter()
            .filter(|course| course.equivalents().is_some())
            .map(|course| {
                let ids: Vec<Id> = resolve_equivalents(course.id(), catalog)
                    .into_iter()
                    .skip(1)
                    .collect();
                (course.id(), ids)
            })
            .filter(|(_, ids)| !ids.is_empty())
            .collect();
        Self { extra }
    }

    /// `id` followed by its equivalents. Matches [`resolve_equivalents`].
    pub fn equivalents(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        std::iter::once(id).chain(
            self.extra
                .get(&id)
                .into_iter()
                .flatten()
                .copied()
                .filter(move |other| *other != id),
        )
    }
}
