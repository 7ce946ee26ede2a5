//! Life-domain catalog.
//!
//! # Responsibility
//! - Define the fixed, ordered set of wheel domains.
//! - Resolve domain references by slug.
//!
//! # Invariants
//! - Exactly `DOMAIN_COUNT` domains exist, in a fixed order.
//! - Slugs are unique and never change after definition.
//! - `order` of every domain equals its catalog position.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of wheel segments, one per domain.
pub const DOMAIN_COUNT: usize = 12;

/// One life area of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Domain {
    /// Stable identifier referenced by `Task::domain_slug`.
    pub slug: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Catalog position, `0..DOMAIN_COUNT`.
    pub order: u8,
    /// Color hue in degrees.
    pub hue: u16,
}

const DOMAINS: [Domain; DOMAIN_COUNT] = [
    domain("career", "Career", 0),
    domain("finances", "Finances", 1),
    domain("health", "Health", 2),
    domain("fitness", "Fitness", 3),
    domain("relationships", "Relationships", 4),
    domain("family", "Family", 5),
    domain("social", "Social Life", 6),
    domain("growth", "Personal Growth", 7),
    domain("recreation", "Fun & Recreation", 8),
    domain("home", "Home & Environment", 9),
    domain("spirituality", "Spirituality", 10),
    domain("contribution", "Contribution", 11),
];

const fn domain(slug: &'static str, label: &'static str, order: u8) -> Domain {
    Domain {
        slug,
        label,
        order,
        hue: order as u16 * 30,
    }
}

/// Catalog lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(slug) => write!(f, "domain not found: `{slug}`"),
        }
    }
}

impl Error for CatalogError {}

/// Read-only access to the static domain definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainCatalog;

impl DomainCatalog {
    /// Returns all domains in wheel order.
    pub fn all() -> &'static [Domain] {
        &DOMAINS
    }

    /// Resolves one domain by slug.
    ///
    /// # Errors
    /// - Returns `CatalogError::NotFound` for an unknown slug.
    pub fn by_slug(slug: &str) -> Result<&'static Domain, CatalogError> {
        DOMAINS
            .iter()
            .find(|domain| domain.slug == slug)
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    /// Returns whether `slug` names a catalog domain.
    pub fn contains(slug: &str) -> bool {
        Self::position(slug).is_some()
    }

    /// Returns the wheel position (segment index) for `slug`.
    pub fn position(slug: &str) -> Option<usize> {
        DOMAINS.iter().position(|domain| domain.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainCatalog, DOMAIN_COUNT};
    use std::collections::HashSet;

    #[test]
    fn order_matches_catalog_position() {
        for (index, domain) in DomainCatalog::all().iter().enumerate() {
            assert_eq!(usize::from(domain.order), index);
        }
    }

    #[test]
    fn slugs_are_unique() {
        let slugs: HashSet<_> = DomainCatalog::all().iter().map(|d| d.slug).collect();
        assert_eq!(slugs.len(), DOMAIN_COUNT);
    }

    #[test]
    fn hues_are_evenly_spread() {
        let hues: Vec<_> = DomainCatalog::all().iter().map(|d| d.hue).collect();
        assert_eq!(hues[0], 0);
        assert_eq!(hues[11], 330);
    }
}
