//! Query composition: translating a [`FilterSelection`] into the query
//! description handed to the store, plus the one canonical definition of
//! predicate matching and result ordering that every backend interprets.

use crate::filter::FilterSelection;
use crate::model::{Entity, EntityKind, NeedCategory, ServiceCategory};
use std::cmp::Ordering;

/// A composed filtered query. Each set dimension is an equality predicate;
/// all set dimensions combine with AND. The keyword is an OR of
/// case-insensitive substring predicates over `name` and `description`.
///
/// Fetching by explicit id list is the store's second, independent query
/// mode and deliberately has no representation here: it ignores the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub service_category: Option<ServiceCategory>,
    pub need_category: Option<NeedCategory>,
    pub kind: Option<EntityKind>,
    pub keyword: Option<String>,
}

impl FilterQuery {
    pub fn from_selection(selection: &FilterSelection) -> Self {
        Self {
            service_category: selection.service_category(),
            need_category: selection.need_category(),
            kind: selection.kind(),
            keyword: selection.keyword().map(|s| s.to_string()),
        }
    }

    pub fn matches(&self, entity: &Entity) -> bool {
        if let Some(service) = self.service_category {
            if entity.service_category != service {
                return false;
            }
        }
        if let Some(need) = self.need_category {
            if entity.need_category != need {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entity.kind != kind {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            let needle = keyword.to_lowercase();
            let in_name = entity.name.to_lowercase().contains(&needle);
            let in_description = entity.description.to_lowercase().contains(&needle);
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}

/// The sole ordering contract of filtered queries: `name` ascending, ties
/// broken by store insertion order (`created_at`, then `id`).
pub fn result_order(a: &Entity, b: &Entity) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_results(entities: &mut [Entity]) {
    entities.sort_by(result_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::entity;

    #[test]
    fn empty_query_matches_everything() {
        let q = FilterQuery::default();
        assert!(q.matches(&entity("org-1", "Anything", ServiceCategory::Advocacy)));
    }

    #[test]
    fn set_dimensions_combine_with_and() {
        let mut e = entity("org-1", "Harbor Transit", ServiceCategory::Transportation);
        e.kind = EntityKind::Program;

        let q = FilterQuery {
            service_category: Some(ServiceCategory::Transportation),
            kind: Some(EntityKind::Program),
            ..Default::default()
        };
        assert!(q.matches(&e));

        let q = FilterQuery {
            service_category: Some(ServiceCategory::Transportation),
            kind: Some(EntityKind::Organization),
            ..Default::default()
        };
        assert!(!q.matches(&e));
    }

    #[test]
    fn keyword_is_case_insensitive_over_name_and_description() {
        let mut e = entity("org-1", "Advocacy Alliance", ServiceCategory::Advocacy);
        e.description = "Peer support and legal aid".into();

        let q = FilterQuery {
            keyword: Some("advoc".into()),
            ..Default::default()
        };
        assert!(q.matches(&e));

        let q = FilterQuery {
            keyword: Some("LEGAL AID".into()),
            ..Default::default()
        };
        assert!(q.matches(&e));

        let q = FilterQuery {
            keyword: Some("wheelchair".into()),
            ..Default::default()
        };
        assert!(!q.matches(&e));
    }

    #[test]
    fn results_sort_by_name_then_insertion_order() {
        let mut a = entity("org-2", "Same Name", ServiceCategory::Advocacy);
        let b = entity("org-1", "Same Name", ServiceCategory::Advocacy);
        let c = entity("org-3", "Another", ServiceCategory::Advocacy);
        a.created_at = b.created_at + chrono::Duration::seconds(5);

        let mut list = vec![a.clone(), b.clone(), c.clone()];
        sort_results(&mut list);

        assert_eq!(list[0].id, "org-3"); // "Another" < "Same Name"
        assert_eq!(list[1].id, "org-1"); // earlier created_at wins the tie
        assert_eq!(list[2].id, "org-2");
    }
}
