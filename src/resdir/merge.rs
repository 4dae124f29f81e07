use crate::model::{Entity, EntityId};
use crate::overrides::OverrideSets;
use std::collections::HashSet;

/// Combines the pinned-entity fetch and the filtered fetch into one
/// deduplicated, ordered list.
///
/// The pinned segment keeps its fetch order and always comes first,
/// whether or not those entities satisfy the active filter. The filtered
/// segment keeps the store's name ordering, minus any id that is hidden or
/// pinned — a pinned entity is never duplicated into the filtered segment,
/// and a hidden id that is also pinned still appears via the pinned
/// segment. No id occurs twice in the output.
pub fn merge_segments(
    pinned: Vec<Entity>,
    filtered: Vec<Entity>,
    overrides: &OverrideSets,
) -> Vec<Entity> {
    let mut seen: HashSet<EntityId> = HashSet::new();
    let mut merged = Vec::with_capacity(pinned.len() + filtered.len());

    for entity in pinned {
        if seen.insert(entity.id.clone()) {
            merged.push(entity);
        }
    }

    for entity in filtered {
        if overrides.is_hidden(&entity.id) || overrides.is_pinned(&entity.id) {
            continue;
        }
        if seen.insert(entity.id.clone()) {
            merged.push(entity);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceCategory;
    use crate::store::memory::fixtures::entity;

    #[test]
    fn pinned_precede_filtered_regardless_of_name_order() {
        let mut o = OverrideSets::new();
        o.pin("org-42");

        let pinned = vec![entity("org-42", "Zenith Counseling", ServiceCategory::Counseling)];
        let filtered = vec![
            entity("org-1", "Access Transit", ServiceCategory::Transportation),
            entity("org-2", "Bay Rides", ServiceCategory::Transportation),
        ];

        let merged = merge_segments(pinned, filtered, &o);
        assert_eq!(merged[0].id, "org-42");
        assert_eq!(merged[1].id, "org-1");
        assert_eq!(merged[2].id, "org-2");
    }

    #[test]
    fn pinned_entity_is_not_duplicated_from_the_filtered_segment() {
        let mut o = OverrideSets::new();
        o.pin("org-1");

        let pinned = vec![entity("org-1", "Access Transit", ServiceCategory::Transportation)];
        let filtered = vec![
            entity("org-1", "Access Transit", ServiceCategory::Transportation),
            entity("org-2", "Bay Rides", ServiceCategory::Transportation),
        ];

        let merged = merge_segments(pinned, filtered, &o);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "org-1");
        assert_eq!(merged[1].id, "org-2");
    }

    #[test]
    fn hidden_ids_are_removed_from_the_filtered_segment_only() {
        let mut o = OverrideSets::new();
        o.pin("org-1");
        o.hide("org-1");
        o.hide("org-2");

        let pinned = vec![entity("org-1", "Access Transit", ServiceCategory::Transportation)];
        let filtered = vec![
            entity("org-2", "Bay Rides", ServiceCategory::Transportation),
            entity("org-3", "City Vans", ServiceCategory::Transportation),
        ];

        let merged = merge_segments(pinned, filtered, &o);
        let ids: Vec<&str> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["org-1", "org-3"]);
    }

    #[test]
    fn duplicate_ids_within_a_segment_are_collapsed() {
        let o = OverrideSets::new();
        let filtered = vec![
            entity("org-1", "Access Transit", ServiceCategory::Transportation),
            entity("org-1", "Access Transit", ServiceCategory::Transportation),
        ];

        let merged = merge_segments(Vec::new(), filtered, &o);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn empty_segments_merge_to_empty() {
        let merged = merge_segments(Vec::new(), Vec::new(), &OverrideSets::new());
        assert!(merged.is_empty());
    }
}
