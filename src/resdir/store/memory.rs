use super::DirectoryStore;
use crate::error::Result;
use crate::model::{CatalogStats, Entity, EntityDraft, EntityId};
use crate::query::{sort_results, FilterQuery};
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

/// In-memory catalog for tests and fixtures. Insertion order is the
/// store's natural order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entities: Vec<Entity>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entity as-is, keeping its id and timestamp. Intended for
    /// fixtures; production inserts go through [`DirectoryStore::insert`].
    pub fn seed(&mut self, entity: Entity) {
        self.entities.push(entity);
    }
}

impl DirectoryStore for InMemoryStore {
    fn search(&self, query: &FilterQuery) -> Result<Vec<Entity>> {
        let mut matches: Vec<Entity> = self
            .entities
            .iter()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        sort_results(&mut matches);
        Ok(matches)
    }

    fn fetch_by_ids(&self, ids: &[EntityId]) -> Result<Vec<Entity>> {
        Ok(self
            .entities
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    fn insert(&mut self, draft: EntityDraft) -> Result<Entity> {
        let entity = Entity {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            website: draft.website,
            phone: draft.phone,
            email: draft.email,
            location_zip: draft.location_zip,
            service_category: draft.service_category,
            need_category: draft.need_category,
            kind: draft.kind,
            created_at: Utc::now(),
        };
        self.entities.push(entity.clone());
        Ok(entity)
    }

    fn stats(&self) -> Result<CatalogStats> {
        Ok(catalog_stats(&self.entities))
    }
}

/// Distinct-count statistics shared by the store backends.
pub(crate) fn catalog_stats(entities: &[Entity]) -> CatalogStats {
    let zip_codes: HashSet<&str> = entities.iter().map(|e| e.location_zip.as_str()).collect();
    let services: HashSet<_> = entities.iter().map(|e| e.service_category).collect();
    CatalogStats {
        zip_codes: zip_codes.len(),
        services: services.len(),
        entities: entities.len(),
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{EntityKind, NeedCategory, ServiceCategory};

    /// A minimal entity with a caller-chosen id, for tests that care about
    /// identity and ordering rather than content.
    pub fn entity(id: &str, name: &str, service: ServiceCategory) -> Entity {
        Entity {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} services", name),
            website: Some(format!("https://{}.example.org", id)),
            phone: None,
            email: None,
            location_zip: "02115".to_string(),
            service_category: service,
            need_category: NeedCategory::MobilityImpairment,
            kind: EntityKind::Organization,
            created_at: Utc::now(),
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_entity(mut self, seeded: Entity) -> Self {
            self.store.seed(seeded);
            self
        }

        pub fn with_org(self, id: &str, name: &str, service: ServiceCategory) -> Self {
            self.with_entity(entity(id, name, service))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{entity, StoreFixture};
    use super::*;
    use crate::model::ServiceCategory;

    #[test]
    fn search_filters_and_sorts_by_name() {
        let fixture = StoreFixture::new()
            .with_org("org-2", "Bay Rides", ServiceCategory::Transportation)
            .with_org("org-1", "Access Transit", ServiceCategory::Transportation)
            .with_org("org-3", "Zenith Counseling", ServiceCategory::Counseling);

        let query = FilterQuery {
            service_category: Some(ServiceCategory::Transportation),
            ..Default::default()
        };
        let results = fixture.store.search(&query).unwrap();
        let names: Vec<&str> = results.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Access Transit", "Bay Rides"]);
    }

    #[test]
    fn fetch_by_ids_preserves_insertion_order_and_skips_unknown() {
        let fixture = StoreFixture::new()
            .with_org("org-2", "Bay Rides", ServiceCategory::Transportation)
            .with_org("org-1", "Access Transit", ServiceCategory::Transportation);

        let ids = vec!["org-1".to_string(), "org-404".to_string(), "org-2".to_string()];
        let results = fixture.store.fetch_by_ids(&ids).unwrap();
        let found: Vec<&str> = results.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(found, ["org-2", "org-1"]);
    }

    #[test]
    fn insert_assigns_id_and_timestamp() {
        let mut store = InMemoryStore::new();
        let draft = EntityDraft {
            name: "Harbor Transit".into(),
            description: "Accessible rides".into(),
            website: None,
            phone: None,
            email: None,
            location_zip: "02115".into(),
            service_category: ServiceCategory::Transportation,
            need_category: crate::model::NeedCategory::MobilityImpairment,
            kind: crate::model::EntityKind::Organization,
        };
        let entity = store.insert(draft).unwrap();
        assert!(!entity.id.is_empty());

        let fetched = store.fetch_by_ids(&[entity.id.clone()]).unwrap();
        assert_eq!(fetched.len(), 1);
    }

    #[test]
    fn stats_count_distinct_values() {
        let mut a = entity("org-1", "Access Transit", ServiceCategory::Transportation);
        let mut b = entity("org-2", "Bay Rides", ServiceCategory::Transportation);
        let mut c = entity("org-3", "Zenith Counseling", ServiceCategory::Counseling);
        a.location_zip = "02115".into();
        b.location_zip = "02116".into();
        c.location_zip = "02115".into();

        let fixture = StoreFixture::new()
            .with_entity(a)
            .with_entity(b)
            .with_entity(c);

        let stats = fixture.store.stats().unwrap();
        assert_eq!(stats.zip_codes, 2);
        assert_eq!(stats.services, 2);
        assert_eq!(stats.entities, 3);
    }
}
