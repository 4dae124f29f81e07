//! # API Facade
//!
//! A thin facade over the search engine for clients that want synchronous
//! semantics: every mutation runs the supervisor's fetch plan against the
//! store before returning, through the same token-guarded completion path
//! an asynchronous driver would use. The facade does no I/O of its own
//! beyond the store and never touches stdout/stderr — presentation belongs
//! to the client.
//!
//! Generic over [`DirectoryStore`]:
//! - Production: `DirectoryApi<FileStore>`
//! - Testing: `DirectoryApi<InMemoryStore>`

use crate::deeplink::DeepLinkRequest;
use crate::error::Result;
use crate::export::{render_document, write_document};
use crate::filter::FilterSelection;
use crate::model::{CatalogStats, Entity, EntityDraft, EntityId, EntityKind, NeedCategory, ServiceCategory};
use crate::overrides::OverrideSets;
use crate::store::DirectoryStore;
use crate::supervisor::{FetchPlan, SearchState, SearchSupervisor};
use std::io::Write;

pub struct DirectoryApi<S: DirectoryStore> {
    store: S,
    supervisor: SearchSupervisor,
}

impl<S: DirectoryStore> DirectoryApi<S> {
    /// Builds the engine with no filter, no overrides and no deep link.
    pub fn new(store: S) -> Self {
        Self::with_session(
            store,
            FilterSelection::new(),
            OverrideSets::new(),
            DeepLinkRequest::default(),
        )
    }

    /// Builds the engine from an explicit session state and runs the
    /// initial query cycle — a real fetch when a filter dimension is set,
    /// an entity is pinned or the deep link carries a target; settling
    /// into `AwaitingInput` otherwise.
    pub fn with_session(
        store: S,
        filter: FilterSelection,
        overrides: OverrideSets,
        deep_link: DeepLinkRequest,
    ) -> Self {
        let supervisor = SearchSupervisor::new(filter, overrides, deep_link.target);
        let mut api = Self { store, supervisor };
        let plan = api.supervisor.restart();
        api.run_plan(plan);
        api
    }

    pub fn state(&self) -> &SearchState {
        self.supervisor.state()
    }

    pub fn results(&self) -> &[Entity] {
        self.supervisor.results()
    }

    pub fn highlight(&self) -> Option<&str> {
        self.supervisor.highlight()
    }

    pub fn filter(&self) -> &FilterSelection {
        self.supervisor.filter()
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.supervisor.overrides().is_pinned(id)
    }

    pub fn set_service_category(&mut self, value: Option<ServiceCategory>) -> &SearchState {
        let plan = self.supervisor.set_service_category(value);
        self.run_plan(plan)
    }

    pub fn set_need_category(&mut self, value: Option<NeedCategory>) -> &SearchState {
        let plan = self.supervisor.set_need_category(value);
        self.run_plan(plan)
    }

    pub fn set_kind(&mut self, value: Option<EntityKind>) -> &SearchState {
        let plan = self.supervisor.set_kind(value);
        self.run_plan(plan)
    }

    pub fn set_keyword(&mut self, value: Option<String>) -> &SearchState {
        let plan = self.supervisor.set_keyword(value);
        self.run_plan(plan)
    }

    pub fn pin(&mut self, id: impl Into<EntityId>) -> &SearchState {
        let plan = self.supervisor.pin(id);
        self.run_plan(plan)
    }

    pub fn unpin(&mut self, id: &str) -> &SearchState {
        let plan = self.supervisor.unpin(id);
        self.run_plan(plan)
    }

    pub fn toggle_pin(&mut self, id: impl Into<EntityId>) -> &SearchState {
        let plan = self.supervisor.toggle_pin(id);
        self.run_plan(plan)
    }

    pub fn hide(&mut self, id: impl Into<EntityId>) -> &SearchState {
        let plan = self.supervisor.hide(id);
        self.run_plan(plan)
    }

    /// Inserts a catalog entry, then recomputes so an active query sees it.
    pub fn add_entity(&mut self, draft: EntityDraft) -> Result<Entity> {
        let entity = self.store.insert(draft)?;
        let plan = self.supervisor.restart();
        self.run_plan(plan);
        Ok(entity)
    }

    pub fn stats(&self) -> Result<CatalogStats> {
        self.store.stats()
    }

    pub fn export_document(&self) -> String {
        render_document(self.results())
    }

    pub fn write_export<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_document(writer, self.results())
    }

    fn run_plan(&mut self, plan: Option<FetchPlan>) -> &SearchState {
        if let Some(plan) = plan {
            if let Some(ids) = &plan.pinned_ids {
                let outcome = self.store.fetch_by_ids(ids).map_err(|e| e.to_string());
                self.supervisor.complete_pinned(plan.token, outcome);
            }
            if let Some(query) = &plan.filtered {
                let outcome = self.store.search(query).map_err(|e| e.to_string());
                self.supervisor.complete_filtered(plan.token, outcome);
            }
        }
        self.supervisor.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceCategory;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn seeded_store() -> InMemoryStore {
        StoreFixture::new()
            .with_org("org-2", "Bay Rides", ServiceCategory::Transportation)
            .with_org("org-1", "Access Transit", ServiceCategory::Transportation)
            .with_org("org-42", "Zenith Counseling", ServiceCategory::Counseling)
            .store
    }

    #[test]
    fn new_api_with_no_deep_link_awaits_input() {
        let api = DirectoryApi::new(seeded_store());
        assert_eq!(*api.state(), SearchState::AwaitingInput);
    }

    #[test]
    fn service_filter_returns_name_sorted_matches() {
        let mut api = DirectoryApi::new(seeded_store());
        api.set_service_category(Some(ServiceCategory::Transportation));

        let names: Vec<&str> = api.results().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Access Transit", "Bay Rides"]);
    }

    #[test]
    fn pinned_mismatching_entity_leads_the_merged_result() {
        let mut api = DirectoryApi::new(seeded_store());
        api.set_service_category(Some(ServiceCategory::Transportation));
        api.pin("org-42");

        let ids: Vec<&str> = api.results().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["org-42", "org-1", "org-2"]);
        assert!(api.is_pinned("org-42"));
    }

    #[test]
    fn hide_then_filter_change_keeps_the_id_hidden() {
        let mut api = DirectoryApi::new(seeded_store());
        api.set_service_category(Some(ServiceCategory::Transportation));
        api.hide("org-1");

        let ids: Vec<&str> = api.results().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["org-2"]);

        api.set_keyword(Some("transit".into()));
        assert_eq!(*api.state(), SearchState::NoResults);
    }

    #[test]
    fn deep_link_runs_an_initial_query_and_highlights() {
        let api = DirectoryApi::with_session(
            seeded_store(),
            FilterSelection::new(),
            OverrideSets::new(),
            DeepLinkRequest::from_query("org=org-1"),
        );
        assert!(matches!(*api.state(), SearchState::Results(_)));
        assert_eq!(api.highlight(), Some("org-1"));
    }

    #[test]
    fn deep_link_to_unknown_entity_is_not_an_error() {
        let api = DirectoryApi::with_session(
            seeded_store(),
            FilterSelection::new(),
            OverrideSets::new(),
            DeepLinkRequest::from_query("org=org-404"),
        );
        assert!(api.highlight().is_none());
        assert!(matches!(*api.state(), SearchState::Results(_)));
    }

    #[test]
    fn added_entity_appears_in_the_active_query() {
        let mut api = DirectoryApi::new(seeded_store());
        api.set_service_category(Some(ServiceCategory::Counseling));
        assert_eq!(api.results().len(), 1);

        api.add_entity(EntityDraft {
            name: "Anchor Counseling".into(),
            description: "Family counseling".into(),
            website: None,
            phone: None,
            email: None,
            location_zip: "02116".into(),
            service_category: ServiceCategory::Counseling,
            need_category: crate::model::NeedCategory::ChronicHealthConditions,
            kind: crate::model::EntityKind::Program,
        })
        .unwrap();

        let names: Vec<&str> = api.results().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Anchor Counseling", "Zenith Counseling"]);
    }

    #[test]
    fn export_document_reflects_the_merged_result() {
        let mut api = DirectoryApi::new(seeded_store());
        api.set_service_category(Some(ServiceCategory::Transportation));

        let doc = api.export_document();
        assert!(doc.contains("Name: Access Transit"));
        assert!(doc.contains("Name: Bay Rides"));
        assert_eq!(doc.lines().filter(|l| *l == "---").count(), 1);
    }
}
