use super::memory::catalog_stats;
use super::DirectoryStore;
use crate::error::Result;
use crate::model::{CatalogStats, Entity, EntityDraft, EntityId};
use crate::query::{sort_results, FilterQuery};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed catalog: one JSON array of entities, read per operation so
/// concurrent invocations observe each other's inserts. Array order is the
/// store's natural insertion order.
pub struct FileStore {
    catalog_path: PathBuf,
}

impl FileStore {
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
        }
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Creates an empty catalog file if none exists. Returns true if a new
    /// file was written.
    pub fn init(&self) -> Result<bool> {
        if self.catalog_path.exists() {
            return Ok(false);
        }
        self.save(&[])?;
        Ok(true)
    }

    fn load(&self) -> Result<Vec<Entity>> {
        if !self.catalog_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.catalog_path)?;
        let entities: Vec<Entity> = serde_json::from_str(&content)?;
        Ok(entities)
    }

    fn save(&self, entities: &[Entity]) -> Result<()> {
        if let Some(parent) = self.catalog_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entities)?;
        fs::write(&self.catalog_path, content)?;
        Ok(())
    }
}

impl DirectoryStore for FileStore {
    fn search(&self, query: &FilterQuery) -> Result<Vec<Entity>> {
        let mut matches: Vec<Entity> = self
            .load()?
            .into_iter()
            .filter(|e| query.matches(e))
            .collect();
        sort_results(&mut matches);
        Ok(matches)
    }

    fn fetch_by_ids(&self, ids: &[EntityId]) -> Result<Vec<Entity>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|e| ids.contains(&e.id))
            .collect())
    }

    fn insert(&mut self, draft: EntityDraft) -> Result<Entity> {
        let mut entities = self.load()?;
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
        entities.push(entity.clone());
        self.save(&entities)?;
        Ok(entity)
    }

    fn stats(&self) -> Result<CatalogStats> {
        Ok(catalog_stats(&self.load()?))
    }
}
