use super::{CATEGORIES_KEY, KeyValueStore, read_json, write_json};
use crate::core::category::{Category, CategoryStyle, Icon, default_categories};
use crate::error::StoreError;

/// Owns the category set. Names are not required to be unique; lookups
/// return the first match in insertion order.
///
/// Mutations re-read the stored set before applying the change.
pub struct CategoryStore<S> {
    kv: S,
    categories: Vec<Category>,
}

impl<S: KeyValueStore> CategoryStore<S> {
    /// Load the set, writing the four defaults if nothing was stored yet.
    pub fn load(kv: S) -> Self {
        let mut store = Self {
            kv,
            categories: Vec::new(),
        };
        store.reload();
        store
    }

    pub fn reload(&mut self) {
        self.categories = match read_json(&self.kv, CATEGORIES_KEY) {
            Some(categories) => categories,
            None => {
                log::info!("No categories stored, seeding defaults");
                let seed = default_categories();
                if let Err(e) = write_json(&self.kv, CATEGORIES_KEY, &seed) {
                    log::warn!("Default categories kept in memory only: {}", e);
                }
                seed
            }
        };
    }

    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    /// Append a category. Blank names are ignored and yield `Ok(None)`.
    pub fn add(
        &mut self,
        name: &str,
        icon: Icon,
        color: &str,
    ) -> Result<Option<Category>, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.reload();
        let category = Category::new(name, icon, color);
        self.categories.push(category.clone());
        self.persist()?;
        Ok(Some(category))
    }

    /// Append `category` unless one with the same name exists. Returns
    /// whether it was added.
    pub fn ensure(&mut self, category: &Category) -> Result<bool, StoreError> {
        self.reload();
        if category.name.trim().is_empty() || self.lookup(&category.name).is_some() {
            return Ok(false);
        }
        self.categories.push(category.clone());
        self.persist()?;
        Ok(true)
    }

    /// Remove every category with this name. Tasks keep their snapshot.
    pub fn remove(&mut self, name: &str) -> Result<usize, StoreError> {
        self.reload();
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        let removed = before - self.categories.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn lookup(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Icon and color to draw for a task's category name.
    pub fn style_for(&self, name: &str, fallback: &CategoryStyle) -> CategoryStyle {
        self.lookup(name)
            .map(Category::style)
            .unwrap_or_else(|| fallback.clone())
    }

    /// Rewrite the whole set. Also serves as the retry after a failed write.
    pub fn persist(&self) -> Result<(), StoreError> {
        write_json(&self.kv, CATEGORIES_KEY, &self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::store::testing::ReadOnlyStore;

    #[test]
    fn first_load_seeds_and_persists_defaults() {
        let kv = MemoryStore::default();
        let store = CategoryStore::load(kv.clone());
        assert_eq!(store.list().len(), 4);
        assert!(kv.get(CATEGORIES_KEY).unwrap().is_some());

        let reloaded = CategoryStore::load(kv);
        assert_eq!(reloaded.list(), store.list());
    }

    #[test]
    fn empty_stored_set_is_not_reseeded() {
        let kv = MemoryStore::default();
        kv.set(CATEGORIES_KEY, "[]").unwrap();
        let store = CategoryStore::load(kv);
        assert!(store.list().is_empty());
    }

    #[test]
    fn blank_name_is_a_noop() {
        let kv = MemoryStore::default();
        let mut store = CategoryStore::load(kv);
        assert_eq!(store.add("   ", Icon::Star, "#fff").unwrap(), None);
        assert_eq!(store.list().len(), 4);
    }

    #[test]
    fn duplicate_names_shadow_in_insertion_order() {
        let kv = MemoryStore::default();
        let mut store = CategoryStore::load(kv);
        store.add(" Work ", Icon::School, "#000000").unwrap();
        assert_eq!(store.list().len(), 5);
        assert_eq!(store.lookup("Work").unwrap().icon, Icon::Briefcase);

        assert_eq!(store.remove("Work").unwrap(), 2);
        assert!(store.lookup("Work").is_none());
    }

    #[test]
    fn ensure_only_adds_unknown_names() {
        let kv = MemoryStore::default();
        let mut store = CategoryStore::load(kv);
        assert!(!store.ensure(&Category::new("Home", Icon::Car, "#000")).unwrap());
        assert!(store.ensure(&Category::new("Gym", Icon::Heart, "#111")).unwrap());
        assert_eq!(store.lookup("Gym").unwrap().color, "#111");
    }

    #[test]
    fn style_falls_back_for_deleted_category() {
        let kv = MemoryStore::default();
        let mut store = CategoryStore::load(kv);
        let fallback = CategoryStyle::default();
        assert_eq!(store.style_for("Health", &fallback).icon, Icon::Heart);
        store.remove("Health").unwrap();
        assert_eq!(store.style_for("Health", &fallback), fallback);
    }

    #[test]
    fn interleaved_stores_keep_each_others_writes() {
        let kv = MemoryStore::default();
        let mut a = CategoryStore::load(kv.clone());
        let mut b = CategoryStore::load(kv.clone());
        b.add("Gym", Icon::Heart, "#111").unwrap();
        a.add("Music", Icon::MusicalNotes, "#222").unwrap();
        assert!(!a.ensure(&Category::new("Gym", Icon::Car, "#333")).unwrap());
        assert_eq!(b.remove("Music").unwrap(), 1);

        let names: Vec<String> = CategoryStore::load(kv)
            .list()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["Health", "Work", "Home", "Finance", "Gym"]);
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let kv = ReadOnlyStore::default();
        let mut store = CategoryStore::load(kv);
        assert!(store.add("Gym", Icon::Heart, "#111").is_err());
        assert!(store.lookup("Gym").is_some());
    }
}
