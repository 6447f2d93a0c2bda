use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const STORE_FILE: &str = "favorites.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FavoriteItem {
    pub id: Uuid,
    pub title: String,
    pub url: String,
}

impl FavoriteItem {
    fn new(title: &str, url: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

/// Ordered favorites collection, one entry per URL.
/// Every mutation re-saves the whole list to `favorites.json`.
pub struct FavoritesStore {
    items: Mutex<Vec<FavoriteItem>>,
    store_path: PathBuf,
}

impl FavoritesStore {
    pub fn new(app_data_dir: PathBuf) -> Self {
        fs::create_dir_all(&app_data_dir).ok();
        let store_path = app_data_dir.join(STORE_FILE);
        let items = Self::load_from_disk(&store_path);

        FavoritesStore {
            items: Mutex::new(items),
            store_path,
        }
    }

    fn load_from_disk(path: &PathBuf) -> Vec<FavoriteItem> {
        if !path.exists() {
            return Vec::new();
        }

        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(items) => items,
                Err(e) => {
                    eprintln!("[Favorites] Failed to parse {}: {}, starting empty", STORE_FILE, e);
                    Vec::new()
                }
            },
            Err(e) => {
                eprintln!("[Favorites] Failed to read {}: {}, starting empty", STORE_FILE, e);
                Vec::new()
            }
        }
    }

    /// Appends a new item unless the URL is already present. Duplicate adds
    /// are a silent no-op. Returns true if the collection changed.
    pub fn add(&self, title: &str, url: &str) -> bool {
        let snapshot = {
            let mut items = self.items.lock().unwrap();
            if items.iter().any(|i| i.url == url) {
                return false;
            }
            items.push(FavoriteItem::new(title, url));
            items.clone()
        };

        self.save(&snapshot);
        true
    }

    /// Removes items at the given positions. Indices must come from the live
    /// collection; stale positions are skipped. Returns true if anything was
    /// removed.
    pub fn remove_at(&self, indices: &[usize]) -> bool {
        let snapshot = {
            let mut items = self.items.lock().unwrap();
            let mut sorted: Vec<usize> = indices.to_vec();
            sorted.sort_unstable();
            sorted.dedup();

            let mut removed = false;
            // Highest index first so earlier removals don't shift later ones.
            for idx in sorted.into_iter().rev() {
                if idx < items.len() {
                    items.remove(idx);
                    removed = true;
                }
            }

            if !removed {
                return false;
            }
            items.clone()
        };

        self.save(&snapshot);
        true
    }

    /// Removes the entry matching `url` if present, otherwise adds one.
    /// Returns true if the page is a favorite afterwards.
    pub fn toggle(&self, title: &str, url: &str) -> bool {
        let (snapshot, now_favorite) = {
            let mut items = self.items.lock().unwrap();
            let now_favorite = match items.iter().position(|i| i.url == url) {
                Some(idx) => {
                    items.remove(idx);
                    false
                }
                None => {
                    items.push(FavoriteItem::new(title, url));
                    true
                }
            };
            (items.clone(), now_favorite)
        };

        self.save(&snapshot);
        now_favorite
    }

    pub fn is_favorite(&self, url: Option<&str>) -> bool {
        match url {
            Some(url) => self.items.lock().unwrap().iter().any(|i| i.url == url),
            None => false,
        }
    }

    pub fn items(&self) -> Vec<FavoriteItem> {
        self.items.lock().unwrap().clone()
    }

    fn save(&self, items: &[FavoriteItem]) {
        let json = match serde_json::to_string_pretty(items) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("[Favorites] Failed to serialize favorites: {}", e);
                return;
            }
        };

        // Atomic write: tmp + rename (pattern shared with settings persistence)
        let tmp_path = self.store_path.with_extension("tmp");
        if let Err(e) = fs::write(&tmp_path, json) {
            eprintln!("[Favorites] Failed to write {}: {}", STORE_FILE, e);
            return;
        }
        if let Err(e) = fs::rename(&tmp_path, &self.store_path) {
            eprintln!("[Favorites] Failed to commit {}: {}", STORE_FILE, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    fn urls(store: &FavoritesStore) -> Vec<String> {
        store.items().into_iter().map(|i| i.url).collect()
    }

    #[test]
    fn add_is_idempotent_per_url() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().to_path_buf());

        assert!(store.add("Movie A", "https://site/x"));
        assert!(!store.add("Movie A again", "https://site/x"));

        assert_eq!(urls(&store), vec!["https://site/x"]);
    }

    #[rstest]
    #[case(&["https://site/a", "https://site/b", "https://site/a", "https://site/c", "https://site/b"], 3)]
    #[case(&["https://site/a", "https://site/a", "https://site/a"], 1)]
    #[case(&[], 0)]
    fn add_sequences_never_duplicate(#[case] sequence: &[&str], #[case] expected: usize) {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().to_path_buf());

        for url in sequence {
            store.add("title", url);
        }

        let items = store.items();
        assert_eq!(items.len(), expected);
        // At most one entry per distinct URL, insertion order preserved.
        let mut seen = Vec::new();
        for item in &items {
            assert!(!seen.contains(&item.url));
            seen.push(item.url.clone());
        }
    }

    #[test]
    fn mixed_add_toggle_never_duplicates() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().to_path_buf());

        store.add("A", "https://site/a");
        store.toggle("A", "https://site/a"); // removes
        store.toggle("A", "https://site/a"); // re-adds
        store.add("A", "https://site/a"); // no-op

        assert_eq!(urls(&store), vec!["https://site/a"]);
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().to_path_buf());
        store.add("A", "https://site/a");
        store.add("B", "https://site/b");

        let before = urls(&store);
        assert!(store.toggle("C", "https://site/c"));
        assert!(!store.toggle("C", "https://site/c"));
        assert_eq!(urls(&store), before);
    }

    #[test]
    fn is_favorite_without_url_is_false() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().to_path_buf());
        store.add("A", "https://site/a");

        assert!(!store.is_favorite(None));
        assert!(store.is_favorite(Some("https://site/a")));
        assert!(!store.is_favorite(Some("https://site/b")));
    }

    #[test]
    fn remove_at_keeps_remaining_order() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().to_path_buf());
        for url in ["https://site/a", "https://site/b", "https://site/c", "https://site/d"] {
            store.add("t", url);
        }

        assert!(store.remove_at(&[0, 2]));
        assert_eq!(urls(&store), vec!["https://site/b", "https://site/d"]);

        // Stale index beyond the current length is skipped.
        assert!(!store.remove_at(&[9]));
        assert_eq!(store.items().len(), 2);
    }

    #[test]
    fn round_trips_across_restart() {
        let dir = tempdir().unwrap();
        let items_before;
        {
            let store = FavoritesStore::new(dir.path().to_path_buf());
            store.add("Movie A", "https://site/x");
            store.add("Movie B", "https://site/y");
            items_before = store.items();
        }

        let reloaded = FavoritesStore::new(dir.path().to_path_buf());
        assert_eq!(reloaded.items(), items_before);
    }

    #[rstest]
    #[case("not json at all")]
    #[case("{\"wrong\": \"shape\"}")]
    #[case("")]
    fn corrupt_payload_starts_empty(#[case] payload: &str) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), payload).unwrap();

        let store = FavoritesStore::new(dir.path().to_path_buf());
        assert!(store.items().is_empty());
    }

    #[test]
    fn missing_payload_starts_empty() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().to_path_buf());
        assert!(store.items().is_empty());
    }

    #[test]
    fn toggle_cycle_assigns_fresh_id() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::new(dir.path().to_path_buf());

        store.add("Movie A", "https://site/x");
        let first_id = store.items()[0].id;

        store.toggle("Movie A", "https://site/x");
        assert!(store.items().is_empty());

        store.toggle("Movie A", "https://site/x");
        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Movie A");
        assert_eq!(items[0].url, "https://site/x");
        assert_ne!(items[0].id, first_id);
    }
}
