//! Local backend: the browser-local-storage analogue.
//!
//! All posts live in one JSON blob in the platform data directory. Rows
//! keep the original camelCase shape and carry no position, so stars are
//! re-randomized on every load. Writes enforce a blob-size cap the way
//! localStorage enforced its quota: over the cap, only the newest posts
//! are retained and the write is retried once.

use std::env;
use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BackendKind, PostStore, StoreError};
use crate::constants::limits;
use crate::post::{NewPost, Post};

/// Stored row, camelCase for parity with the original blob format.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct LocalRow {
    id: String,
    title: String,
    text: String,
    #[serde(default)]
    image_url: Option<String>,
    /// Epoch milliseconds.
    created_at: i64,
}

impl From<LocalRow> for Post {
    fn from(row: LocalRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            text: row.text,
            image: row.image_url,
            position: None,
            created_at: chrono::DateTime::from_timestamp_millis(row.created_at)
                .unwrap_or_else(Utc::now),
        }
    }
}

pub struct LocalStore {
    path: PathBuf,
    max_blob_bytes: usize,
}

impl LocalStore {
    /// The blob under the platform data directory.
    pub fn at_default_path() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(env::temp_dir)
            .join("starfield");
        Self::with_path(dir.join("posts.json"))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            max_blob_bytes: limits::LOCAL_BLOB_CAP,
        }
    }

    /// Read the whole row set. A missing file is an empty store; a
    /// corrupt blob resets to empty rather than failing the load.
    fn read_rows(&self) -> Vec<LocalRow> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(
                    "Discarding corrupt post blob at {}: {err}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Serialize and write the full row set. A blob over the cap retains
    /// only the newest [`limits::LOCAL_RETAIN`] rows and retries once.
    fn write_rows(&self, rows: &[LocalRow]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Storage(err.to_string()))?;
        }

        let blob = serde_json::to_string(rows)?;
        if blob.len() <= self.max_blob_bytes {
            return fs::write(&self.path, blob).map_err(|err| StoreError::Storage(err.to_string()));
        }

        let start = rows.len().saturating_sub(limits::LOCAL_RETAIN);
        let recent = &rows[start..];
        warn!(
            "Post blob over {} bytes; retaining the newest {} posts",
            self.max_blob_bytes,
            recent.len()
        );
        let blob = serde_json::to_string(recent)?;
        if blob.len() <= self.max_blob_bytes {
            fs::write(&self.path, blob).map_err(|err| StoreError::Storage(err.to_string()))
        } else {
            Err(StoreError::Storage(
                "post blob exceeds the storage cap even after trimming".to_string(),
            ))
        }
    }
}

impl PostStore for LocalStore {
    fn load(&self) -> Result<Vec<Post>, StoreError> {
        #[allow(unused_mut)]
        let mut rows = self.read_rows();

        #[cfg(feature = "demo-seed")]
        if rows.is_empty() {
            rows = demo_rows();
            if let Err(err) = self.write_rows(&rows) {
                warn!("Failed to persist demo posts: {err}");
            }
        }

        Ok(rows.into_iter().map(Post::from).collect())
    }

    fn add(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut rows = self.read_rows();
        let row = LocalRow {
            id: Uuid::new_v4().to_string(),
            title: post.title,
            text: post.text,
            image_url: post.image,
            created_at: Utc::now().timestamp_millis(),
        };
        rows.push(row.clone());
        self.write_rows(&rows)?;
        Ok(Post::from(row))
    }

    fn requires_image(&self) -> bool {
        true
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }
}

/// Placeholder posts for an empty local store.
#[cfg(feature = "demo-seed")]
fn demo_rows() -> Vec<LocalRow> {
    let now = Utc::now().timestamp_millis();
    (0..300)
        .map(|i| LocalRow {
            id: Uuid::new_v4().to_string(),
            title: format!("Star #{}", i + 1),
            text: "A short line describing this star and its message.".to_string(),
            image_url: Some(format!("https://picsum.photos/seed/{}/800/500", i + 11)),
            created_at: now - (300 - i as i64) * 10_000,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(max_blob_bytes: usize) -> LocalStore {
        LocalStore {
            path: env::temp_dir().join(format!("starfield-test-{}.json", Uuid::new_v4())),
            max_blob_bytes,
        }
    }

    fn cleanup(store: &LocalStore) {
        let _ = fs::remove_file(&store.path);
    }

    fn make_row(n: usize) -> LocalRow {
        LocalRow {
            id: format!("row-{n}"),
            title: format!("Star {n}"),
            text: "body".to_string(),
            image_url: Some("data:image/jpeg;base64,Zm9v".to_string()),
            created_at: n as i64,
        }
    }

    #[test]
    fn missing_blob_loads_as_empty() {
        let store = temp_store(limits::LOCAL_BLOB_CAP);
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn add_round_trips_through_the_blob() {
        let store = temp_store(limits::LOCAL_BLOB_CAP);
        let added = store
            .add(NewPost {
                title: "hello".to_string(),
                text: "world".to_string(),
                image: Some("data:image/jpeg;base64,Zm9v".to_string()),
                position: Some(Vec2::new(3.0, 4.0)),
            })
            .expect("add");
        assert!(!added.id.is_empty());
        // Positions are not persisted locally.
        assert_eq!(added.position, None);

        let loaded = store.load().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "hello");
        assert_eq!(loaded[0].position, None);
        cleanup(&store);
    }

    #[test]
    fn oversized_blob_retains_the_newest_entries_and_succeeds() {
        // Cap sized so 150 rows overflow but the newest 100 fit.
        let rows: Vec<LocalRow> = (0..150).map(make_row).collect();
        let full = serde_json::to_string(&rows).expect("serialize");
        let trimmed = serde_json::to_string(&rows[50..]).expect("serialize");
        let store = temp_store((full.len() + trimmed.len()) / 2);

        store.write_rows(&rows).expect("trimmed write reports success");
        let kept = store.read_rows();
        assert_eq!(kept.len(), limits::LOCAL_RETAIN);
        assert_eq!(kept.first().map(|r| r.id.as_str()), Some("row-50"));
        assert_eq!(kept.last().map(|r| r.id.as_str()), Some("row-149"));
        cleanup(&store);
    }

    #[test]
    fn blob_too_large_even_after_trimming_is_an_error() {
        let rows: Vec<LocalRow> = (0..150).map(make_row).collect();
        let store = temp_store(16);
        assert!(matches!(
            store.write_rows(&rows),
            Err(StoreError::Storage(_))
        ));
        cleanup(&store);
    }

    #[test]
    fn corrupt_blob_resets_to_empty() {
        let store = temp_store(limits::LOCAL_BLOB_CAP);
        fs::write(&store.path, b"{not json!").expect("write garbage");
        assert!(store.load().expect("load").is_empty());
        cleanup(&store);
    }

    #[test]
    fn image_policy_is_required() {
        assert!(temp_store(limits::LOCAL_BLOB_CAP).requires_image());
    }
}
