//! Hosted backend: a PostgREST-style records API over one `posts`
//! collection, keyed by server-generated ids.
//!
//! Credentials come from the environment. A missing or empty pair is a
//! recognized configuration state: loads degrade to an empty field with a
//! warning, adds fail loudly so the user sees the post was not saved.

use std::env;
use std::time::Duration;

use bevy::prelude::*;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{BackendKind, PostStore, StoreError};
use crate::post::{NewPost, Post};

pub const URL_VAR: &str = "STARFIELD_API_URL";
pub const KEY_VAR: &str = "STARFIELD_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
struct RemoteConfig {
    base_url: String,
    api_key: String,
}

pub struct RemoteStore {
    config: Option<RemoteConfig>,
}

/// Wire row of the hosted `posts` collection.
#[derive(Serialize, Deserialize, Debug)]
struct PostRow {
    id: String,
    title: String,
    text: String,
    #[serde(default)]
    image: Option<String>,
    x: f32,
    y: f32,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            text: row.text,
            image: row.image,
            position: Some(Vec2::new(row.x, row.y)),
            created_at: row.created_at,
        }
    }
}

/// Insert payload; id and timestamp are assigned server-side.
#[derive(Serialize, Debug)]
struct InsertRow<'a> {
    title: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    x: f32,
    y: f32,
}

impl RemoteStore {
    /// Read credentials from the environment. The store is constructed
    /// either way; an incomplete pair leaves it unconfigured.
    pub fn from_env() -> Self {
        let config = match (env::var(URL_VAR), env::var(KEY_VAR)) {
            (Ok(url), Ok(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
                Some(RemoteConfig {
                    base_url: url.trim().trim_end_matches('/').to_string(),
                    api_key: key.trim().to_string(),
                })
            }
            _ => None,
        };
        Self { config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// A fresh blocking client per request; loads and adds are rare
    /// enough that connection reuse buys nothing here.
    fn http(&self) -> Result<Client, StoreError> {
        Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
    }

    fn endpoint(config: &RemoteConfig) -> String {
        format!("{}/rest/v1/posts", config.base_url)
    }
}

impl PostStore for RemoteStore {
    fn load(&self) -> Result<Vec<Post>, StoreError> {
        let Some(config) = &self.config else {
            warn!("{URL_VAR}/{KEY_VAR} not set; starting with an empty field");
            return Ok(Vec::new());
        };

        let response = self
            .http()?
            .get(Self::endpoint(config))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let rows: Vec<PostRow> = response.json()?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    fn add(&self, post: NewPost) -> Result<Post, StoreError> {
        let Some(config) = &self.config else {
            return Err(StoreError::Unconfigured);
        };

        let position = post.position.unwrap_or_default();
        let row = InsertRow {
            title: &post.title,
            text: &post.text,
            image: post.image.as_deref(),
            x: position.x,
            y: position.y,
        };

        let response = self
            .http()?
            .post(Self::endpoint(config))
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let mut rows: Vec<PostRow> = response.json()?;
        rows.pop().map(Post::from).ok_or_else(|| StoreError::Api {
            status: status.as_u16(),
            message: "empty insert response".to_string(),
        })
    }

    fn requires_image(&self) -> bool {
        false
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Hosted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(url: &str) -> RemoteStore {
        RemoteStore {
            config: Some(RemoteConfig {
                base_url: url.trim_end_matches('/').to_string(),
                api_key: "key".to_string(),
            }),
        }
    }

    fn unconfigured() -> RemoteStore {
        RemoteStore { config: None }
    }

    #[test]
    fn unconfigured_load_degrades_to_empty() {
        let posts = unconfigured().load().expect("load should not fail");
        assert!(posts.is_empty());
    }

    #[test]
    fn unconfigured_add_fails_loudly() {
        let result = unconfigured().add(NewPost {
            title: "t".to_string(),
            text: "x".to_string(),
            image: None,
            position: None,
        });
        assert!(matches!(result, Err(StoreError::Unconfigured)));
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let store = configured("https://example.test/");
        let config = store.config.as_ref().unwrap();
        assert_eq!(
            RemoteStore::endpoint(config),
            "https://example.test/rest/v1/posts"
        );
    }

    #[test]
    fn row_maps_into_post_with_position() {
        let raw = r#"{
            "id": "abc-123",
            "title": "hello",
            "text": "body",
            "image": null,
            "x": 12.5,
            "y": -40.0,
            "created_at": "2026-08-07T10:00:00Z"
        }"#;
        let row: PostRow = serde_json::from_str(raw).expect("parse row");
        let post = Post::from(row);
        assert_eq!(post.id, "abc-123");
        assert_eq!(post.image, None);
        assert_eq!(post.position, Some(Vec2::new(12.5, -40.0)));
    }

    #[test]
    fn insert_row_omits_absent_image() {
        let row = InsertRow {
            title: "t",
            text: "x",
            image: None,
            x: 1.0,
            y: 2.0,
        };
        let json = serde_json::to_string(&row).expect("serialize");
        assert!(!json.contains("image"));

        let row = InsertRow {
            title: "t",
            text: "x",
            image: Some("data:image/jpeg;base64,Zm9v"),
            x: 1.0,
            y: 2.0,
        };
        let json = serde_json::to_string(&row).expect("serialize");
        assert!(json.contains("\"image\""));
    }

    #[test]
    fn image_policy_is_optional() {
        assert!(!unconfigured().requires_image());
    }
}
