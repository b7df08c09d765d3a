//! Star model and received-star endpoints.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::mapping::{self, format_timestamp, Mappable};
use crate::models::user::User;

/// A star given to an issue, comment, or wiki page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Star {
    pub id: u64,
    /// Comment attached to the star. Explicitly `null` on the wire when
    /// the presenter left none; an empty string is a present value.
    pub comment: Option<String>,
    pub url: String,
    pub title: String,
    pub presenter: User,
    pub created: DateTime<Utc>,
}

impl Mappable for Star {
    const ENTITY: &'static str = "Star";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            comment: mapping::opt_str(Self::ENTITY, obj, "comment")?,
            url: mapping::req_str(Self::ENTITY, obj, "url")?,
            title: mapping::req_str(Self::ENTITY, obj, "title")?,
            presenter: mapping::req_entity(Self::ENTITY, obj, "presenter")?,
            created: mapping::req_timestamp(Self::ENTITY, obj, "created")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        if let Some(comment) = &self.comment {
            dict.insert("comment".into(), Value::from(comment.clone()));
        }
        dict.insert("url".into(), Value::from(self.url.clone()));
        dict.insert("title".into(), Value::from(self.title.clone()));
        dict.insert("presenter".into(), mapping::entity_to_value(&self.presenter));
        dict.insert("created".into(), Value::from(format_timestamp(self.created)));
        dict
    }
}

/// Fetch the stars a user has received, newest first (server order).
///
/// `GET /users/:user_id/stars`
pub async fn get_user_received_stars(client: &BacklogClient, user_id: u64) -> Result<Vec<Star>> {
    let value = client.fetch(&format!("users/{user_id}/stars"), &[]).await?;
    mapping::from_json_array(&value)
}

/// Count the stars a user has received.
///
/// `GET /users/:user_id/stars/count`
pub async fn get_user_received_star_count(client: &BacklogClient, user_id: u64) -> Result<u64> {
    let value = client
        .fetch(&format!("users/{user_id}/stars/count"), &[])
        .await?;
    mapping::count_from_json(&value)
}
