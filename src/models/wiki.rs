//! Wiki model and wiki endpoints.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::mapping::{self, format_timestamp, Mappable};
use crate::models::file::{Attachment, SharedFile};
use crate::models::star::Star;
use crate::models::user::User;
use crate::traits::Get;

/// A tag on a wiki page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

impl Mappable for Tag {
    const ENTITY: &'static str = "Tag";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict
    }
}

/// A wiki page.
///
/// The list endpoint serves pages with `content` set to `null`; the
/// single-page endpoint includes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wiki {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    pub content: Option<String>,
    pub tags: Vec<Tag>,
    pub attachments: Vec<Attachment>,
    pub shared_files: Vec<SharedFile>,
    pub stars: Vec<Star>,
    pub created_user: User,
    pub created: DateTime<Utc>,
    pub updated_user: User,
    pub updated: DateTime<Utc>,
}

impl Mappable for Wiki {
    const ENTITY: &'static str = "Wiki";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            project_id: mapping::req_u64(Self::ENTITY, obj, "projectId")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            content: mapping::opt_str(Self::ENTITY, obj, "content")?,
            tags: mapping::req_entities(Self::ENTITY, obj, "tags")?,
            attachments: mapping::req_entities(Self::ENTITY, obj, "attachments")?,
            shared_files: mapping::req_entities(Self::ENTITY, obj, "sharedFiles")?,
            stars: mapping::req_entities(Self::ENTITY, obj, "stars")?,
            created_user: mapping::req_entity(Self::ENTITY, obj, "createdUser")?,
            created: mapping::req_timestamp(Self::ENTITY, obj, "created")?,
            updated_user: mapping::req_entity(Self::ENTITY, obj, "updatedUser")?,
            updated: mapping::req_timestamp(Self::ENTITY, obj, "updated")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("projectId".into(), Value::from(self.project_id));
        dict.insert("name".into(), Value::from(self.name.clone()));
        if let Some(content) = &self.content {
            dict.insert("content".into(), Value::from(content.clone()));
        }
        dict.insert("tags".into(), mapping::entities_to_value(&self.tags));
        dict.insert(
            "attachments".into(),
            mapping::entities_to_value(&self.attachments),
        );
        dict.insert(
            "sharedFiles".into(),
            mapping::entities_to_value(&self.shared_files),
        );
        dict.insert("stars".into(), mapping::entities_to_value(&self.stars));
        dict.insert(
            "createdUser".into(),
            mapping::entity_to_value(&self.created_user),
        );
        dict.insert("created".into(), Value::from(format_timestamp(self.created)));
        dict.insert(
            "updatedUser".into(),
            mapping::entity_to_value(&self.updated_user),
        );
        dict.insert("updated".into(), Value::from(format_timestamp(self.updated)));
        dict
    }
}

#[async_trait]
impl Get for Wiki {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &BacklogClient, wiki_id: u64) -> Result<Self> {
        let value = client.fetch(&format!("wikis/{wiki_id}"), &[]).await?;
        Wiki::from_json(&value)
    }
}

/// Fetch the wiki pages of a project, optionally filtered by keyword.
///
/// `GET /wikis?projectIdOrKey=...[&keyword=...]`
pub async fn get_wikis(
    client: &BacklogClient,
    project_id_or_key: &str,
    keyword: Option<&str>,
) -> Result<Vec<Wiki>> {
    let mut params = vec![("projectIdOrKey", project_id_or_key)];
    if let Some(keyword) = keyword {
        params.push(("keyword", keyword));
    }
    let value = client.fetch("wikis", &params).await?;
    mapping::from_json_array(&value)
}

/// Count the wiki pages of a project, optionally filtered by keyword.
///
/// `GET /wikis/count?projectIdOrKey=...[&keyword=...]`
pub async fn get_wiki_count(
    client: &BacklogClient,
    project_id_or_key: &str,
    keyword: Option<&str>,
) -> Result<u64> {
    let mut params = vec![("projectIdOrKey", project_id_or_key)];
    if let Some(keyword) = keyword {
        params.push(("keyword", keyword));
    }
    let value = client.fetch("wikis/count", &params).await?;
    mapping::count_from_json(&value)
}

/// Fetch the attachments of a wiki page.
///
/// `GET /wikis/:wiki_id/attachments`
pub async fn get_wiki_attachments(
    client: &BacklogClient,
    wiki_id: u64,
) -> Result<Vec<Attachment>> {
    let value = client
        .fetch(&format!("wikis/{wiki_id}/attachments"), &[])
        .await?;
    mapping::from_json_array(&value)
}

/// Fetch the shared files linked to a wiki page.
///
/// `GET /wikis/:wiki_id/sharedFiles`
pub async fn get_wiki_shared_files(
    client: &BacklogClient,
    wiki_id: u64,
) -> Result<Vec<SharedFile>> {
    let value = client
        .fetch(&format!("wikis/{wiki_id}/sharedFiles"), &[])
        .await?;
    mapping::from_json_array(&value)
}
