//! Project model and project endpoints.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::mapping::{self, Mappable};
use crate::models::user::User;
use crate::traits::Get;

/// A Backlog project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub project_key: String,
    pub name: String,
    pub chart_enabled: bool,
    pub subtasking_enabled: bool,
    pub project_leader_can_edit_project_leader: bool,
    pub use_wiki_tree_view: bool,
    pub text_formatting_rule: String,
    pub archived: bool,
    pub display_order: i64,
    pub use_dev_attributes: bool,
}

impl Mappable for Project {
    const ENTITY: &'static str = "Project";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            project_key: mapping::req_str(Self::ENTITY, obj, "projectKey")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            chart_enabled: mapping::req_bool(Self::ENTITY, obj, "chartEnabled")?,
            subtasking_enabled: mapping::req_bool(Self::ENTITY, obj, "subtaskingEnabled")?,
            project_leader_can_edit_project_leader: mapping::req_bool(
                Self::ENTITY,
                obj,
                "projectLeaderCanEditProjectLeader",
            )?,
            use_wiki_tree_view: mapping::req_bool(Self::ENTITY, obj, "useWikiTreeView")?,
            text_formatting_rule: mapping::req_str(Self::ENTITY, obj, "textFormattingRule")?,
            archived: mapping::req_bool(Self::ENTITY, obj, "archived")?,
            display_order: mapping::req_i64(Self::ENTITY, obj, "displayOrder")?,
            use_dev_attributes: mapping::req_bool(Self::ENTITY, obj, "useDevAttributes")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("projectKey".into(), Value::from(self.project_key.clone()));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("chartEnabled".into(), Value::from(self.chart_enabled));
        dict.insert(
            "subtaskingEnabled".into(),
            Value::from(self.subtasking_enabled),
        );
        dict.insert(
            "projectLeaderCanEditProjectLeader".into(),
            Value::from(self.project_leader_can_edit_project_leader),
        );
        dict.insert("useWikiTreeView".into(), Value::from(self.use_wiki_tree_view));
        dict.insert(
            "textFormattingRule".into(),
            Value::from(self.text_formatting_rule.clone()),
        );
        dict.insert("archived".into(), Value::from(self.archived));
        dict.insert("displayOrder".into(), Value::from(self.display_order));
        dict.insert("useDevAttributes".into(), Value::from(self.use_dev_attributes));
        dict
    }
}

#[async_trait]
impl Get for Project {
    /// Numeric project ID or project key string (`projectIdOrKey`).
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &BacklogClient, project_id_or_key: String) -> Result<Self> {
        let encoded = urlencoding::encode(&project_id_or_key);
        let value = client.fetch(&format!("projects/{encoded}"), &[]).await?;
        Project::from_json(&value)
    }
}

/// Fetch every project visible to the API key.
///
/// `GET /projects`
pub async fn get_projects(client: &BacklogClient) -> Result<Vec<Project>> {
    let value = client.fetch("projects", &[]).await?;
    mapping::from_json_array(&value)
}

/// Fetch the members of a project.
///
/// `GET /projects/:project_id_or_key/users`
pub async fn get_project_users(
    client: &BacklogClient,
    project_id_or_key: &str,
) -> Result<Vec<User>> {
    let encoded = urlencoding::encode(project_id_or_key);
    let value = client.fetch(&format!("projects/{encoded}/users"), &[]).await?;
    mapping::from_json_array(&value)
}

/// Fetch the administrators of a project.
///
/// `GET /projects/:project_id_or_key/administrators`
pub async fn get_project_administrators(
    client: &BacklogClient,
    project_id_or_key: &str,
) -> Result<Vec<User>> {
    let encoded = urlencoding::encode(project_id_or_key);
    let value = client
        .fetch(&format!("projects/{encoded}/administrators"), &[])
        .await?;
    mapping::from_json_array(&value)
}
