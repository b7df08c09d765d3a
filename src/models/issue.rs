//! Issue metadata models (statuses, types, categories, versions) and
//! issue comment models, with their endpoints.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::mapping::{self, format_timestamp, Mappable};
use crate::models::star::Star;
use crate::models::user::User;

/// An issue status defined in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    pub color: String,
    pub display_order: i64,
}

impl Mappable for Status {
    const ENTITY: &'static str = "Status";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            project_id: mapping::req_u64(Self::ENTITY, obj, "projectId")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            color: mapping::req_str(Self::ENTITY, obj, "color")?,
            display_order: mapping::req_i64(Self::ENTITY, obj, "displayOrder")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("projectId".into(), Value::from(self.project_id));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("color".into(), Value::from(self.color.clone()));
        dict.insert("displayOrder".into(), Value::from(self.display_order));
        dict
    }
}

/// An issue type defined in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueType {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    pub color: String,
    pub display_order: i64,
    pub template_summary: Option<String>,
    pub template_description: Option<String>,
}

impl Mappable for IssueType {
    const ENTITY: &'static str = "IssueType";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            project_id: mapping::req_u64(Self::ENTITY, obj, "projectId")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            color: mapping::req_str(Self::ENTITY, obj, "color")?,
            display_order: mapping::req_i64(Self::ENTITY, obj, "displayOrder")?,
            template_summary: mapping::opt_str(Self::ENTITY, obj, "templateSummary")?,
            template_description: mapping::opt_str(Self::ENTITY, obj, "templateDescription")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("projectId".into(), Value::from(self.project_id));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("color".into(), Value::from(self.color.clone()));
        dict.insert("displayOrder".into(), Value::from(self.display_order));
        if let Some(summary) = &self.template_summary {
            dict.insert("templateSummary".into(), Value::from(summary.clone()));
        }
        if let Some(description) = &self.template_description {
            dict.insert(
                "templateDescription".into(),
                Value::from(description.clone()),
            );
        }
        dict
    }
}

/// An issue category defined in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub display_order: i64,
}

impl Mappable for Category {
    const ENTITY: &'static str = "Category";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            display_order: mapping::req_i64(Self::ENTITY, obj, "displayOrder")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("displayOrder".into(), Value::from(self.display_order));
        dict
    }
}

/// A version/milestone defined in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub release_due_date: Option<DateTime<Utc>>,
    pub archived: bool,
    pub display_order: i64,
}

impl Mappable for Version {
    const ENTITY: &'static str = "Version";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            project_id: mapping::req_u64(Self::ENTITY, obj, "projectId")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            description: mapping::opt_str(Self::ENTITY, obj, "description")?,
            start_date: mapping::opt_timestamp(Self::ENTITY, obj, "startDate")?,
            release_due_date: mapping::opt_timestamp(Self::ENTITY, obj, "releaseDueDate")?,
            archived: mapping::req_bool(Self::ENTITY, obj, "archived")?,
            display_order: mapping::req_i64(Self::ENTITY, obj, "displayOrder")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("projectId".into(), Value::from(self.project_id));
        dict.insert("name".into(), Value::from(self.name.clone()));
        if let Some(description) = &self.description {
            dict.insert("description".into(), Value::from(description.clone()));
        }
        if let Some(start_date) = self.start_date {
            dict.insert("startDate".into(), Value::from(format_timestamp(start_date)));
        }
        if let Some(release_due_date) = self.release_due_date {
            dict.insert(
                "releaseDueDate".into(),
                Value::from(format_timestamp(release_due_date)),
            );
        }
        dict.insert("archived".into(), Value::from(self.archived));
        dict.insert("displayOrder".into(), Value::from(self.display_order));
        dict
    }
}

/// One change entry inside a comment.
///
/// All six keys are present on the wire; the values other than `field`
/// may be `null`. The three `*_info` values are free-form and pass
/// through untyped.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeLog {
    pub field: String,
    pub new_value: Option<Value>,
    pub original_value: Option<Value>,
    pub attachment_info: Option<Value>,
    pub attribute_info: Option<Value>,
    pub notification_info: Option<Value>,
}

impl Mappable for ChangeLog {
    const ENTITY: &'static str = "ChangeLog";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            field: mapping::req_str(Self::ENTITY, obj, "field")?,
            new_value: mapping::req_nullable(Self::ENTITY, obj, "newValue")?,
            original_value: mapping::req_nullable(Self::ENTITY, obj, "originalValue")?,
            attachment_info: mapping::req_nullable(Self::ENTITY, obj, "attachmentInfo")?,
            attribute_info: mapping::req_nullable(Self::ENTITY, obj, "attributeInfo")?,
            notification_info: mapping::req_nullable(Self::ENTITY, obj, "notificationInfo")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("field".into(), Value::from(self.field.clone()));
        if let Some(new_value) = &self.new_value {
            dict.insert("newValue".into(), new_value.clone());
        }
        if let Some(original_value) = &self.original_value {
            dict.insert("originalValue".into(), original_value.clone());
        }
        if let Some(attachment_info) = &self.attachment_info {
            dict.insert("attachmentInfo".into(), attachment_info.clone());
        }
        if let Some(attribute_info) = &self.attribute_info {
            dict.insert("attributeInfo".into(), attribute_info.clone());
        }
        if let Some(notification_info) = &self.notification_info {
            dict.insert("notificationInfo".into(), notification_info.clone());
        }
        dict
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub content: Option<String>,
    pub change_log: Vec<ChangeLog>,
    pub created_user: User,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub stars: Vec<Star>,
    /// Raw notification payloads, passed through untyped.
    pub notifications: Vec<Value>,
}

impl Mappable for Comment {
    const ENTITY: &'static str = "Comment";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            content: mapping::opt_str(Self::ENTITY, obj, "content")?,
            change_log: mapping::req_entities(Self::ENTITY, obj, "changeLog")?,
            created_user: mapping::req_entity(Self::ENTITY, obj, "createdUser")?,
            created: mapping::req_timestamp(Self::ENTITY, obj, "created")?,
            updated: mapping::req_timestamp(Self::ENTITY, obj, "updated")?,
            stars: mapping::req_entities(Self::ENTITY, obj, "stars")?,
            notifications: mapping::req_raw_array(Self::ENTITY, obj, "notifications")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        if let Some(content) = &self.content {
            dict.insert("content".into(), Value::from(content.clone()));
        }
        dict.insert("changeLog".into(), mapping::entities_to_value(&self.change_log));
        dict.insert(
            "createdUser".into(),
            mapping::entity_to_value(&self.created_user),
        );
        dict.insert("created".into(), Value::from(format_timestamp(self.created)));
        dict.insert("updated".into(), Value::from(format_timestamp(self.updated)));
        dict.insert("stars".into(), mapping::entities_to_value(&self.stars));
        dict.insert(
            "notifications".into(),
            Value::Array(self.notifications.clone()),
        );
        dict
    }
}

/// Fetch the statuses of a project, in display order as served.
///
/// `GET /projects/:project_id_or_key/statuses`
pub async fn get_project_statuses(
    client: &BacklogClient,
    project_id_or_key: &str,
) -> Result<Vec<Status>> {
    let encoded = urlencoding::encode(project_id_or_key);
    let value = client
        .fetch(&format!("projects/{encoded}/statuses"), &[])
        .await?;
    mapping::from_json_array(&value)
}

/// Fetch the issue types of a project.
///
/// `GET /projects/:project_id_or_key/issueTypes`
pub async fn get_project_issue_types(
    client: &BacklogClient,
    project_id_or_key: &str,
) -> Result<Vec<IssueType>> {
    let encoded = urlencoding::encode(project_id_or_key);
    let value = client
        .fetch(&format!("projects/{encoded}/issueTypes"), &[])
        .await?;
    mapping::from_json_array(&value)
}

/// Fetch the categories of a project.
///
/// `GET /projects/:project_id_or_key/categories`
pub async fn get_project_categories(
    client: &BacklogClient,
    project_id_or_key: &str,
) -> Result<Vec<Category>> {
    let encoded = urlencoding::encode(project_id_or_key);
    let value = client
        .fetch(&format!("projects/{encoded}/categories"), &[])
        .await?;
    mapping::from_json_array(&value)
}

/// Fetch the versions/milestones of a project.
///
/// `GET /projects/:project_id_or_key/versions`
pub async fn get_project_versions(
    client: &BacklogClient,
    project_id_or_key: &str,
) -> Result<Vec<Version>> {
    let encoded = urlencoding::encode(project_id_or_key);
    let value = client
        .fetch(&format!("projects/{encoded}/versions"), &[])
        .await?;
    mapping::from_json_array(&value)
}

/// Fetch the comments on an issue, in server order.
///
/// `GET /issues/:issue_id/comments`
pub async fn get_issue_comments(client: &BacklogClient, issue_id: u64) -> Result<Vec<Comment>> {
    let value = client
        .fetch(&format!("issues/{issue_id}/comments"), &[])
        .await?;
    mapping::from_json_array(&value)
}

/// Fetch a single comment.
///
/// `GET /issues/:issue_id/comments/:comment_id`
pub async fn get_issue_comment(
    client: &BacklogClient,
    issue_id: u64,
    comment_id: u64,
) -> Result<Comment> {
    let value = client
        .fetch(&format!("issues/{issue_id}/comments/{comment_id}"), &[])
        .await?;
    Comment::from_json(&value)
}

/// Count the comments on an issue.
///
/// `GET /issues/:issue_id/comments/count`
pub async fn get_issue_comment_count(client: &BacklogClient, issue_id: u64) -> Result<u64> {
    let value = client
        .fetch(&format!("issues/{issue_id}/comments/count"), &[])
        .await?;
    mapping::count_from_json(&value)
}
