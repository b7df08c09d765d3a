//! Attachment and shared-file models.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::mapping::{self, format_timestamp, Mappable};
use crate::models::user::User;

/// A file attached to an issue, comment, or wiki page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: u64,
    pub name: String,
    pub size: u64,
    pub created_user: User,
    pub created: DateTime<Utc>,
}

impl Mappable for Attachment {
    const ENTITY: &'static str = "Attachment";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            size: mapping::req_u64(Self::ENTITY, obj, "size")?,
            created_user: mapping::req_entity(Self::ENTITY, obj, "createdUser")?,
            created: mapping::req_timestamp(Self::ENTITY, obj, "created")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("size".into(), Value::from(self.size));
        dict.insert(
            "createdUser".into(),
            mapping::entity_to_value(&self.created_user),
        );
        dict.insert("created".into(), Value::from(format_timestamp(self.created)));
        dict
    }
}

/// A file in the project's shared file area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub id: u64,
    pub r#type: String,
    pub dir: String,
    pub name: String,
    pub size: u64,
    pub created_user: User,
    pub created: DateTime<Utc>,
    pub updated_user: User,
    pub updated: DateTime<Utc>,
}

impl Mappable for SharedFile {
    const ENTITY: &'static str = "SharedFile";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            r#type: mapping::req_str(Self::ENTITY, obj, "type")?,
            dir: mapping::req_str(Self::ENTITY, obj, "dir")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            size: mapping::req_u64(Self::ENTITY, obj, "size")?,
            created_user: mapping::req_entity(Self::ENTITY, obj, "createdUser")?,
            created: mapping::req_timestamp(Self::ENTITY, obj, "created")?,
            updated_user: mapping::req_entity(Self::ENTITY, obj, "updatedUser")?,
            updated: mapping::req_timestamp(Self::ENTITY, obj, "updated")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        dict.insert("type".into(), Value::from(self.r#type.clone()));
        dict.insert("dir".into(), Value::from(self.dir.clone()));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("size".into(), Value::from(self.size));
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
