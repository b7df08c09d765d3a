//! Space model and the space endpoint.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::mapping::{self, format_timestamp, Mappable};

/// The top-level tenant unit in Backlog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub space_key: String,
    pub name: String,
    pub owner_id: u64,
    pub lang: String,
    pub timezone: String,
    pub report_send_time: String,
    pub text_formatting_rule: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Mappable for Space {
    const ENTITY: &'static str = "Space";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            space_key: mapping::req_str(Self::ENTITY, obj, "spaceKey")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            owner_id: mapping::req_u64(Self::ENTITY, obj, "ownerId")?,
            lang: mapping::req_str(Self::ENTITY, obj, "lang")?,
            timezone: mapping::req_str(Self::ENTITY, obj, "timezone")?,
            report_send_time: mapping::req_str(Self::ENTITY, obj, "reportSendTime")?,
            text_formatting_rule: mapping::req_str(Self::ENTITY, obj, "textFormattingRule")?,
            created: mapping::req_timestamp(Self::ENTITY, obj, "created")?,
            updated: mapping::req_timestamp(Self::ENTITY, obj, "updated")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("spaceKey".into(), Value::from(self.space_key.clone()));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("ownerId".into(), Value::from(self.owner_id));
        dict.insert("lang".into(), Value::from(self.lang.clone()));
        dict.insert("timezone".into(), Value::from(self.timezone.clone()));
        dict.insert(
            "reportSendTime".into(),
            Value::from(self.report_send_time.clone()),
        );
        dict.insert(
            "textFormattingRule".into(),
            Value::from(self.text_formatting_rule.clone()),
        );
        dict.insert("created".into(), Value::from(format_timestamp(self.created)));
        dict.insert("updated".into(), Value::from(format_timestamp(self.updated)));
        dict
    }
}

/// Fetch the space the API key belongs to.
///
/// `GET /space`
pub async fn get_space(client: &BacklogClient) -> Result<Space> {
    let value = client.fetch("space", &[]).await?;
    Space::from_json(&value)
}
