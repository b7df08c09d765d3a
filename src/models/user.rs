//! User model and user endpoints.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::mapping::{self, Mappable};
use crate::traits::Get;

/// A linked Nulab account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NulabAccount {
    pub nulab_id: String,
    pub name: String,
    pub unique_id: String,
}

impl Mappable for NulabAccount {
    const ENTITY: &'static str = "NulabAccount";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            nulab_id: mapping::req_str(Self::ENTITY, obj, "nulabId")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            unique_id: mapping::req_str(Self::ENTITY, obj, "uniqueId")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("nulabId".into(), Value::from(self.nulab_id.clone()));
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("uniqueId".into(), Value::from(self.unique_id.clone()));
        dict
    }
}

/// A Backlog user.
///
/// Several payload variants exist for the same user: the embedded form
/// inside attachments and wikis omits `keyword` and `nulabAccount`
/// entirely, so those tolerate absence as well as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    /// Login name. Absent for some service accounts.
    pub user_id: Option<String>,
    pub name: String,
    pub role_type: i64,
    pub lang: Option<String>,
    pub mail_address: String,
    pub nulab_account: Option<NulabAccount>,
    pub keyword: Option<String>,
}

impl Mappable for User {
    const ENTITY: &'static str = "User";

    fn from_json(value: &Value) -> Result<Self> {
        let obj = mapping::as_object(Self::ENTITY, value)?;
        Ok(Self {
            id: mapping::req_u64(Self::ENTITY, obj, "id")?,
            user_id: mapping::opt_str(Self::ENTITY, obj, "userId")?,
            name: mapping::req_str(Self::ENTITY, obj, "name")?,
            role_type: mapping::req_i64(Self::ENTITY, obj, "roleType")?,
            lang: mapping::opt_str(Self::ENTITY, obj, "lang")?,
            mail_address: mapping::req_str(Self::ENTITY, obj, "mailAddress")?,
            nulab_account: mapping::opt_entity(obj, "nulabAccount")?,
            keyword: mapping::opt_str(Self::ENTITY, obj, "keyword")?,
        })
    }

    fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".into(), Value::from(self.id));
        if let Some(user_id) = &self.user_id {
            dict.insert("userId".into(), Value::from(user_id.clone()));
        }
        dict.insert("name".into(), Value::from(self.name.clone()));
        dict.insert("roleType".into(), Value::from(self.role_type));
        if let Some(lang) = &self.lang {
            dict.insert("lang".into(), Value::from(lang.clone()));
        }
        dict.insert("mailAddress".into(), Value::from(self.mail_address.clone()));
        if let Some(account) = &self.nulab_account {
            dict.insert("nulabAccount".into(), mapping::entity_to_value(account));
        }
        if let Some(keyword) = &self.keyword {
            dict.insert("keyword".into(), Value::from(keyword.clone()));
        }
        dict
    }
}

#[async_trait]
impl Get for User {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &BacklogClient, id: u64) -> Result<Self> {
        let value = client.fetch(&format!("users/{id}"), &[]).await?;
        User::from_json(&value)
    }
}

/// Fetch every user in the space.
///
/// `GET /users`
pub async fn get_users(client: &BacklogClient) -> Result<Vec<User>> {
    let value = client.fetch("users", &[]).await?;
    mapping::from_json_array(&value)
}

/// Fetch the user owning the API key.
///
/// `GET /users/myself`
pub async fn get_own_user(client: &BacklogClient) -> Result<User> {
    let value = client.fetch("users/myself", &[]).await?;
    User::from_json(&value)
}
