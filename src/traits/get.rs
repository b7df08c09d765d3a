//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::BacklogClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (a numeric ID, or a key string for projects).
///
/// # Example
///
/// ```ignore
/// use backlog_api::{BacklogClient, Get, Project, Wiki};
///
/// let client = BacklogClient::from_env()?;
/// let project = Project::get(&client, "TEST".to_string()).await?;
/// let wiki = Wiki::get(&client, 1234567890).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be
    /// mapped.
    async fn get(client: &BacklogClient, id: Self::Id) -> Result<Self>;
}
