//! Backlog API client library.
//!
//! A Rust library for the Backlog project-tracking REST API. The client
//! authenticates with an API key, derives the space base URL from a
//! space key and region, and maps JSON responses into strongly typed,
//! immutable domain values.
//!
//! # Quick Start
//!
//! ```no_run
//! use backlog_api::{get_space, get_wikis, BacklogClient, Get, Project, SpaceRegion};
//!
//! #[tokio::main]
//! async fn main() -> backlog_api::Result<()> {
//!     let client = BacklogClient::new("your-space", SpaceRegion::Jp, "your-api-key")?;
//!
//!     let space = get_space(&client).await?;
//!     println!("Space: {}", space.name);
//!
//!     let project = Project::get(&client, "TEST".to_string()).await?;
//!     println!("Project: {}", project.name);
//!
//!     let wikis = get_wikis(&client, "TEST", None).await?;
//!     println!("Found {} wiki pages", wikis.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Two layers:
//!
//! - [`BacklogClient`] builds endpoint URLs, appends the API key, and
//!   issues one GET request per operation.
//! - The mapping layer ([`Mappable`]) converts each JSON payload into
//!   one typed entity, explicitly field by field: required keys fail
//!   loudly when absent, optional keys distinguish `null`/absence from
//!   empty values, timestamps use a fixed UTC wire format, and the
//!   [`Priority`]/[`Resolution`] enumerations are closed integer-keyed
//!   tables.
//!
//! Entities that can be fetched individually ([`Project`], [`Wiki`],
//! [`User`]) implement the [`Get`] trait; collection and count endpoints
//! are free functions such as [`get_project_users`] or
//! [`get_issue_comment_count`].
//!
//! # Configuration
//!
//! [`BacklogClient::from_env`] reads:
//!
//! - `BACKLOG_SPACE_KEY` (required)
//! - `BACKLOG_API_KEY` (required)
//! - `BACKLOG_SPACE_REGION` (optional, one of `jp`, `com`, `tool`;
//!   defaults to `jp`)

mod client;
mod error;
mod mapping;
mod models;
mod traits;

// Re-export core types
pub use client::{BacklogClient, SpaceRegion};
pub use error::{BacklogError, Result};
pub use mapping::{
    count_from_json, format_timestamp, from_json_array, parse_timestamp, Mappable,
    DATETIME_FORMAT,
};

// Re-export traits
pub use traits::Get;

// Re-export models
pub use models::{
    Attachment,
    Category,
    ChangeLog,
    Comment,
    IssueType,
    NulabAccount,
    Priority,
    Project,
    Resolution,
    SharedFile,
    Space,
    Star,
    Status,
    Tag,
    User,
    Version,
    Wiki,
};

// Re-export endpoint operations
pub use models::{
    get_issue_comment, get_issue_comment_count, get_issue_comments, get_own_user,
    get_priorities, get_project_administrators, get_project_categories,
    get_project_issue_types, get_project_statuses, get_project_users,
    get_project_versions, get_projects, get_resolutions, get_space,
    get_user_received_star_count, get_user_received_stars, get_users,
    get_wiki_attachments, get_wiki_count, get_wiki_shared_files, get_wikis,
};
