//! Backlog API model types and endpoint operations.

mod enums;
mod file;
mod issue;
mod project;
mod space;
mod star;
mod user;
mod wiki;

pub use enums::*;
pub use file::*;
pub use issue::*;
pub use project::*;
pub use space::*;
pub use star::*;
pub use user::*;
pub use wiki::*;
