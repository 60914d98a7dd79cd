mod data_stores;
mod error;
mod member;
mod project;
mod task;
mod user_directory;
mod user_id;
mod workspace;

pub use data_stores::*;
pub use error::*;
pub use member::*;
pub use project::*;
pub use task::*;
pub use user_directory::*;
pub use user_id::*;
pub use workspace::*;
