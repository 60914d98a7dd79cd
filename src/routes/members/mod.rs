mod delete_member;
mod list_members;
mod update_member_role;

pub use delete_member::*;
pub use list_members::*;
pub use update_member_role::*;
