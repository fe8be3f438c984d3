pub use super::novels::Entity as Novels;
pub use super::users::Entity as Users;
pub use super::volumes::Entity as Volumes;
