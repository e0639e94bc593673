//! SeaORM entity modules for the account service.

pub mod user;

pub mod prelude {
    pub use super::user::Entity as User;
}
