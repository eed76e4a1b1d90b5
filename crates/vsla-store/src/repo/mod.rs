pub mod users;

pub use users::{UserNew, UserUpdate, UsersRepo};
