pub mod ids;
pub mod phone;
pub mod user;

pub use ids::UserId;
pub use phone::{normalize_phone, phone_match_suffix, phone_variants};
pub use user::User;
