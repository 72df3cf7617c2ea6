pub mod user_models;
pub mod user_service;

pub use user_models::{
    encode_attributes, ApiErrorDetail, CreateUser, UpdateUser, UserStatus, VaultUser,
};
pub use user_service::UserService;
