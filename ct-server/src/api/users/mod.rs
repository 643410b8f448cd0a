pub mod list_users_query;
pub mod update_user_request;
pub mod user_dto;
pub mod users;
