pub mod concert;
pub mod concert_status;
pub mod role;
pub mod user;
