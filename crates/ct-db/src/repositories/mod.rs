pub mod concert_repository;
pub mod user_repository;
