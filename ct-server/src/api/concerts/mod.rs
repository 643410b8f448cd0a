pub mod concert_dto;
pub mod concerts;
pub mod create_concert_request;
