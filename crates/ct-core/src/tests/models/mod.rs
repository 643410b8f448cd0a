mod concert_status;
mod role;
mod user;
