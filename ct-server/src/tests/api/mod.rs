mod concerts;
mod health;
mod users;
