pub mod admin;
pub mod items;
pub mod uploads;
pub mod users;
