pub mod auth;
pub mod images;
pub mod pages;
pub mod site;
pub mod users;
