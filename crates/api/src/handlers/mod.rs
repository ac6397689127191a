pub mod auth;
pub mod blog;
pub mod email;
pub mod hero;
pub mod media;
pub mod pages;
pub mod subscribers;
pub mod teaching;
pub mod unsubscribe;
