pub mod ajax;
pub mod auth;
pub mod health;
pub mod pages;
