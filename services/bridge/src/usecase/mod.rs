pub mod app_password;
pub mod bridge_login;
pub mod token;
