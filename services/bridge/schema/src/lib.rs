//! sea-orm entities for the bridge service database.

pub mod app_passwords;
pub mod users;
