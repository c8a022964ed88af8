// HTTP handlers, one file per route.

pub mod places;
pub mod users;
pub mod validate;
