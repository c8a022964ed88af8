pub mod place;
pub mod user;

pub use place::{Coordinates, NewPlace, Place};
pub use user::{NewUser, User};
