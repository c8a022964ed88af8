// Place routes. Reads are public; create/update/delete sit behind the
// bearer-token middleware.

pub mod by_user;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use by_user::places_by_user_get;
pub use create::place_post;
pub use delete::place_delete;
pub use get::place_get;
pub use list::places_get;
pub use update::place_patch;
