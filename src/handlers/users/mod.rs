// User routes: list, signup, login. All public.

pub mod list;
pub mod login;
pub mod register;

pub use list::users_get;
pub use login::login_post;
pub use register::signup_post;
