mod signup;
pub use signup::SignUp;

mod board;
pub use board::Board;

mod detail;
pub use detail::Detail;

mod not_found;
pub use not_found::NotFound;
