mod claims;
mod role;
mod user;

pub use claims::*;
pub use role::*;
pub use user::*;
