//! Local user accounts: credentials, signup, and login.

pub mod model;
pub mod service;
pub mod validate;

pub use model::{UserCredential, UserView};
pub use service::AccountService;
