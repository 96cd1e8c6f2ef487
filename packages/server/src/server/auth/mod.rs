pub mod session;

pub use session::{AdminSession, SessionStore};
