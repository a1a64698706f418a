#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod time;

pub use session::{GenerateRequest, Phase, Session, SessionError, Submission};
pub use time::Clock;
