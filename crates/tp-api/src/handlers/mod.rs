//! # Handlers
//!
//! Thin endpoint functions: authenticate, validate, one repo call,
//! envelope. Anything stateful lives behind the ports in `AppState`.

pub mod engagement;
pub mod posts;
pub mod users;
