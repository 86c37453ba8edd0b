//! Admin session: stored token/user, sign-in, permission checks

pub mod api;
pub mod context;
pub mod guard;
pub mod storage;
