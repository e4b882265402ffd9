//! File-backed persistence for the authorized and subscribed chat lists

pub mod users;

pub use users::{load_ids, save_ids, UserStore};
