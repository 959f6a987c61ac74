//! Identity and per-tab session management for the tracker client.
//! Keep the public surface thin and split implementation across sub-modules.

mod role;
mod profile;
mod session;

pub use role::Role;
pub use profile::{ProfileStore, ProfileUpdate, UserProfile};
pub use session::{LoginSuccess, SessionStore};
