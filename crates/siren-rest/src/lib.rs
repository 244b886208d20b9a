//! siren-rest - REST-backed transport for the dispatch API.

mod calls;
mod client;
mod session;

pub use client::RestClient;
pub use session::SessionStore;
