//! Client side of the product API: an HTTP client, the state it feeds and
//! the container tying both together.

pub mod api;
pub mod container;
pub mod error;
pub mod state;

pub use api::{ProductApiClient, DEFAULT_API_URL};
pub use container::StateContainer;
pub use error::ClientError;
pub use state::{Action, ProductState};
