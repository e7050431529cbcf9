// Service exports
pub mod auth;
pub mod bus;
pub mod store;

pub use auth::{AuthError, Claims, TokenIssuer};
pub use bus::{BusEvent, InProcessBus, MessageBus};
pub use store::{MemoryStore, Store, StoreError, UserQuery};
