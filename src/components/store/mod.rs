pub mod actor;

pub use actor::{keys, Collection, StoreActor, StoreHandle};
