pub mod result;

pub use result::{InvocationResult, StoredObjectKey};
