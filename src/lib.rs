pub mod error;
pub mod model;
pub mod persist;
pub mod present;
pub mod reconcile;
pub mod remote;
pub mod session;
pub mod store;
pub mod sync;
pub mod workspace;
