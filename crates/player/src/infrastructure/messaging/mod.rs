//! In-process messaging primitives used by the platform adapters.

mod listener_registry;

pub use listener_registry::ListenerRegistry;
