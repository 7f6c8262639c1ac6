// Adapters layer: concrete implementations of the domain ports for external
// systems (geocoding backends, cache store, task queue).

pub mod backends;
pub mod cache;
pub mod queue;
