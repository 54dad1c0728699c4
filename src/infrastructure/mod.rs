pub mod latency;
pub mod session_store;

pub use latency::SimulatedLatency;
pub use session_store::SessionStore;
