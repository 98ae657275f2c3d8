pub mod state;

pub use state::StateStore;
