//! Process-wide state and lifecycle primitives.

mod state;

pub use state::{
    is_serving, is_shutdown, register_server, set_serving, setup_shutdown_handler,
};

/// Build flavor: development keeps bundles readable and injects the reload
/// client, production minifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}
