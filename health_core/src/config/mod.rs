pub mod settings;

pub use settings::{CheckKind, CheckSpec, ComponentConfig, HealthConfig, ServerConfig, SystemConfig};
