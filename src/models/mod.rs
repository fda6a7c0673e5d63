pub mod config;

pub use config::{
    parse_bounds, AppConfig, ConfigOverrides, GridConfig, RoleConfig, SwatchConfig,
    TransferConfig, TransferMode, DEFAULT_CONFIG_YAML,
};
