//! Configuration schema and loader.
//!
//! Settings are layered: struct defaults, an optional TOML file, then
//! `PLAYLOG__*` environment variables.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;

impl Settings {
    /// Render the effective settings as TOML (for `--print-config`).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
