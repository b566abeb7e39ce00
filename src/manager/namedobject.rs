use serde::Deserialize;

/// Only the `name` field of a JSON definition; the rest is left to the
/// per-type parser.
#[derive(Clone, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}
