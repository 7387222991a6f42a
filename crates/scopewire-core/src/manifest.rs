//! Raw manifest layer: 1:1 mapping to the JSON catalogue format.
//!
//! ```json
//! {
//!   "modules": ["App"],
//!   "instantiables": [
//!     { "type": "Root", "aliases": ["RootProtocol"], "slots": [
//!         { "label": "x", "type": "X", "role": "singleton" } ] }
//!   ]
//! }
//! ```

use crate::catalogue::{Catalogue, CatalogueError, Instantiable};
use crate::identity::TypeIdentity;
use crate::slot::{Role, Slot};
use crate::syntax::TypeParseError;

/// Raw manifest document.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct RawManifest {
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub instantiables: Vec<RawInstantiable>,
}

/// Raw instantiable entry; type text is parsed later.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct RawInstantiable {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub slots: Vec<RawSlot>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct RawSlot {
    pub label: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid type `{text}`: {source}")]
    InvalidType {
        text: String,
        #[source]
        source: TypeParseError,
    },

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

/// Parse manifest JSON content.
pub fn parse_manifest(json: &str) -> Result<RawManifest, serde_json::Error> {
    serde_json::from_str(json)
}

impl RawManifest {
    /// Parse every type string and build a catalogue.
    pub fn into_catalogue(self) -> Result<Catalogue, ManifestError> {
        let mut catalogue = Catalogue::new();
        for module in self.modules {
            catalogue.add_module(module);
        }
        for raw in self.instantiables {
            catalogue.insert(raw.into_instantiable()?)?;
        }
        Ok(catalogue)
    }
}

impl RawInstantiable {
    pub fn into_instantiable(self) -> Result<Instantiable, ManifestError> {
        let mut instantiable = Instantiable::new(parse(&self.type_name)?);
        for alias in &self.aliases {
            instantiable.aliases.push(parse(alias)?);
        }
        for slot in self.slots {
            let ty = parse(&slot.type_name)?;
            instantiable.slots.push(Slot::new(slot.label, ty, slot.role));
        }
        Ok(instantiable)
    }
}

fn parse(text: &str) -> Result<TypeIdentity, ManifestError> {
    TypeIdentity::parse(text).map_err(|source| ManifestError::InvalidType {
        text: text.to_owned(),
        source,
    })
}

/// Load a catalogue straight from manifest JSON.
pub fn load_catalogue(json: &str) -> Result<Catalogue, ManifestError> {
    parse_manifest(json)?.into_catalogue()
}
