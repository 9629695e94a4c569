// File Metadata (AVU triples attached to transferred files)

use serde::{Deserialize, Serialize};

/// Attribute/value/unit annotation applied to uploaded files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(rename = "attr")]
    pub attribute: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
}

impl FileMetadata {
    pub fn new(
        attribute: impl Into<String>,
        value: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Render as a `-m attr,value,unit` flag pair
    pub fn argument(&self) -> [String; 2] {
        [
            "-m".to_string(),
            format!("{},{},{}", self.attribute, self.value, self.unit),
        ]
    }
}

/// Flattens metadata collections into transfer-tool arguments
pub trait MetadataArgs {
    /// Every entry's [`FileMetadata::argument`], in collection order
    fn file_metadata_arguments(&self) -> Vec<String>;
}

impl MetadataArgs for [FileMetadata] {
    fn file_metadata_arguments(&self) -> Vec<String> {
        self.iter().flat_map(FileMetadata::argument).collect()
    }
}
