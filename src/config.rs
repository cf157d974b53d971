use std::path::{Path, PathBuf};

/// Where CSVs are read from and where conversions land.
pub const DEFAULT_INPUT_DIR: &str = "web/public/cleaned";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub json_dir: PathBuf,
    pub xml_dir: PathBuf,
}

impl Config {
    /// `json/` and `xml/` sit next to `input_dir`, under its parent.
    pub fn from_input_dir(input_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        let parent = input_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            json_dir: parent.join("json"),
            xml_dir: parent.join("xml"),
            input_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_input_dir(DEFAULT_INPUT_DIR)
    }
}
