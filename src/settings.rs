// Application settings, stored as JSON next to the character file.
use crate::catalog::CatalogLoader;
use crate::error::{Result, SheetError};
use crate::save::CharacterStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data_dir: Option<PathBuf>, // Where the character and log live; home default when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>, // Replaces the bundled skills.json when set.
    #[serde(default)]
    pub debug_mode: bool,
}

impl Settings {
    // Default location: ~/dsa_sheet/data
    pub fn default_dir() -> Result<PathBuf> {
        dir::home_dir()
            .map(|home| home.join("dsa_sheet").join("data"))
            .ok_or(SheetError::NoHomeDirectory)
    }

    pub fn load() -> Result<Self> {
        Self::load_settings_from_file(Self::default_dir()?.join(SETTINGS_FILE))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to_file(Self::default_dir()?.join(SETTINGS_FILE))
    }

    // A missing file yields defaults; a malformed one is an error.
    pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| SheetError::Settings(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(SheetError::Settings(format!("{}: {e}", path.display()))),
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let write = || -> std::io::Result<()> {
            let data = serde_json::to_string_pretty(self)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = fs::File::create(path)?;
            file.write_all(data.as_bytes())
        };
        write().map_err(|e| SheetError::Settings(format!("{}: {e}", path.display())))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_dir(),
        }
    }

    pub fn catalog(&self) -> CatalogLoader {
        match &self.catalog_path {
            Some(path) => CatalogLoader::from_file(path),
            None => CatalogLoader::bundled(),
        }
    }

    pub fn store(&self) -> Result<CharacterStore> {
        Ok(CharacterStore::new(self.data_dir()?))
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug_mode {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
