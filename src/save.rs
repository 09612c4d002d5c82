// Persistence of the single character kept per device.
use crate::catalog::CatalogLoader;
use crate::character::{Attributes, CharacterRecord};
use crate::error::{Result, SheetError};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const CHARACTER_FILE: &str = "myCharacter.json";

#[derive(Debug, Clone)]
pub struct CharacterStore {
    data_dir: PathBuf,
}

impl CharacterStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        CharacterStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(CHARACTER_FILE)
    }

    fn staging_path(&self) -> PathBuf {
        self.data_dir.join(format!("{CHARACTER_FILE}.tmp"))
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    // Read the eight attributes by name; key order in the file is irrelevant.
    pub fn load_attributes(&self) -> Result<Attributes> {
        let path = self.path();
        let data = fs::read_to_string(&path)
            .map_err(|e| SheetError::RecordRead(format!("{}: {e}", path.display())))
            .inspect_err(|e| log::error!("{e}"))?;
        let attributes: Attributes = serde_json::from_str(&data)
            .map_err(|e| SheetError::RecordRead(format!("{}: {e}", path.display())))
            .inspect_err(|e| log::error!("{e}"))?;
        log::debug!("load_attributes: {attributes:?}");
        Ok(attributes)
    }

    // Load the stored character and re-seed its skill sheet from the catalog.
    pub fn load(&self, catalog: &CatalogLoader) -> Result<CharacterRecord> {
        let attributes = self.load_attributes()?;
        CharacterRecord::builder()
            .attributes(&attributes)
            .skill_values(catalog.initialize_skill_value_map()?)
            .build()
    }

    // Overwrite the stored character. Only base attributes are written; skill
    // values are derived from the catalog again on load.
    pub fn save(&self, record: &CharacterRecord) -> Result<()> {
        // Written beside the target and renamed over it, so the old file stays
        // intact until the new one is complete.
        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.data_dir)?;
            let data = serde_json::to_string_pretty(record.attributes())?;
            let staging = self.staging_path();
            let mut file = File::create(&staging)?;
            file.write_all(data.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            drop(file);
            fs::rename(&staging, self.path()).inspect_err(|_| {
                let _ = fs::remove_file(&staging);
            })
        };
        write()
            .map_err(|e| SheetError::RecordWrite(format!("{}: {e}", self.path().display())))
            .inspect_err(|e| log::error!("{e}"))?;
        log::info!("Saved character to {}", self.path().display());
        Ok(())
    }

    // Remove the stored character. Nothing to remove is not an error.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => {
                log::info!("Deleted character at {}", self.path().display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SheetError::RecordWrite(format!(
                "{}: {e}",
                self.path().display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use tempfile::tempdir;

    fn record(values: [i32; 8]) -> CharacterRecord {
        let mut builder = CharacterRecord::builder();
        for (attribute, value) in Attribute::ALL.into_iter().zip(values) {
            builder = builder.attribute(attribute, value);
        }
        builder.build().unwrap()
    }

    #[test]
    fn exists_only_after_save() {
        let dir = tempdir().unwrap();
        let store = CharacterStore::new(dir.path().join("data"));
        assert!(!store.exists());
        store.save(&record([1, 2, 3, 4, 5, 6, 7, 8])).unwrap();
        assert!(store.exists());
        store.delete().unwrap();
        assert!(!store.exists());
        store.delete().unwrap();
    }

    #[test]
    fn reads_attributes_by_name() {
        let dir = tempdir().unwrap();
        let store = CharacterStore::new(dir.path());
        fs::write(
            store.path(),
            r#"{"kk":8,"ko":1,"ge":6,"ff":4,"ch":2,"in":7,"kl":3,"mu":5,"name":"ignored"}"#,
        )
        .unwrap();
        let attributes = store.load_attributes().unwrap();
        let expected = [5, 3, 7, 2, 4, 6, 1, 8];
        for (attribute, value) in Attribute::ALL.into_iter().zip(expected) {
            assert_eq!(attributes.get(attribute), value, "{attribute}");
        }
    }

    #[test]
    fn missing_attribute_is_a_read_error() {
        let dir = tempdir().unwrap();
        let store = CharacterStore::new(dir.path());
        fs::write(store.path(), r#"{"mu":5,"kl":3,"in":7}"#).unwrap();
        assert!(matches!(
            store.load_attributes(),
            Err(SheetError::RecordRead(_))
        ));
    }

    #[test]
    fn missing_or_malformed_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let store = CharacterStore::new(dir.path());
        assert!(matches!(
            store.load_attributes(),
            Err(SheetError::RecordRead(_))
        ));
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.load_attributes(),
            Err(SheetError::RecordRead(_))
        ));
    }

    #[test]
    fn save_replaces_the_file_whole() {
        let dir = tempdir().unwrap();
        let store = CharacterStore::new(dir.path());
        fs::write(store.path(), "x".repeat(4096)).unwrap();

        store.save(&record([1, 2, 3, 4, 5, 6, 7, 8])).unwrap();
        assert!(!store.staging_path().exists());
        assert_eq!(store.load_attributes().unwrap().kk, 8);
    }

    #[test]
    fn failed_save_keeps_the_old_file() {
        let dir = tempdir().unwrap();
        let store = CharacterStore::new(dir.path());
        store.save(&record([1, 2, 3, 4, 5, 6, 7, 8])).unwrap();
        let before = fs::read(store.path()).unwrap();

        // A directory in the staging slot makes the write fail before the rename.
        fs::create_dir(store.staging_path()).unwrap();
        assert!(matches!(
            store.save(&record([9, 9, 9, 9, 9, 9, 9, 9])),
            Err(SheetError::RecordWrite(_))
        ));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn save_of_load_is_byte_identical() {
        let dir = tempdir().unwrap();
        let store = CharacterStore::new(dir.path());
        store.save(&record([12, 13, 14, 11, 10, 12, 13, 9])).unwrap();
        let before = fs::read(store.path()).unwrap();

        let loaded = store.load(&CatalogLoader::bundled()).unwrap();
        store.save(&loaded).unwrap();
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }
}
