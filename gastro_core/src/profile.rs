//! User profile persistence with file locking.
//!
//! This module handles saving and loading the user's health profile
//! with proper file locking to prevent concurrent access issues.

use crate::{Error, Result, UserProfile};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl UserProfile {
    /// Load the profile from a file with shared locking
    ///
    /// Returns a default profile if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns a default profile.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No profile file found, using default profile");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open profile file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock profile file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read profile file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<UserProfile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", path);
                Ok(profile)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse profile file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save the profile to a file with exclusive locking
    ///
    /// Atomically writes the profile by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old profile file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", path);
        Ok(())
    }

    /// Load the profile, modify it, and save it back atomically
    ///
    /// This is a convenience method that handles the load-modify-save pattern
    /// with proper error handling.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut UserProfile) -> Result<()>,
    {
        let mut profile = Self::load(path)?;
        f(&mut profile)?;
        profile.save(path)?;
        Ok(profile)
    }
}
