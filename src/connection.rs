//! Connection Module
//!
//! Binds an in-memory `Store` to its backing file and owns the load/persist
//! protocol.
//!
//! ## Lifecycle
//! 1. `open` in create mode (truncate, fresh store) or edit mode (load image)
//! 2. Operations read and mutate the in-memory store
//! 3. `persist` rewrites the whole image and flushes it
//! 4. `close` releases the file handle and the store
//!
//! Nothing is written implicitly: a connection dropped without `persist`
//! leaves the file exactly as the last persist (or open) left it.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, SlotError};
use crate::image;
use crate::store::Store;

/// How the backing file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create or truncate the file, start from an all-free store
    Create,

    /// Open an existing file read/write and load its image
    Edit,
}

/// An open database: one store, one file handle
///
/// ## Concurrency
/// Single-threaded. No file locking is done, so two connections (in this or
/// another process) on the same file overwrite each other's images.
#[derive(Debug)]
pub struct Connection {
    /// Backing file path (for logging and error context)
    path: PathBuf,

    /// Mode the connection was opened in
    mode: OpenMode,

    /// Backing file, open read/write
    file: File,

    /// The whole database, exclusively owned
    store: Store,

    /// Sizing and format
    config: Config,
}

impl Connection {
    /// Open a connection on `path`.
    ///
    /// On open:
    /// 1. Validate the config
    /// 2. Open the file (create mode truncates, edit mode requires it to exist)
    /// 3. Create mode allocates a fresh store; edit mode decodes the image
    ///    from the start of the file
    pub fn open(path: impl AsRef<Path>, mode: OpenMode, config: Config) -> Result<Self> {
        config.validate()?;

        let path = path.as_ref().to_path_buf();

        let mut options = OpenOptions::new();
        options.read(true).write(true);
        if mode == OpenMode::Create {
            options.create(true).truncate(true);
        }

        let mut file = options.open(&path).map_err(|source| SlotError::Open {
            path: path.clone(),
            source,
        })?;

        let store = match mode {
            OpenMode::Create => Store::new(config.max_rows)?,
            OpenMode::Edit => Self::read_image(&mut file, &path, &config)?,
        };

        let conn = Self {
            path,
            mode,
            file,
            store,
            config,
        };

        tracing::debug!(
            path = %conn.path.display(),
            mode = ?conn.mode,
            occupied = conn.store.occupied_count(),
            "connection opened"
        );

        Ok(conn)
    }

    /// Open with the default config
    pub fn open_path(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        Self::open(path, mode, Config::default())
    }

    /// Replace the in-memory store with the image on disk.
    ///
    /// The file must hold exactly one image; a short, long or empty file is
    /// `SlotError::Corruption`. On failure the in-memory store is untouched.
    pub fn load(&mut self) -> Result<()> {
        self.store = Self::read_image(&mut self.file, &self.path, &self.config)?;
        Ok(())
    }

    /// Read and decode exactly one image from the start of `file`
    fn read_image(file: &mut File, path: &Path, config: &Config) -> Result<Store> {
        let expected = image::image_len(config);

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(expected + 1).map_err(|e| {
            SlotError::Allocation(format!("cannot reserve {} bytes for image: {}", expected, e))
        })?;

        file.seek(SeekFrom::Start(0))?;
        // One byte past the image is enough to tell an oversized file apart
        file.take(expected as u64 + 1).read_to_end(&mut bytes)?;

        let store = image::decode(&bytes, config)?;

        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            occupied = store.occupied_count(),
            "image loaded"
        );

        Ok(store)
    }

    /// Write the whole store to the start of the file and flush it.
    ///
    /// Steps:
    /// 1. Encode the image
    /// 2. Seek to 0 and write it
    /// 3. Cut the file to the image length
    /// 4. Flush, then fsync if `sync_on_persist`
    pub fn persist(&mut self) -> Result<()> {
        let image = image::encode(&self.store, &self.config)?;

        self.file.seek(SeekFrom::Start(0)).map_err(SlotError::Write)?;
        self.file.write_all(&image).map_err(SlotError::Write)?;
        self.file
            .set_len(image.len() as u64)
            .map_err(SlotError::Write)?;

        self.file.flush().map_err(SlotError::Flush)?;
        if self.config.sync_on_persist {
            self.file.sync_data().map_err(SlotError::Flush)?;
        }

        tracing::debug!(
            path = %self.path.display(),
            bytes = image.len(),
            occupied = self.store.occupied_count(),
            "image persisted"
        );

        Ok(())
    }

    /// Release the file handle and the store. Writes nothing.
    pub fn close(self) {
        tracing::debug!(path = %self.path.display(), "connection closed");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode the connection was opened in
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Sizing and format
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The in-memory store
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }
}
