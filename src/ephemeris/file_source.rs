//! Timestamp tables read from disk on demand.
//!
//! Opening a [`FileSource`] reads only the 16-byte header. Each timestamp is
//! then fetched with one seek to `HEADER_SIZE + index * 8` followed by an
//! 8-byte read, so arbitrarily large tables cost no memory.
//!
//! The file cursor is shared mutable state kept in a `RefCell`: a
//! [`FileSource`] is `Send` but not `Sync`.
use std::{
    cell::RefCell,
    fs::File,
    io::{BufReader, ErrorKind, Read, Seek, SeekFrom},
};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::{
    constants::{EntryIndex, UnixSeconds, ENTRY_SIZE, HEADER_SIZE},
    fractonica_errors::FractonicaError,
};

use super::{header::EphemHeader, TimestampSource};

/// An open `.bin` ephemeris table.
///
/// Queries go through a shared cursor, so a `FileSource` cannot be shared
/// between threads; open one per thread instead.
///
/// ```compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<fractonica::ephemeris::FileSource>();
/// ```
#[derive(Debug)]
pub struct FileSource {
    path: Utf8PathBuf,
    header: EphemHeader,
    reader: RefCell<BufReader<File>>,
}

impl FileSource {
    /// Open a table and read its header.
    ///
    /// The magic word is **not** validated; use [`Self::open_checked`] to reject
    /// foreign files.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: location of the `.bin` file.
    ///
    /// Return
    /// ----------
    /// * The open source, [`FractonicaError::IoError`] if the file cannot be
    ///   opened, or [`FractonicaError::InvalidHeader`] if it is shorter than the header.
    ///
    /// See also
    /// ------------
    /// * [`crate::ephemeris::writer::write_ephemeris_file`] – Produces files readable here.
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, FractonicaError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);

        let mut buffer = [0u8; HEADER_SIZE];
        reader.read_exact(&mut buffer).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                FractonicaError::InvalidHeader(format!(
                    "{path} is shorter than the {HEADER_SIZE}-byte header"
                ))
            } else {
                FractonicaError::IoError(err)
            }
        })?;

        let (_, header) = EphemHeader::parse(&buffer)
            .map_err(|err| FractonicaError::InvalidHeader(err.to_string()))?;

        debug!(
            %path,
            entries = header.entry_count,
            magic = header.magic,
            "opened ephemeris table"
        );

        Ok(FileSource {
            path: path.to_path_buf(),
            header,
            reader: RefCell::new(reader),
        })
    }

    /// Same as [`Self::open`], but fails with [`FractonicaError::UnknownMagic`]
    /// when the header does not carry the `FRAC` magic.
    pub fn open_checked(path: impl AsRef<Utf8Path>) -> Result<Self, FractonicaError> {
        let source = Self::open(path)?;
        if !source.header.has_valid_magic() {
            return Err(FractonicaError::UnknownMagic(source.header.magic));
        }
        Ok(source)
    }

    pub fn header(&self) -> &EphemHeader {
        &self.header
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Release the file handle. Dropping the source has the same effect.
    pub fn close(self) {
        debug!(path = %self.path, "closed ephemeris table");
    }

    fn read_entry(&self, index: EntryIndex) -> std::io::Result<UnixSeconds> {
        let offset = HEADER_SIZE as u64 + u64::from(index) * ENTRY_SIZE as u64;
        let mut reader = self
            .reader
            .try_borrow_mut()
            .map_err(|_| std::io::Error::new(ErrorKind::WouldBlock, "file cursor already in use"))?;

        reader.seek(SeekFrom::Start(offset))?;
        let mut buffer = [0u8; ENTRY_SIZE];
        reader.read_exact(&mut buffer)?;
        Ok(UnixSeconds::from_le_bytes(buffer))
    }
}

impl TimestampSource for FileSource {
    fn entry_count(&self) -> EntryIndex {
        self.header.entry_count
    }

    fn timestamp(&self, index: EntryIndex) -> Option<UnixSeconds> {
        if index >= self.header.entry_count {
            return None;
        }
        match self.read_entry(index) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(path = %self.path, index, %err, "failed to read ephemeris entry");
                None
            }
        }
    }
}
