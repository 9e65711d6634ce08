//! Chunked stream-to-file copying.
//!
//! Bytes move through a fixed-size [`CopyBuffer`], so memory use stays bounded
//! no matter how large the input is. Writes are not atomic: a failure midway
//! leaves whatever was already written on disk.

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Read;
use std::io::Write;
use std::io::{self};
use std::path::Path;

use tracing::debug;
use tracing::error;

use crate::ExtractionError;
use crate::Result;
use crate::gate::is_readable;

/// Default chunk size for stream copies (4 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// How the destination file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Create the file, or truncate it if it exists.
    #[default]
    Truncate,
    /// Create the file, or append to it if it exists.
    Append,
}

impl WriteMode {
    fn open(self, path: &Path) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.create(true);
        match self {
            Self::Truncate => options.write(true).truncate(true),
            Self::Append => options.append(true),
        };
        options.open(path)
    }
}

/// Reusable fixed-size buffer for chunked copies.
///
/// # Examples
///
/// ```no_run
/// # use fileguard_core::copy::{CopyBuffer, copy_with_buffer};
/// # use fileguard_core::ExtractionError;
/// # fn example() -> Result<(), ExtractionError> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("input.txt")?;
/// let mut output = std::fs::File::create("output.txt")?;
///
/// let bytes_copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// println!("Copied {} bytes", bytes_copied);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a buffer of [`DEFAULT_BUFFER_SIZE`] bytes.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Creates a buffer of `size` bytes (at least one).
    #[must_use]
    pub fn with_capacity(size: usize) -> Self {
        Self {
            buf: vec![0u8; size.max(1)].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies everything from `reader` into `writer`, one buffer-sized chunk at a
/// time, and returns the number of bytes copied.
///
/// Interrupted reads are retried.
///
/// # Errors
///
/// Returns `ExtractionError::Io` if reading or writing fails and
/// `ExtractionError::CountOverflow` if the byte count overflows `u64`.
#[inline]
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExtractionError::Io(e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or(ExtractionError::CountOverflow)?;
    }

    Ok(total)
}

/// Streams `reader` into the file at `path` and returns the bytes written.
///
/// The file handle lives only inside this call and is closed on every exit
/// path, including when opening fails.
///
/// # Errors
///
/// Returns `ExtractionError::Write` if the file cannot be opened, the
/// stream cannot be read, or the data cannot be written.
pub fn try_write_stream_to_file<R: Read + ?Sized>(
    path: &Path,
    reader: &mut R,
    mode: WriteMode,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let write_err = |source: io::Error| ExtractionError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = mode.open(path).map_err(write_err)?;
    let written = match copy_with_buffer(reader, &mut file, buffer) {
        Ok(n) => n,
        Err(ExtractionError::Io(e)) => return Err(write_err(e)),
        Err(e) => return Err(e),
    };
    file.flush().map_err(write_err)?;

    debug!(path = %path.display(), bytes = written, ?mode, "wrote stream to file");
    Ok(written)
}

/// Streams `reader` into the file at `path`, returning `true` on success.
///
/// On failure the file may hold a partial write.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::copy::{WriteMode, write_stream_to_file};
/// use std::path::Path;
///
/// let mut data: &[u8] = b"hello";
/// assert!(write_stream_to_file(Path::new("out.txt"), &mut data, WriteMode::Truncate));
/// ```
pub fn write_stream_to_file<R: Read + ?Sized>(path: &Path, reader: &mut R, mode: WriteMode) -> bool {
    let mut buffer = CopyBuffer::new();
    match try_write_stream_to_file(path, reader, mode, &mut buffer) {
        Ok(_) => true,
        Err(e) => {
            error!(
                path = %path.display(),
                error = %e,
                "unexpected error while attempting to write to file"
            );
            false
        }
    }
}

/// Copies the contents of `src` over `dest`, replacing any existing content.
///
/// # Errors
///
/// Returns `ExtractionError::NotReadable` if `src` fails the readability
/// check, `ExtractionError::Io` if it cannot be opened, and
/// `ExtractionError::Write` if `dest` cannot be written.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    if !is_readable(Some(src)) {
        return Err(ExtractionError::NotReadable {
            path: src.to_path_buf(),
        });
    }

    let mut input = File::open(src)?;
    let mut buffer = CopyBuffer::new();
    try_write_stream_to_file(dest, &mut input, WriteMode::Truncate, &mut buffer)
}
