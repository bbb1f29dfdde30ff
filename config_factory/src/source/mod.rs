//! Providers that turn a path or label into a readable byte stream.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Opens configuration sources by path or label.
pub trait ConfigurationSourceProvider {
    /// Returns a stream over the source named `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the source does not exist or cannot be
    /// opened.
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;
}

impl<P: ConfigurationSourceProvider + ?Sized> ConfigurationSourceProvider for &P {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        (**self).open(path)
    }
}

/// Reads sources from the filesystem.
///
/// Relative paths resolve against the working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSourceProvider;

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

impl ConfigurationSourceProvider for FileSourceProvider {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let file_path = Utf8Path::new(path);
        let file_name = file_path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot determine file name for configuration path",
            )
        })?;
        let dir = Dir::open_ambient_dir(parent_or_dot(file_path), ambient_authority())?;
        let file = dir.open(file_name)?;
        Ok(Box::new(file.into_std()))
    }
}

/// Serves in-memory documents keyed by label.
///
/// # Examples
///
/// ```
/// use std::io::Read;
///
/// use config_factory::{ConfigurationSourceProvider, InlineSourceProvider};
///
/// let provider = InlineSourceProvider::new().with("defaults", "name: Coda Hale\n");
/// let mut text = String::new();
/// provider.open("defaults")?.read_to_string(&mut text)?;
/// assert_eq!(text, "name: Coda Hale\n");
/// assert!(provider.open("missing").is_err());
/// # Ok::<_, std::io::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct InlineSourceProvider {
    documents: BTreeMap<String, String>,
}

impl InlineSourceProvider {
    /// Creates a provider with no documents.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            documents: BTreeMap::new(),
        }
    }

    /// Registers `contents` under `label`, replacing any earlier document.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(label, contents);
        self
    }

    /// Registers `contents` under `label`, returning the document it replaced.
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        contents: impl Into<String>,
    ) -> Option<String> {
        self.documents.insert(label.into(), contents.into())
    }
}

impl ConfigurationSourceProvider for InlineSourceProvider {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let contents = self.documents.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no inline configuration named '{path}'"),
            )
        })?;
        Ok(Box::new(Cursor::new(contents.as_bytes())))
    }
}
