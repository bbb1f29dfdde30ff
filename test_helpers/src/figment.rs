//! Scratch working directories for file-backed configuration tests.

use anyhow::{Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail changes into a fresh temporary directory and restores the working
/// directory and environment once the closure completes, even on error.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes a configuration document into the jail and returns its UTF-8 path
/// relative to the jail directory.
///
/// # Errors
///
/// Returns a [`figment::Error`] if the file cannot be written.
pub fn write_config(
    jail: &mut figment::Jail,
    name: &str,
    contents: &str,
) -> figment::error::Result<Utf8PathBuf> {
    jail.create_file(name, contents)
        .map_err(|err| figment_error(&err))?;
    Ok(Utf8Path::new(name).to_owned())
}

/// Converts any displayable error into a [`figment::Error`].
pub fn figment_error<E: ToString + ?Sized>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}
