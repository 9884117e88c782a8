//! Layered-settings scenarios run inside a `figment::Jail`.
//!
//! The jail gives each test a private working directory and environment, so
//! a settings file and `LOCALE_CATALOG_*` variables never leak between tests.

use std::fmt::Display;

use anyhow::{Result, anyhow};
use camino::Utf8Path;

/// File name used for the settings layer written by [`load_in_jail`].
pub const CONFIG_FILE: &str = "locale.toml";

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
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

/// Writes an optional settings file and environment, then calls `load`.
///
/// `load` receives the path of the settings file when `config` was given.
///
/// # Examples
///
/// ```rust
/// use locale_catalog_test_helpers::jail::load_in_jail;
///
/// let seen = load_in_jail(
///     Some("default_locale = \"zh\"\n"),
///     &[("LOCALE_CATALOG_ESCAPING", "verbatim")],
///     |path| Ok::<_, std::io::Error>(path.map(|p| p.to_string())),
/// )?;
/// assert_eq!(seen.as_deref(), Some("locale.toml"));
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be written or `load` fails.
pub fn load_in_jail<T, E, F>(config: Option<&str>, env: &[(&str, &str)], load: F) -> Result<T>
where
    E: Display,
    F: FnOnce(Option<&Utf8Path>) -> std::result::Result<T, E>,
{
    with_jail(|jail| {
        if let Some(contents) = config {
            jail.create_file(CONFIG_FILE, contents)?;
        }
        for (name, value) in env {
            jail.set_env(name, value);
        }
        let path = config.map(|_| Utf8Path::new(CONFIG_FILE));
        load(path).map_err(jail_error)
    })
}

/// Converts a loader failure into a [`figment::Error`] so it can cross the
/// jail boundary.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a map_err adaptor, which hands over ownership"
)]
pub fn jail_error<E: Display>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
