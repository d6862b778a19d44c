use crate::error::Res;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Res<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .context(format!("Unable to write to {}", path.to_string_lossy()))
}

/// Read a file to a `String`.
pub(crate) async fn read(path: &Path) -> Res<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Deserialize a JSON file into type `T`.
pub(crate) async fn deserialize<T>(path: &Path) -> Res<T>
where
    T: DeserializeOwned,
{
    let content = read(path).await?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Create a directory and any missing parents.
pub(crate) async fn make_dir(path: &Path) -> Res<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Unable to create directory at {}", path.to_string_lossy()))
}

/// Resolve a path to its absolute, symlink free form. The path must exist.
pub(crate) async fn canonicalize(path: &Path) -> Res<PathBuf> {
    tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("Unable to canonicalize the path {}", path.to_string_lossy()))
}

/// Write to a sibling temp file and then rename it over `path` so that readers never see a
/// partially written file.
pub(crate) async fn replace(path: &Path, contents: impl AsRef<[u8]>) -> Res<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("The path {} has no file name", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await.with_context(|| {
        format!(
            "Unable to move file from '{}' to '{}'",
            tmp.to_string_lossy(),
            path.to_string_lossy()
        )
    })
}

/// Formats an amount with thousands separators and two decimals, e.g. `₹1,234.50`.
pub(crate) fn format_amount(currency: &str, value: f64) -> String {
    if !value.is_finite() {
        return format!("{currency}{value}");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{sign}{currency}{}",
        format_num::format_num!(",.2", value.abs())
    )
}
