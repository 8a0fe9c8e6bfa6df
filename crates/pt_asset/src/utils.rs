use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

pub fn combine_path(directory: &Path, file_name: &str, extension: &str) -> PathBuf {
    directory.join(format!("{}.{}", file_name, extension))
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|x| x.to_str())
        .map_or(false, |x| x.eq_ignore_ascii_case(extension))
}

pub fn write_file(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create directory: {}", parent.display()))?;
    }

    let mut buffer = File::create(target)
        .with_context(|| format!("Could not create file: {}", target.display()))?;
    buffer
        .write_all(data)
        .with_context(|| format!("Could not write data to file: {}", target.display()))?;
    Ok(())
}
