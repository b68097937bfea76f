use crate::types::{CrawlError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// 写出图描述文件
///
/// 先写同目录临时文件, flush 成功后再 rename 覆盖目标; 失败时目标保持原样
pub fn write_diagram(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write = || -> std::io::Result<()> {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        // 临时文件默认 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    };

    write().map_err(|source| CrawlError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
