use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Persists one GPX track file per direction under a fixed directory,
/// keyed by a deterministic name derived from the direction's identifiers.
#[derive(Clone)]
pub struct AttachmentStore {
    dir: PathBuf,
}

impl AttachmentStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn create_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    fn derive_path(&self, route_name: &str, direction: &str, sub_name: Option<&str>) -> PathBuf {
        let file_name = format!(
            "{}__{}__{}.gpx",
            route_name.replace(' ', "_"),
            direction.replace(' ', "_"),
            sub_name.unwrap_or("").replace(' ', "_"),
        );
        self.dir.join(file_name)
    }

    /// Writes the GPX text, overwriting any previous file for the same
    /// (route, direction, sub) triple. Returns `None` without touching the
    /// filesystem when there is no content to store.
    pub fn save(
        &self,
        route_name: &str,
        direction: &str,
        sub_name: Option<&str>,
        gpx: Option<&str>,
    ) -> std::io::Result<Option<String>> {
        let gpx = match gpx {
            Some(g) if !g.is_empty() => g,
            _ => return Ok(None),
        };

        let path = self.derive_path(route_name, direction, sub_name);
        fs::write(&path, gpx)?;
        Ok(Some(path.to_string_lossy().into_owned()))
    }

    /// Best-effort removal: a file that is already gone is fine, and any
    /// other IO failure is logged and swallowed so it never aborts the
    /// direction delete that triggered it.
    pub fn delete(&self, path: &str) {
        match fs::remove_file(Path::new(path)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove attachment '{}': {}", path, e),
        }
    }
}
