//! Core languages shipped with the binary.

use spire_core::shellexpand;
use std::path::Path;
use tracing::{info, warn};

/// Bundled core languages, embedded at compile time: (file name, content).
const BUNDLED_LANGUAGES: &[(&str, &str)] =
    &[("en-US.toml", include_str!("../languages/en-US.toml"))];

/// Deploy bundled core languages to `{core_dir}/languages/`.
///
/// Never overwrites existing files so user edits are preserved.
pub fn install_bundled_languages(core_dir: &str) {
    let expanded = shellexpand(core_dir);
    let dir = Path::new(&expanded).join("languages");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("languages: failed to create {}: {e}", dir.display());
        return;
    }

    for (filename, content) in BUNDLED_LANGUAGES {
        let dest = dir.join(filename);
        if dest.exists() {
            continue;
        }
        if let Err(e) = std::fs::write(&dest, content) {
            warn!("languages: failed to write {}: {e}", dest.display());
        } else {
            info!("languages: deployed bundled {filename}");
        }
    }
}
