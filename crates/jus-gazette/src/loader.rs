//! Gazette site loading from TOML files.
//!
//! Each file holds one `[site]` table:
//!
//! ```toml
//! [site]
//! id = "dje-sp"
//! state = "SP"
//! label = "DJE-SP"
//! url = "https://dje.tjsp.jus.br/cdje/index.do"
//! selector = "div.conteudo"
//! ```

use crate::{
    definition::GazetteSite,
    error::{GazetteError, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Deserialize)]
struct GazetteFile {
    site: GazetteSite,
}

/// Loader for gazette site definitions from TOML files.
pub struct GazetteLoader {
    /// Base directory containing site definitions
    definitions_dir: PathBuf,
}

impl GazetteLoader {
    /// Create a new loader with the given definitions directory.
    ///
    /// # Errors
    /// Returns error if the directory doesn't exist.
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Result<Self> {
        let definitions_dir = definitions_dir.into();

        if !definitions_dir.is_dir() {
            return Err(GazetteError::DirectoryNotFound {
                path: definitions_dir.display().to_string(),
            });
        }

        Ok(Self { definitions_dir })
    }

    /// Load all site definitions from the definitions directory.
    ///
    /// Invalid definitions are logged as warnings and skipped.
    ///
    /// # Errors
    /// Returns error if the directory can't be read.
    pub fn load_all(&self) -> Result<Vec<GazetteSite>> {
        let mut definitions = Vec::new();

        Self::walk_and_load_recursive(&self.definitions_dir, &mut definitions)?;

        info!(
            count = definitions.len(),
            dir = %self.definitions_dir.display(),
            "loaded gazette definitions"
        );

        Ok(definitions)
    }

    fn walk_and_load_recursive(dir: &Path, definitions: &mut Vec<GazetteSite>) -> Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                Self::walk_and_load_recursive(&path, definitions)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                match Self::load_from_path(&path) {
                    Ok(site) => {
                        if let Err(e) = site.validate() {
                            warn!(
                                path = %path.display(),
                                error = %e,
                                "skipping invalid gazette definition"
                            );
                            continue;
                        }
                        definitions.push(site);
                    }
                    Err(e) => {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "failed to load gazette definition"
                        );
                    }
                }
            }
        }

        Ok(())
    }

    /// Load a site definition from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<GazetteSite> {
        let contents = std::fs::read_to_string(path).map_err(|e| GazetteError::LoadError {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        toml::from_str::<GazetteFile>(&contents)
            .map(|file| file.site)
            .map_err(|e| GazetteError::ParseError {
                path: path.display().to_string(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_definition(dir: &Path, id: &str, state: &str) -> PathBuf {
        std::fs::create_dir_all(dir).expect("create dir");
        let file_path = dir.join(format!("{id}.toml"));

        let content = format!(
            r#"
[site]
id = "{id}"
state = "{state}"
label = "Diário {state}"
url = "https://{id}.example.jus.br/diario"
selector = "div.publicacao"
"#
        );

        std::fs::write(&file_path, content).expect("write test file");
        file_path
    }

    #[test]
    fn test_loader_new_with_nonexistent_dir() {
        let loader = GazetteLoader::new("/nonexistent/path/to/gazettes");
        assert!(matches!(loader, Err(GazetteError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_load_single_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = write_definition(temp_dir.path(), "dje-ce", "ce");

        let site = GazetteLoader::load_from_path(&path).expect("load definition");
        assert_eq!(site.id.as_str(), "dje-ce");
        assert_eq!(site.state.as_str(), "CE");
        assert_eq!(site.label, "Diário ce");
    }

    #[test]
    fn test_load_all_recursive() {
        let temp_dir = TempDir::new().expect("create temp dir");
        write_definition(temp_dir.path(), "dje-ce", "CE");
        write_definition(&temp_dir.path().join("norte"), "dje-am", "AM");
        write_definition(&temp_dir.path().join("norte").join("extra"), "dje-pa", "PA");

        let loader = GazetteLoader::new(temp_dir.path()).expect("create loader");
        let definitions = loader.load_all().expect("load all definitions");

        assert_eq!(definitions.len(), 3);
    }

    #[test]
    fn test_load_all_skips_invalid() {
        let temp_dir = TempDir::new().expect("create temp dir");
        write_definition(temp_dir.path(), "dje-ce", "CE");

        std::fs::write(temp_dir.path().join("broken.toml"), "invalid toml content [[[")
            .expect("write invalid file");
        std::fs::write(
            temp_dir.path().join("bad-state.toml"),
            "[site]\nid = \"dje-xx\"\nstate = \"Ceará\"\nlabel = \"X\"\nurl = \"https://x.jus.br\"\nselector = \"div\"\n",
        )
        .expect("write invalid state file");
        std::fs::write(
            temp_dir.path().join("bad-selector.toml"),
            "[site]\nid = \"dje-yy\"\nstate = \"PI\"\nlabel = \"Y\"\nurl = \"https://y.jus.br\"\nselector = \"div[\"\n",
        )
        .expect("write invalid selector file");
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").expect("write txt file");

        let loader = GazetteLoader::new(temp_dir.path()).expect("create loader");
        let definitions = loader.load_all().expect("load all definitions");

        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].id.as_str(), "dje-ce");
    }
}
