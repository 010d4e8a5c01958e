//! # Configuration
//!
//! Settings live in `config.json` inside the attrform home directory:
//!
//! 1. `ATTRFORM_HOME`, when set.
//! 2. Otherwise the OS config directory (via the `directories` crate).
//!
//! A missing file means defaults. Relative `schema_dir` / `template_dir` values are
//! resolved against the home directory.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `show_unlisted` | `true` | Show attributes the type schema does not mention |
//! | `supertype_templates` | `false` | Try the supertype's template before the generic form |
//! | `xattr_namespace` | `user.haiku.` | Prefix under which typed xattrs are stored |
//! | `schema_dir` | `schemas` | Per-type attribute schemas |
//! | `template_dir` | `templates` | Per-type layout templates |

use crate::error::{AttrFormError, Result};
use crate::source::fs::DEFAULT_NAMESPACE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "ATTRFORM_HOME";

fn default_true() -> bool {
    true
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("schemas")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttrFormConfig {
    #[serde(default = "default_true")]
    pub show_unlisted: bool,

    #[serde(default)]
    pub supertype_templates: bool,

    #[serde(default = "default_namespace")]
    pub xattr_namespace: String,

    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
}

impl Default for AttrFormConfig {
    fn default() -> Self {
        Self {
            show_unlisted: true,
            supertype_templates: false,
            xattr_namespace: default_namespace(),
            schema_dir: default_schema_dir(),
            template_dir: default_template_dir(),
        }
    }
}

impl AttrFormConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(home: P) -> Result<Self> {
        let path = home.as_ref().join(CONFIG_FILENAME);
        let found = path
            .try_exists()
            .map_err(|e| AttrFormError::Config(format!("{}: {}", path.display(), e)))?;
        if !found {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|e| AttrFormError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save<P: AsRef<Path>>(&self, home: P) -> Result<()> {
        let home = home.as_ref();
        fs::create_dir_all(home)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(home.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Schema directory, made absolute against `home`.
    pub fn schema_dir(&self, home: &Path) -> PathBuf {
        home.join(&self.schema_dir)
    }

    /// Template directory, made absolute against `home`.
    pub fn template_dir(&self, home: &Path) -> PathBuf {
        home.join(&self.template_dir)
    }
}

/// Resolves the attrform home directory.
pub fn home_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("org", "attrform", "attrform")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AttrFormError::Config("Could not determine config directory".to_string()))
}
