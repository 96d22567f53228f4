use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that relocates the fixture root.
pub const ROOT_ENV_VAR: &str = "ICEBERG_FIXTURES_ROOT";

pub const DEFAULT_JAR_DIR_NAME: &str = "jars";
pub const DEFAULT_WAREHOUSE_DIR_NAME: &str = "test_warehouse";

/// Root the fixtures live under when `--root` is not given:
/// `ICEBERG_FIXTURES_ROOT`, else the current directory.
pub fn default_root() -> PathBuf {
    resolve_root(std::env::var_os(ROOT_ENV_VAR))
}

fn resolve_root(from_env: Option<OsString>) -> PathBuf {
    from_env
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Where downloaded jars and the test warehouse are placed on disk.
///
/// Both directories sit directly under the root, which is expected to be the
/// repository root: `<root>/jars` and `<root>/test_warehouse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureLayout {
    root: PathBuf,
    jar_dir_name: String,
    warehouse_dir_name: String,
}

impl FixtureLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            jar_dir_name: DEFAULT_JAR_DIR_NAME.to_string(),
            warehouse_dir_name: DEFAULT_WAREHOUSE_DIR_NAME.to_string(),
        }
    }

    pub fn with_dir_names(
        mut self,
        jar_dir_name: impl Into<String>,
        warehouse_dir_name: impl Into<String>,
    ) -> Self {
        self.jar_dir_name = jar_dir_name.into();
        self.warehouse_dir_name = warehouse_dir_name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn jar_dir(&self) -> PathBuf {
        self.root.join(&self.jar_dir_name)
    }

    pub fn jar_path(&self, file_name: &str) -> PathBuf {
        self.jar_dir().join(file_name)
    }

    pub fn warehouse_dir(&self) -> PathBuf {
        self.root.join(&self.warehouse_dir_name)
    }
}

impl Default for FixtureLayout {
    fn default() -> Self {
        Self::new(default_root())
    }
}
