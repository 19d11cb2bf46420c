//! [`TestTree`] builder for reconciliation test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the database file inside the template root.
pub const DATABASE: &str = "templates.csv";

/// A temporary template root plus a sibling directory for policy files.
///
/// Policy files live outside the root so they never show up in a scan.
///
/// # Example
///
/// ```rust,no_run
/// use tplsync_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write("pvp/a.txt", "OwVT");
/// tree.write_db("b.txt,OwBT\n");
/// let policy = tree.write_policy("tplsync.ini", "[pvp]\nexclude = old/.*\n");
/// assert!(policy.exists());
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty template root.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("skills")).unwrap();
        fs::create_dir(temp_dir.path().join("config")).unwrap();
        Self { temp_dir }
    }

    /// The template root.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("skills")
    }

    /// Directory for policy files.
    pub fn config_dir(&self) -> PathBuf {
        self.temp_dir.path().join("config")
    }

    /// Absolute path of `rel` under the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file under the root, creating parent directories.
    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Create an empty directory under the root.
    pub fn mkdir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.path(rel)).unwrap();
        self
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", rel, e))
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    pub fn db_path(&self) -> PathBuf {
        self.path(DATABASE)
    }

    pub fn write_db(&self, content: impl AsRef<[u8]>) -> &Self {
        fs::write(self.db_path(), content).unwrap();
        self
    }

    pub fn read_db(&self) -> String {
        fs::read_to_string(self.db_path()).unwrap_or_default()
    }

    /// Write a policy file into [`Self::config_dir`] and return its path.
    pub fn write_policy(&self, name: &str, content: &str) -> PathBuf {
        let path = self.config_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Every file under the root, relative and forward-slash separated,
    /// sorted. The database is included.
    pub fn files(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_files(&self.root(), &self.root(), &mut out);
        out.sort();
        out
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).unwrap();
            out.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}
