//! Shared test helpers

#![allow(dead_code)]

mod mock_repo;

pub use mock_repo::{MockRepository, RecordingProgress, RepoCall};

use git_absorb::types::{FolderInfo, SourceFolder};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Environment that makes git deterministic and independent of the user's config
pub fn git_env(home: &Path) -> Vec<(&'static str, String)> {
    let home = home.to_string_lossy().to_string();
    vec![
        ("HOME", home.clone()),
        ("XDG_CONFIG_HOME", home),
        ("GIT_CONFIG_NOSYSTEM", "1".to_string()),
        ("GIT_AUTHOR_NAME", "Test User".to_string()),
        ("GIT_AUTHOR_EMAIL", "test@test.com".to_string()),
        ("GIT_COMMITTER_NAME", "Test User".to_string()),
        ("GIT_COMMITTER_EMAIL", "test@test.com".to_string()),
    ]
}

/// Scratch directory holding a target repository and any number of sources
///
/// Layout: `<tmp>/target` is the target, sources live next to it.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a workspace with an initialized target that has one commit
    pub fn new() -> Self {
        let ws = Self {
            dir: TempDir::new().expect("create temp dir"),
        };
        let target = ws.target();
        ws.init_repo(&target, "master");
        ws.commit_file(&target, "README.md", "# target\n", "Initial commit");
        ws
    }

    /// Root of the scratch directory (also used as HOME)
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the target repository
    pub fn target(&self) -> PathBuf {
        self.dir.path().join("target")
    }

    /// Create a source repository next to the target with the given files
    pub fn source(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        self.source_on_branch(name, "master", files)
    }

    /// Like `source`, with HEAD on `branch`
    pub fn source_on_branch(&self, name: &str, branch: &str, files: &[(&str, &str)]) -> PathBuf {
        let path = self.dir.path().join(name);
        self.init_repo(&path, branch);
        for (file, contents) in files {
            self.write(&path, file, contents);
        }
        self.git(&path, &["add", "--all"]);
        self.git(&path, &["commit", "--quiet", "-m", &format!("Start {name}")]);
        path
    }

    /// Initialize a repository at `path` with HEAD on `branch`
    pub fn init_repo(&self, path: &Path, branch: &str) {
        fs::create_dir_all(path).expect("create repo dir");
        self.git(path, &["init", "--quiet"]);
        self.git(
            path,
            &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")],
        );
    }

    /// Write a file, creating parent directories
    pub fn write(&self, repo: &Path, file: &str, contents: &str) {
        let path = repo.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, contents).expect("write file");
    }

    /// Write and commit a single file
    pub fn commit_file(&self, repo: &Path, file: &str, contents: &str, message: &str) {
        self.write(repo, file, contents);
        self.git(repo, &["add", file]);
        self.git(repo, &["commit", "--quiet", "-m", message]);
    }

    /// Run git in `dir`, asserting success, returning trimmed stdout
    pub fn git(&self, dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .envs(git_env(self.root()))
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Commit subjects along the target's first-parent chain, newest first
    pub fn target_log(&self) -> Vec<String> {
        self.git(&self.target(), &["log", "--first-parent", "--format=%s"])
            .lines()
            .map(String::from)
            .collect()
    }

    /// Files tracked in the target's HEAD
    pub fn target_files(&self) -> Vec<String> {
        self.git(&self.target(), &["ls-tree", "-r", "--name-only", "HEAD"])
            .lines()
            .map(String::from)
            .collect()
    }
}

/// Build a `SourceFolder` for an absolute path
pub fn folder(path: &str) -> SourceFolder {
    let path = PathBuf::from(path);
    let name = path
        .file_name()
        .expect("test path has a name")
        .to_string_lossy()
        .to_string();
    SourceFolder {
        raw: path.to_string_lossy().to_string(),
        path,
        name,
    }
}

/// A `FolderInfo` for a folder that can be absorbed
pub fn absorbable(path: &str) -> FolderInfo {
    FolderInfo {
        folder: folder(path),
        exists: true,
        is_repository: true,
        is_target: false,
        name_taken: false,
        in_place: false,
        branch: "master".to_string(),
    }
}
