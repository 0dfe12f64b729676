//! Target repository backed by the `git` command-line tool

use super::TargetRepository;
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// A git work tree operated through `git -C <root> ...`
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Find the work tree containing `path`
    ///
    /// # Errors
    /// `NotARepository` if `path` is not inside a git work tree.
    pub fn discover(path: &Path) -> Result<Self> {
        let output = git_output(path, ["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(Error::NotARepository(path.to_path_buf()));
        }

        let top = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if top.is_empty() {
            // Inside a .git directory or a bare repository
            return Err(Error::NotARepository(path.to_path_buf()));
        }

        Ok(Self {
            root: PathBuf::from(top),
        })
    }

    /// Open a work tree at a known root without checking it
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Check that the repository can take absorption commits
    ///
    /// HEAD must point at a commit and no merge may be in progress.
    pub fn ensure_ready(&self) -> Result<()> {
        if !self.succeeds(["rev-parse", "--quiet", "--verify", "HEAD"])? {
            return Err(Error::EmptyRepository);
        }
        if self.succeeds(["rev-parse", "--quiet", "--verify", "MERGE_HEAD"])? {
            return Err(Error::MergeInProgress);
        }
        Ok(())
    }

    /// Check that the index matches HEAD
    ///
    /// Staged changes would end up inside the first absorption commit.
    pub fn ensure_nothing_staged(&self) -> Result<()> {
        if !self.succeeds(["diff", "--cached", "--quiet"])? {
            return Err(Error::StagedChanges);
        }
        Ok(())
    }

    /// Run git and return trimmed stdout, failing on a non-zero exit
    fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let output = git_output(&self.root, &args)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::Git {
                command: args
                    .iter()
                    .map(|a| a.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Run git and report only whether it exited successfully
    fn succeeds<I, S>(&self, args: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Ok(git_output(&self.root, args)?.status.success())
    }
}

impl TargetRepository for GitRepo {
    fn root(&self) -> &Path {
        &self.root
    }

    fn has_tracked_path(&self, path: &str) -> Result<bool> {
        let listed = self.run(["ls-tree", "--name-only", "HEAD", "--", path])?;
        Ok(!listed.is_empty())
    }

    fn fetch(&self, source: &Path, branch: &str) -> Result<String> {
        self.run([
            OsStr::new("fetch"),
            OsStr::new("--quiet"),
            OsStr::new("--no-tags"),
            source.as_os_str(),
            OsStr::new(branch),
        ])?;
        self.run(["rev-parse", "--verify", "FETCH_HEAD^{commit}"])
    }

    fn merge_keep_ours(&self, commit: &str) -> Result<()> {
        self.run([
            "merge",
            "--quiet",
            "--no-ff",
            "--no-commit",
            "--strategy=ours",
            "--allow-unrelated-histories",
            commit,
        ])?;
        Ok(())
    }

    fn read_tree_prefixed(&self, prefix: &str, commit: &str, update_work_tree: bool) -> Result<()> {
        let prefix_arg = format!("--prefix={prefix}");
        let mut args = vec!["read-tree", prefix_arg.as_str()];
        if update_work_tree {
            args.push("-u");
        }
        args.push(commit);
        self.run(args)?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.run(["commit", "--quiet", "--no-verify", "-m", message])?;
        self.run(["rev-parse", "HEAD"])
    }

    fn abort_merge(&self) -> Result<()> {
        self.run(["merge", "--abort"])?;
        Ok(())
    }
}

fn git_output<I, S>(dir: &Path, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
    debug!(dir = %dir.display(), ?args, "running git");

    Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(&args)
        .output()
        .map_err(|e| Error::Internal(format!("failed to run git: {e}")))
}
