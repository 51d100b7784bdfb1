//! Shared test utilities for integration tests
//!
//! Builds isolated hub/home layouts in a temp dir and runs the built binaries
//! against them without touching the real user environment.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Serializes writing fake executables against spawning processes.
/// A script still open for writing in one thread while another forks fails with ETXTBSY.
static SPAWN_MUTEX: Mutex<()> = Mutex::new(());

pub fn spawn_guard() -> MutexGuard<'static, ()> {
    SPAWN_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

/// Temp layout: `<tmp>/hub`, `<tmp>/home`, `<tmp>/xdg`.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("hub").join("policy")).unwrap();
        std::fs::create_dir_all(dir.path().join("home")).unwrap();
        std::fs::create_dir_all(dir.path().join("xdg")).unwrap();
        Self { dir }
    }

    pub fn hub(&self) -> PathBuf {
        self.dir.path().join("hub")
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn write_policy(&self, json: &str) {
        std::fs::write(self.hub().join("policy").join("user-policy.json"), json).unwrap();
    }

    pub fn write_home_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.home().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Executable `codex` stand-in running `script` under /bin/sh.
    #[cfg(unix)]
    pub fn fake_codex(&self, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join("fake-codex");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Config file pointing `review.program` at `program`.
    pub fn review_config(&self, program: &Path, extra: &str) -> PathBuf {
        let path = self.dir.path().join("agenthub.toml");
        std::fs::write(
            &path,
            format!(
                "[review]\nprogram = {:?}\n{}\n",
                program.to_string_lossy(),
                extra
            ),
        )
        .unwrap();
        path
    }

    /// Command for a built binary with HOME/XDG pointed into the sandbox.
    pub fn command(&self, bin: &str) -> Command {
        let mut cmd = Command::new(bin);
        cmd.env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("AGENTHUB_HUB_DIR")
            .env_remove("AGENTHUB_ENV")
            .env_remove("AGENTHUB_LOG")
            .env_remove("AGENTHUB__REVIEW__PROGRAM")
            .env_remove("AGENTHUB__REVIEW__MODEL");
        cmd
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
