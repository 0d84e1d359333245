//! Isolated environment for running the `stagehand` binary.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use stagehand::domain::entities::PROVIDER_ENV_VARS;
use tempfile::TempDir;

/// Variables from the developer's shell that would leak into a test run
const HOST_VARS: &[&str] = &[
    "SERVERLESS_ORG",
    "SERVERLESS_ACCESS_KEY",
    "SERVERLESS_PLATFORM_STAGE",
    "STAGEHAND_PLATFORM_URL",
    "STAGEHAND_POLL_INTERVAL_MS",
    "RUST_LOG",
];

/// Result of running a Stagehand CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON ({e}): {l}"))
            })
            .collect()
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create project dir"),
            home_dir: tempfile::tempdir().expect("Failed to create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stagehand")),
        }
    }

    /// Environment with `serverless.yml` already written
    pub fn with_instance(yaml: &str) -> Self {
        let env = Self::new();
        env.write_project_file("serverless.yml", yaml);
        env
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Write the user settings file
    pub fn write_settings(&self, content: &str) {
        let path = self.config_home().join("stagehand").join("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create config dir");
        std::fs::write(path, content).expect("Failed to write settings");
    }

    fn config_home(&self) -> PathBuf {
        self.home_dir.path().join(".config")
    }

    /// Run stagehand from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let output = self
            .command(cwd, args, env_vars)
            .output()
            .expect("Failed to execute stagehand");
        output_to_result(output)
    }

    /// Start stagehand from the project root without waiting, stdout piped
    pub fn spawn_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Child {
        self.command(self.project_root.path(), args, env_vars)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn stagehand")
    }

    fn command(&self, cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("APPDATA", self.config_home())
            .env("NO_COLOR", "1");

        for key in HOST_VARS {
            cmd.env_remove(key);
        }
        for (_, vars) in PROVIDER_ENV_VARS {
            for (key, _) in *vars {
                cmd.env_remove(key);
            }
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
