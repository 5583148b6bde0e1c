use assert_cmd::cargo_bin;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch directory holding the cookie store, the candidate list and the
/// output log for one run of the binary.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(cookies: &str, coupons: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cookies.json"), cookies).unwrap();
        fs::write(dir.path().join("coupons.txt"), coupons).unwrap();
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn output(&self) -> String {
        fs::read_to_string(self.path("found.txt")).unwrap_or_default()
    }

    /// Command with every pause set to zero.
    pub fn command(&self, endpoint: &str, cycles: u64) -> Command {
        let mut cmd = Command::new(cargo_bin!("voucher-sweep"));
        cmd.arg("--cookies")
            .arg(self.path("cookies.json"))
            .arg("--coupons")
            .arg(self.path("coupons.txt"))
            .arg("--output")
            .arg(self.path("found.txt"))
            .arg("--endpoint")
            .arg(endpoint)
            .args(["--delay-min", "0", "--delay-max", "0"])
            .args(["--backoff-min", "0", "--backoff-max", "0"])
            .args(["--cycle-pause", "0", "--timeout", "5"])
            .arg("--cycles")
            .arg(cycles.to_string());
        cmd
    }
}

#[allow(dead_code)]
/// Runs the command off the async runtime so the mock server keeps serving.
pub async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
