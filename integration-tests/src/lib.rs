use std::path::{Path, PathBuf};

mod test_binary;
pub use test_binary::test_binary_main;

// Adapted from
// https://github.com/rust-lang/cargo/blob/485670b3983b52289a2f353d589c57fae2f60f82/tests/testsuite/support/mod.rs#L507
// https://github.com/assert-rs/assert_cmd/blob/3ae01c9cf76e8b652c8ed4d2d64ff53149096339/src/cargo.rs#L192
fn target_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .map(|mut path| {
            path.pop();
            if path.ends_with("deps") {
                path.pop();
            }
            path
        })
        .unwrap()
}

fn exe_name(name: &str) -> String {
    format!("{}{}", name, std::env::consts::EXE_SUFFIX)
}

fn cargo_bin(name: &str) -> PathBuf {
    target_dir().join(exe_name(name))
}

/// A scratch directory with a copy of the test binary posing as Inkscape in `bin/` and an
/// empty app project in `project/`.
pub struct Workdir {
    dir: tempfile::TempDir,
}

impl Workdir {
    const TEST_BINARY_NAME: &'static str = "integration-tests";
    const TARGET_BINARY_NAME: &'static str = "inkscape";

    pub fn new() -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("bin")).unwrap();
        std::fs::create_dir(dir.path().join("project")).unwrap();
        // copied rather than symlinked so the binary finds its control files via current_exe
        std::fs::copy(
            cargo_bin(Self::TEST_BINARY_NAME),
            dir.path()
                .join("bin")
                .join(exe_name(Self::TARGET_BINARY_NAME)),
        )
        .unwrap();
        Self { dir }
    }

    pub fn with_source(self) -> Self {
        std::fs::write(
            self.project().join("app_icon.svg"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"/>"#,
        )
        .unwrap();
        self
    }

    pub fn with_version_exit_status(self, exit_status: i32) -> Self {
        self.with_control_file("version-exit-status", exit_status.to_string())
    }

    pub fn with_failing_size(self, size: u32) -> Self {
        self.with_control_file("fail-size", size.to_string())
    }

    pub fn with_sleep(self, secs: u64) -> Self {
        self.with_control_file("sleep-secs", secs.to_string())
    }

    fn with_control_file(self, name: &str, contents: String) -> Self {
        std::fs::write(self.bin_dir().join(name), contents).unwrap();
        self
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn project(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn inkscape(&self) -> PathBuf {
        self.bin_dir().join(exe_name(Self::TARGET_BINARY_NAME))
    }

    pub fn invocations(&self) -> Invocations {
        Invocations::new(&self.bin_dir().join("invocations")).unwrap()
    }

    /// All files below the project directory, relative to it and sorted.
    pub fn project_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        collect_files(&self.project(), &self.project(), &mut files);
        files.sort();
        files
    }
}

impl Default for Workdir {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) {
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            files.push(path.strip_prefix(root).unwrap().to_owned());
        }
    }
}

pub struct Invocations {
    invocations: Vec<Vec<String>>,
}

impl Invocations {
    fn new(invocations_file: &Path) -> std::io::Result<Invocations> {
        let invocations = match std::fs::read_to_string(invocations_file) {
            Ok(s) => s
                .lines()
                .map(|line| line.split('\t').map(|s| s.to_owned()).collect())
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };
        Ok(Invocations { invocations })
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    pub fn get(&self, index: usize) -> &[String] {
        &self.invocations[index]
    }

    /// Invocations other than the `--version` probe.
    pub fn exports(&self) -> Vec<&[String]> {
        self.invocations
            .iter()
            .filter(|args| !args.iter().any(|arg| arg == "--version"))
            .map(|args| args.as_slice())
            .collect()
    }

    pub fn assert_args(&self, index: usize, args: &[impl AsRef<str>]) -> &Self {
        let args = args.iter().map(|s| s.as_ref()).collect::<Vec<_>>();
        assert_eq!(self.get(index), args.as_slice());
        self
    }
}
