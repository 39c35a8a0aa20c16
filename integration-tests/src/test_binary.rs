use std::{
    error::Error,
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    time::Duration,
};

fn append_invocation(workdir: &Path) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(workdir.join("invocations"))?;
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    file.write_all(args.join("\t").as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

fn read_value<T: std::str::FromStr>(workdir: &Path, name: &str) -> Option<T> {
    std::fs::read_to_string(workdir.join(name))
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

fn arg_value<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter().find_map(|arg| arg.strip_prefix(prefix))
}

fn version(workdir: &Path) -> i32 {
    println!("Inkscape 1.2.2 (test binary)");
    read_value(workdir, "version-exit-status").unwrap_or(0)
}

fn export(workdir: &Path, args: &[String]) -> Result<i32, Box<dyn Error>> {
    if let Some(secs) = read_value::<u64>(workdir, "sleep-secs") {
        std::thread::sleep(Duration::from_secs(secs));
    }

    let width = arg_value(args, "--export-width=").ok_or("missing --export-width")?;
    let height = arg_value(args, "--export-height=").ok_or("missing --export-height")?;
    if read_value::<String>(workdir, "fail-size").as_deref() == Some(width) {
        eprintln!("test binary refuses to render size {}", width);
        return Ok(1);
    }

    let filename = arg_value(args, "--export-filename=").ok_or("missing --export-filename")?;
    let mut file = File::create(filename)?;
    write!(file, "{}x{}", width, height)?;
    Ok(0)
}

/// Stands in for Inkscape. Every invocation is appended to an `invocations` file next to the
/// binary; other files in that directory script its behavior:
///
/// * `version-exit-status`: exit status for `--version`
/// * `fail-size`: exports with this width fail with status 1
/// * `sleep-secs`: delay before each export
///
/// Successful exports write `<width>x<height>` to the requested file.
pub fn test_binary_main() {
    let workdir = std::env::current_exe()
        .unwrap()
        .parent()
        .unwrap()
        .to_owned();
    let _ = append_invocation(&workdir);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let exit_status = if args.iter().any(|arg| arg == "--version") {
        version(&workdir)
    } else {
        match export(&workdir, &args) {
            Ok(status) => status,
            Err(err) => {
                eprintln!("test binary: {}", err);
                2
            }
        }
    };
    std::process::exit(exit_status);
}
