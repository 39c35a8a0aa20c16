use icongen_core::{
    generator::{Conversion, Generator, PreconditionError, Progress, Summary},
    icons::{IconSet, IconSpec, Platform},
    inkscape::Inkscape,
};
use integration_tests::Workdir;
use std::{path::PathBuf, time::Duration};

#[derive(Default)]
struct RecordingProgress {
    started: Option<Option<String>>,
    conversions: Vec<(&'static IconSpec, bool)>,
    failures: Vec<String>,
}

impl Progress for RecordingProgress {
    fn started(&mut self, _icons: &IconSet, inkscape_version: Option<&str>) {
        self.started = Some(inkscape_version.map(|v| v.to_owned()));
    }

    fn converted(&mut self, conversion: &Conversion) {
        self.conversions
            .push((conversion.spec, conversion.success()));
        if let Err(err) = &conversion.result {
            self.failures.push(err.to_string());
        }
    }
}

fn all_icon_paths() -> Vec<PathBuf> {
    let mut paths = IconSet::app_icons()
        .iter()
        .map(|spec| PathBuf::from(spec.path))
        .collect::<Vec<_>>();
    paths.push(PathBuf::from("app_icon.svg"));
    paths.sort();
    paths
}

#[tokio::test]
async fn should_convert_every_icon_in_order_with_matching_size() {
    let workdir = Workdir::new().with_source();
    let inkscape = Inkscape::new(workdir.inkscape());
    let generator = Generator::new(
        &inkscape,
        IconSet::app_icons(),
        workdir.project(),
        "app_icon.svg",
    );

    let summary = generator.run(()).await.unwrap();

    assert_eq!(
        summary,
        Summary {
            total: 20,
            succeeded: 20
        }
    );
    let invocations = workdir.invocations();
    assert_eq!(invocations.len(), 21);
    invocations.assert_args(0, &["--version"]);
    let exports = invocations.exports();
    assert_eq!(exports.len(), 20);
    for (args, spec) in exports.iter().zip(IconSet::app_icons().iter()) {
        let svg = workdir.project().join("app_icon.svg");
        let png = workdir.project().join(spec.path);
        assert_eq!(
            *args,
            &[
                "--export-type=png".to_owned(),
                format!("--export-filename={}", png.display()),
                format!("--export-width={}", spec.size),
                format!("--export-height={}", spec.size),
                svg.display().to_string(),
            ][..]
        );
    }
}

#[tokio::test]
async fn should_create_missing_directories() {
    let workdir = Workdir::new().with_source();
    let inkscape = Inkscape::new(workdir.inkscape());
    let generator = Generator::new(
        &inkscape,
        IconSet::app_icons(),
        workdir.project(),
        "app_icon.svg",
    );

    generator.run(()).await.unwrap();

    assert_eq!(workdir.project_files(), all_icon_paths());
    let mdpi = workdir
        .project()
        .join("android/app/src/main/res/mipmap-mdpi/ic_launcher.png");
    assert_eq!(std::fs::read_to_string(mdpi).unwrap(), "48x48");
}

#[tokio::test]
async fn should_overwrite_icons_on_second_run() {
    let workdir = Workdir::new().with_source();
    let inkscape = Inkscape::new(workdir.inkscape());
    let generator = Generator::new(
        &inkscape,
        IconSet::app_icons(),
        workdir.project(),
        "app_icon.svg",
    );
    let app_store_icon = workdir
        .project()
        .join("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-1024x1024@1x.png");

    let first = generator.run(()).await.unwrap();
    std::fs::write(&app_store_icon, "stale").unwrap();
    let second = generator.run(()).await.unwrap();

    assert!(first.all_succeeded());
    assert!(second.all_succeeded());
    assert_eq!(workdir.project_files(), all_icon_paths());
    assert_eq!(
        std::fs::read_to_string(&app_store_icon).unwrap(),
        "1024x1024"
    );
}

#[tokio::test]
async fn should_continue_after_failed_conversion() {
    let workdir = Workdir::new().with_source().with_failing_size(1024);
    let inkscape = Inkscape::new(workdir.inkscape());
    let generator = Generator::new(
        &inkscape,
        IconSet::app_icons(),
        workdir.project(),
        "app_icon.svg",
    );
    let mut progress = RecordingProgress::default();

    let summary = generator.run(&mut progress).await.unwrap();

    assert_eq!(
        summary,
        Summary {
            total: 20,
            succeeded: 19
        }
    );
    assert_eq!(summary.failed(), 1);
    assert_eq!(workdir.invocations().exports().len(), 20);
    assert_eq!(
        progress.started,
        Some(Some("Inkscape 1.2.2 (test binary)".to_owned()))
    );
    let failed = progress
        .conversions
        .iter()
        .filter(|(_, success)| !success)
        .map(|(spec, _)| spec.size)
        .collect::<Vec<_>>();
    assert_eq!(failed, vec![1024]);
    assert_eq!(
        progress.failures,
        vec!["inkscape exited with error status 1: test binary refuses to render size 1024"]
    );
    assert_eq!(workdir.project_files().len(), 20);
}

#[tokio::test]
async fn should_fail_every_icon_sharing_the_failing_size() {
    let workdir = Workdir::new().with_source().with_failing_size(120);
    let inkscape = Inkscape::new(workdir.inkscape());
    let generator = Generator::new(
        &inkscape,
        IconSet::app_icons(),
        workdir.project(),
        "app_icon.svg",
    );

    let summary = generator.run(()).await.unwrap();

    assert_eq!(summary.succeeded, 18);
    assert_eq!(workdir.invocations().exports().len(), 20);
}

#[tokio::test]
async fn should_not_convert_anything_without_source() {
    let workdir = Workdir::new();
    let inkscape = Inkscape::new(workdir.inkscape());
    let generator = Generator::new(
        &inkscape,
        IconSet::app_icons(),
        workdir.project(),
        "app_icon.svg",
    );

    let result = generator.run(()).await;

    assert!(matches!(result, Err(PreconditionError::SourceMissing(_))));
    assert!(workdir.invocations().is_empty());
    assert!(workdir.project_files().is_empty());
}

#[tokio::test]
async fn should_not_convert_anything_if_inkscape_fails_probe() {
    let workdir = Workdir::new().with_source().with_version_exit_status(1);
    let inkscape = Inkscape::new(workdir.inkscape());
    let generator = Generator::new(
        &inkscape,
        IconSet::app_icons(),
        workdir.project(),
        "app_icon.svg",
    );
    let mut progress = RecordingProgress::default();

    let result = generator.run(&mut progress).await;

    assert!(matches!(result, Err(PreconditionError::ToolMissing(_, _))));
    assert_eq!(workdir.invocations().len(), 1);
    assert_eq!(
        workdir.project_files(),
        vec![PathBuf::from("app_icon.svg")]
    );
    assert!(progress.started.is_none());
    assert!(progress.conversions.is_empty());
}

#[tokio::test]
async fn should_count_timed_out_conversions_as_failed() {
    static MDPI_ONLY: &[IconSpec] = &[IconSpec {
        platform: Platform::Android,
        path: "android/app/src/main/res/mipmap-mdpi/ic_launcher.png",
        size: 48,
    }];
    let workdir = Workdir::new().with_source().with_sleep(30);
    let inkscape = Inkscape::new(workdir.inkscape());
    let generator = Generator::new(
        &inkscape,
        IconSet::new(MDPI_ONLY),
        workdir.project(),
        "app_icon.svg",
    )
    .with_timeout(Some(Duration::from_millis(200)));
    let mut progress = RecordingProgress::default();

    let summary = generator.generate(&mut progress).await;

    assert_eq!(
        summary,
        Summary {
            total: 1,
            succeeded: 0
        }
    );
    assert_eq!(
        progress.failures,
        vec!["inkscape did not finish within 200ms"]
    );
}
