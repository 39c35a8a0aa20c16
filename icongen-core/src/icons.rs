use std::path::Path;

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
        }
    }
}

/// A single raster rendition of the app icon: where it goes and how big it is.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct IconSpec {
    pub platform: Platform,
    pub path: &'static str,
    /// Width and height in pixels.
    pub size: u32,
}

impl IconSpec {
    const fn android(path: &'static str, size: u32) -> Self {
        IconSpec {
            platform: Platform::Android,
            path,
            size,
        }
    }

    const fn ios(path: &'static str, size: u32) -> Self {
        IconSpec {
            platform: Platform::Ios,
            path,
            size,
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(self.path)
    }
}

const APP_ICONS: &[IconSpec] = &[
    IconSpec::android("android/app/src/main/res/mipmap-mdpi/ic_launcher.png", 48),
    IconSpec::android("android/app/src/main/res/mipmap-hdpi/ic_launcher.png", 72),
    IconSpec::android("android/app/src/main/res/mipmap-xhdpi/ic_launcher.png", 96),
    IconSpec::android("android/app/src/main/res/mipmap-xxhdpi/ic_launcher.png", 144),
    IconSpec::android("android/app/src/main/res/mipmap-xxxhdpi/ic_launcher.png", 192),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-20x20@1x.png", 20),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-20x20@2x.png", 40),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-20x20@3x.png", 60),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-29x29@1x.png", 29),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-29x29@2x.png", 58),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-29x29@3x.png", 87),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-40x40@1x.png", 40),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-40x40@2x.png", 80),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-40x40@3x.png", 120),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-60x60@2x.png", 120),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-60x60@3x.png", 180),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-76x76@1x.png", 76),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-76x76@2x.png", 152),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-83.5x83.5@2x.png", 167),
    IconSpec::ios("ios/Runner/Assets.xcassets/AppIcon.appiconset/Icon-App-1024x1024@1x.png", 1024),
];

/// An ordered, immutable table of icon renditions.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct IconSet(&'static [IconSpec]);

impl IconSet {
    pub const fn new(specs: &'static [IconSpec]) -> Self {
        IconSet(specs)
    }

    /// The Android launcher mipmaps followed by the iOS app icon asset catalog.
    pub const fn app_icons() -> Self {
        IconSet(APP_ICONS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static IconSpec> {
        let specs: &'static [IconSpec] = self.0;
        specs.iter()
    }

    pub fn for_platform(&self, platform: Platform) -> impl Iterator<Item = &'static IconSpec> {
        self.iter().filter(move |spec| spec.platform == platform)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for IconSet {
    fn default() -> Self {
        IconSet::app_icons()
    }
}
