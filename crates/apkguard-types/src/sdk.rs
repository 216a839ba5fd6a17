//! Android API level constants and marketing names.

/// Content providers are exported by default below this level.
pub const ANDROID_4_2_LEVEL: u32 = 17;
pub const ANDROID_5_0_LEVEL: u32 = 21;
pub const ANDROID_8_0_LEVEL: u32 = 26;
pub const ANDROID_9_0_LEVEL: u32 = 28;
pub const ANDROID_10_0_LEVEL: u32 = 29;

/// Shown in place of a marketing name for API levels the table does not know.
pub const UNKNOWN_VERSION_NAME: &str = "XX";

/// Marketing version name for an API level, if known.
pub fn android_version_name(api_level: u32) -> Option<&'static str> {
    let name = match api_level {
        1 => "1.0",
        2 => "1.1",
        3 => "1.5",
        4 => "1.6",
        5 => "2.0-2.1",
        8 => "2.2-2.2.3",
        9 => "2.3-2.3.2",
        10 => "2.3.3-2.3.7",
        11 => "3.0",
        12 => "3.1",
        13 => "3.2-3.2.6",
        14 => "4.0-4.0.2",
        15 => "4.0.3-4.0.4",
        16 => "4.1-4.1.2",
        17 => "4.2-4.2.2",
        18 => "4.3-4.3.1",
        19 => "4.4-4.4.4",
        20 => "4.4W-4.4W.2",
        21 => "5.0-5.0.2",
        22 => "5.1-5.1.1",
        23 => "6.0-6.0.1",
        24 => "7.0",
        25 => "7.1-7.1.2",
        26 => "8.0",
        27 => "8.1",
        28 => "9",
        29 => "10",
        30 => "11",
        31 => "12",
        32 => "12L",
        33 => "13",
        34 => "14",
        35 => "15",
        36 => "16",
        _ => return None,
    };
    Some(name)
}

/// Like [`android_version_name`], falling back to [`UNKNOWN_VERSION_NAME`].
pub fn android_version_label(api_level: u32) -> &'static str {
    android_version_name(api_level).unwrap_or(UNKNOWN_VERSION_NAME)
}
