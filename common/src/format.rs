//! 表示用フォーマット

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// バイト数を読みやすいサイズ表記に変換
///
/// 1024未満はそのまま `"N B"`、それ以上は1以上になる最大の単位を選び
/// 小数第2位で丸める（末尾の0は出さない）。
///
/// # Examples
/// ```
/// use pdf_sign_common::format_file_size;
///
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = bytes as f64 / scale as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
