use std::path::Path;

/// Basenames longer than this are shortened.
const MAX_NAME_CHARS: usize = 40;
/// Characters kept from a shortened basename before the ellipsis.
const KEPT_NAME_CHARS: usize = 35;

/// Build the label shown for a track: its basename, shortened to
/// 35 characters plus `...` when longer than 40 characters.
///
/// Lengths are counted in `char`s so multi-byte names are never split.
pub fn display_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if name.chars().count() > MAX_NAME_CHARS {
        let mut short: String = name.chars().take(KEPT_NAME_CHARS).collect();
        short.push_str("...");
        short
    } else {
        name
    }
}
