//! Path normalization for VFS keys.

/// Normalize a path: remove leading `/`, collapse empty and `.` segments,
/// resolve `..` against the preceding segment.
///
/// `..` never climbs above the root. Case is preserved and `\` is an
/// ordinary character, so `A.txt` and `a.txt` are distinct keys.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}
