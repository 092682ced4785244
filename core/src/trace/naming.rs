use std::path::Path;

/// Longest common leading text shared by every entry.
///
/// Works on characters rather than path components, so `/a/x1.ns` and
/// `/a/x2.ns` share `/a/x`.
pub fn common_prefix<S: AsRef<str>>(entries: &[S]) -> String {
    let mut iter = entries.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let first = first.as_ref();
    let mut shared = first.len();

    for other in iter {
        let other = other.as_ref();
        let head = &first[..shared];
        shared = head
            .char_indices()
            .zip(other.chars())
            .find(|((_, lhs), rhs)| lhs != rhs)
            .map(|((idx, _), _)| idx)
            .unwrap_or_else(|| head.len().min(other.len()));
    }

    first[..shared].to_string()
}

/// Returns the shared prefix of `paths` and each path's remainder after it.
pub fn display_names<P: AsRef<Path>>(paths: &[P]) -> (String, Vec<String>) {
    let texts: Vec<String> = paths
        .iter()
        .map(|path| path.as_ref().to_string_lossy().into_owned())
        .collect();
    let prefix = common_prefix(&texts);
    let names = texts
        .iter()
        .map(|text| text[prefix.len()..].to_string())
        .collect();
    (prefix, names)
}
