use super::is_absolute_url;

/// Join a root prefix and a relative asset URL with exactly one separating slash.
///
/// Backslashes in either segment are converted to forward slashes first so Windows-style
/// output paths produce valid URLs. Slashes at the join point are collapsed, everything else
/// (a leading `/` or `~/` on the root, a query string on the fragment) is kept untouched.
pub fn join_root(root: &str, fragment: &str) -> String {
    let root = root.replace('\\', "/");
    let fragment = fragment.replace('\\', "/");
    let fragment = fragment.trim_start_matches('/');
    let trimmed_root = root.trim_end_matches('/');

    if trimmed_root.is_empty() && root.starts_with('/') {
        format!("/{fragment}")
    } else {
        format!("{trimmed_root}/{fragment}")
    }
}

/// Compute the final URL for one manifest fragment.
///
/// Fragments are returned unchanged when there is no root prefix or when they are already
/// absolute URLs; otherwise the prefix is joined on with [`join_root`].
pub fn resolve_asset_url(root: Option<&str>, fragment: &str) -> String {
    match root {
        Some(root) if !root.trim().is_empty() && !is_absolute_url(fragment) => {
            join_root(root, fragment)
        }
        _ => fragment.to_string(),
    }
}
