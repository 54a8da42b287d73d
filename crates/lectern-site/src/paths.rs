//! Output path and URL conventions shared by the local services.

/// Output path for a page: component directory plus stem, with the ROOT
/// component living at the site root.
pub(crate) fn output_path(component: &str, stem: &str) -> String {
    if component == "ROOT" {
        format!("{stem}.html")
    } else {
        format!("{component}/{stem}.html")
    }
}

pub(crate) fn public_url(out_path: &str) -> String {
    format!("/{out_path}")
}

/// Relative prefix from an output file back to the site root, with a
/// trailing slash so it can be prepended to asset paths as-is.
pub(crate) fn root_path_for(out_path: &str) -> String {
    "../".repeat(out_path.matches('/').count())
}
