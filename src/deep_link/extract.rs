//! Deep-link extraction from launch arguments.

use std::fmt;

/// Scheme the application registers with the OS.
pub const LENS_SCHEME: &str = "lens";

/// A URL known to start with `<scheme>://`.
///
/// The scheme is matched case-insensitively but the value keeps the casing it
/// arrived with, so path and query segments reach the router untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeepLink(String);

impl DeepLink {
    /// Accepts `candidate` if it starts with `<scheme>://`, ignoring ASCII case.
    pub fn parse(scheme: &str, candidate: &str) -> Option<Self> {
        has_scheme_prefix(scheme, candidate).then(|| Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeepLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn has_scheme_prefix(scheme: &str, candidate: &str) -> bool {
    match (candidate.get(..scheme.len()), candidate.get(scheme.len()..)) {
        (Some(head), Some(rest)) => head.eq_ignore_ascii_case(scheme) && rest.starts_with("://"),
        _ => false,
    }
}

/// Returns the first `lens://` argument, if any.
pub fn extract_deep_link<S: AsRef<str>>(args: &[S]) -> Option<DeepLink> {
    extract_deep_link_for(LENS_SCHEME, args)
}

/// Returns the first argument, in order, that starts with `<scheme>://`.
pub fn extract_deep_link_for<S: AsRef<str>>(scheme: &str, args: &[S]) -> Option<DeepLink> {
    args.iter().find_map(|arg| DeepLink::parse(scheme, arg.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_argument() {
        assert_eq!(extract_deep_link(&["--foo", "--bar"]), None);
        assert_eq!(extract_deep_link::<&str>(&[]), None);
        assert_eq!(extract_deep_link(&["lens:/missing-slash", "lens", "xlens://a"]), None);
    }

    #[test]
    fn test_single_match_any_position() {
        let link = "lens://app/preferences";
        for position in 0..3 {
            let mut args = vec!["/usr/bin/lens", "--no-sandbox"];
            args.insert(position, link);
            assert_eq!(
                extract_deep_link(args.as_slice()).map(DeepLink::into_inner),
                Some(link.to_string())
            );
        }
    }

    #[test]
    fn test_first_match_wins() {
        let args = [
            "--foo",
            "lens://cluster/abcdef/pods",
            "lens://a",
            "LENS://app",
        ];
        assert_eq!(
            extract_deep_link(&args).unwrap().as_str(),
            "lens://cluster/abcdef/pods"
        );
    }

    #[test]
    fn test_scheme_match_is_case_insensitive() {
        let link = extract_deep_link(&["--foo", "LENS://cluster/abc"]).unwrap();
        assert!(link.as_str().to_lowercase().starts_with("lens://"));
    }

    #[test]
    fn test_casing_is_preserved() {
        let link = extract_deep_link(&["Lens://Cluster/AbC?Name=X"]).unwrap();
        assert_eq!(link.to_string(), "Lens://Cluster/AbC?Name=X");
    }

    #[test]
    fn test_non_ascii_arguments_do_not_panic() {
        assert_eq!(extract_deep_link(&["lé://x", "ñ", "日本語"]), None);
    }

    #[test]
    fn test_custom_scheme() {
        let args = vec!["openlens://x".to_string(), "lens://y".to_string()];
        assert_eq!(
            extract_deep_link_for("openlens", args.as_slice()).unwrap().as_str(),
            "openlens://x"
        );
    }
}
