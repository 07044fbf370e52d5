//! Route classification.

/// Namespace of package detail pages.
pub const PACKAGES_PREFIX: &str = "/packages/";

/// Namespace of blog post pages.
pub const BLOG_PREFIX: &str = "/blog/";

/// Routes always pre-rendered, in addition to one route per content record.
pub const DEFAULT_STATIC_ROUTES: &[&str] = &["/", "/about", "/packages", "/blog", "/contact"];

/// What a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind<'a> {
    /// `/packages/{slug}`
    Package { slug: &'a str },
    /// `/blog/{slug}`
    BlogPost { slug: &'a str },
    /// Anything else; carries no page-specific data.
    Static,
}

/// Classify a normalized route by its dynamic prefix.
///
/// The slug is the path remainder after the prefix and must be a single,
/// non-empty segment.
pub fn classify_route(route: &str) -> RouteKind<'_> {
    let slug_after = |prefix: &str| {
        route
            .strip_prefix(prefix)
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
    };

    if let Some(slug) = slug_after(PACKAGES_PREFIX) {
        RouteKind::Package { slug }
    } else if let Some(slug) = slug_after(BLOG_PREFIX) {
        RouteKind::BlogPost { slug }
    } else {
        RouteKind::Static
    }
}

/// Reduce a request target to the path used for lookups.
///
/// Drops the query string and fragment, guarantees a leading slash and strips
/// trailing slashes (except for the root).
pub fn normalize_route(raw: &str) -> String {
    let path = raw
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Detail routes built from listed content slugs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DynamicRoutes {
    pub routes: Vec<String>,
    /// Slugs that cannot form a route, with the prefix they were listed under.
    pub skipped: Vec<String>,
}

/// Build the detail routes for listed content slugs.
///
/// Blank slugs and slugs containing `/` are skipped and reported.
pub fn dynamic_routes(package_slugs: &[String], blog_slugs: &[String]) -> DynamicRoutes {
    let mut out = DynamicRoutes::default();

    let listed = package_slugs
        .iter()
        .map(|slug| (PACKAGES_PREFIX, slug))
        .chain(blog_slugs.iter().map(|slug| (BLOG_PREFIX, slug)));

    for (prefix, slug) in listed {
        let route = format!("{prefix}{slug}");
        if slug.trim().is_empty() || slug.contains('/') {
            out.skipped.push(route);
        } else {
            out.routes.push(route);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_slug_is_path_remainder() {
        assert_eq!(
            classify_route("/packages/bali-retreat"),
            RouteKind::Package {
                slug: "bali-retreat"
            }
        );
    }

    #[test]
    fn test_blog_slug_is_path_remainder() {
        assert_eq!(
            classify_route("/blog/ten-days-in-kyoto"),
            RouteKind::BlogPost {
                slug: "ten-days-in-kyoto"
            }
        );
    }

    #[test]
    fn test_non_dynamic_routes_are_static() {
        for route in [
            "/",
            "/about",
            "/packages",
            "/packages/",
            "/blog",
            "/blog/",
            "/blog/a/b",
            "/packagesx/foo",
            "/contact",
        ] {
            assert_eq!(classify_route(route), RouteKind::Static, "{route}");
        }
    }

    #[test]
    fn test_normalize_route() {
        assert_eq!(normalize_route("/"), "/");
        assert_eq!(normalize_route(""), "/");
        assert_eq!(normalize_route("/about/"), "/about");
        assert_eq!(normalize_route("/packages/bali?ref=ad#top"), "/packages/bali");
        assert_eq!(normalize_route("blog/x"), "/blog/x");
        assert_eq!(normalize_route("/?utm=1"), "/");
    }

    #[test]
    fn test_dynamic_routes() {
        let packages = vec!["bali-retreat".to_string(), " ".to_string()];
        let posts = vec!["packing-list".to_string(), "a/b".to_string()];

        let built = dynamic_routes(&packages, &posts);
        assert_eq!(built.routes, vec!["/packages/bali-retreat", "/blog/packing-list"]);
        assert_eq!(built.skipped, vec!["/packages/ ", "/blog/a/b"]);
    }

    #[test]
    fn test_dynamic_routes_empty() {
        assert_eq!(dynamic_routes(&[], &[]), DynamicRoutes::default());
    }
}
