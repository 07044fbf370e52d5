mod compose;
mod head;
mod output;
mod route;
mod types;

pub use compose::{
    compose, compose_with_state, state_script, ComposeError, HEAD_CLOSE, HEAD_MARKER,
    OUTLET_MARKER, STATE_GLOBAL,
};
pub use head::{head_tags, seo_head};
pub use output::{output_path, OutputPathError};
pub use route::{
    classify_route, dynamic_routes, normalize_route, DynamicRoutes, RouteKind, BLOG_PREFIX,
    DEFAULT_STATIC_ROUTES, PACKAGES_PREFIX,
};
pub use types::{BlogPostRecord, PackageRecord, PageData, PagePayload, SeoRecord};
