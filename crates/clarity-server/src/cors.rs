use clarity_config::{AllowList, CorsConfig};
use http::{Method, header::HeaderName};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// Credentials cannot be combined with wildcards, so when `credentials` is
/// set every `Any` mirrors the request instead.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    layer = match (&config.origins, config.credentials) {
        (AllowList::Any, false) => layer.allow_origin(AllowOrigin::any()),
        (AllowList::Any, true) => layer.allow_origin(AllowOrigin::mirror_request()),
        (AllowList::Only(origins), _) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    layer = match (&config.methods, config.credentials) {
        (AllowList::Any, false) => layer.allow_methods(AllowMethods::any()),
        (AllowList::Any, true) => layer.allow_methods(AllowMethods::mirror_request()),
        (AllowList::Only(methods), _) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            layer.allow_methods(methods)
        }
    };

    layer = match (&config.headers, config.credentials) {
        (AllowList::Any, false) => layer.allow_headers(AllowHeaders::any()),
        (AllowList::Any, true) => layer.allow_headers(AllowHeaders::mirror_request()),
        (AllowList::Only(headers), _) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            layer.allow_headers(headers)
        }
    };

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}
