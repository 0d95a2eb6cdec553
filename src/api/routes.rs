use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

#[cfg(not(test))]
use {
    axum::extract::ConnectInfo,
    std::net::IpAddr,
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;

/// Create the router with all endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        .route("/recommend", get(api_handlers::recommend))
        .route("/recipes/:name", get(api_handlers::get_recipe))
        .route("/categories", get(api_handlers::list_categories))
        .route("/stats", get(api_handlers::get_stats))
        .with_state(state.clone());

    // Rate limiting is keyed on the peer IP, falling back to 127.0.0.1 when
    // no socket address is attached to the request (local runs, in-process tests).
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> Result<Self::Key, tower_governor::GovernorError> {
                if let Some(ConnectInfo(addr)) =
                    req.extensions().get::<ConnectInfo<std::net::SocketAddr>>()
                {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        let governor_conf = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(settings.server.api_rate_limit)
            .burst_size(settings.server.api_rate_limit as u32 * 2)
            .finish();

        match governor_conf {
            Some(config) => {
                api_routes = api_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => tracing::warn!("Invalid rate limit configuration, API is not rate limited"),
        }
    }

    let api_routes = api_routes;

    let health_routes = Router::new()
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state.clone());

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(
            settings.server.max_request_body_size,
        ))
        .layer(
            // CORS - allow all origins for the read-only API
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::categories::CategoryTable;
    use crate::corpus::{Corpus, RecipeRecord};
    use crate::indexer::HealthThresholds;
    use crate::recommend::{RecommendOptions, RecommendationEngine};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let records = vec![RecipeRecord {
            name: "lentil soup".to_string(),
            description: "a hearty lentil soup".to_string(),
            ingredients: "['lentils', 'carrot']".to_string(),
            tags: "['soup']".to_string(),
            nutrition: "[250.0, 4.0, 0.0, 0.0, 3.0, 18.0, 300.0]".to_string(),
            steps: "['simmer']".to_string(),
            minutes: 40,
        }];
        let corpus = Corpus::new(records, &HealthThresholds::default());
        let engine = RecommendationEngine::new(
            corpus,
            CategoryTable::default(),
            RecommendOptions::default(),
        )
        .unwrap();

        AppState {
            engine: Arc::new(engine),
            settings: crate::config::test_settings(),
        }
    }

    #[tokio::test]
    async fn test_routes_exist() {
        let state = create_test_state();
        let app = create_router(state.clone(), &state.settings);

        for uri in ["/health", "/ready", "/api/stats", "/api/categories", "/api/recommend?q=soup"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        }
    }

    #[tokio::test]
    async fn test_security_headers() {
        let state = create_test_state();
        let app = create_router(state.clone(), &state.settings);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    }
}
