use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use linkbox_api::bootstrap::app_context::{AppContext, AppServices};
use linkbox_api::bootstrap::config::Config;
use linkbox_api::infrastructure::db::repositories::group_repository_sqlx::SqlxGroupRepository;
use linkbox_api::infrastructure::db::repositories::link_repository_sqlx::SqlxLinkRepository;
use linkbox_api::infrastructure::db::repositories::tag_repository_sqlx::SqlxTagRepository;
use linkbox_api::infrastructure::web::title_lookup_reqwest::ReqwestTitleLookup;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            linkbox_api::presentation::http::inbox::list_inbox,
            linkbox_api::presentation::http::links::list_links,
            linkbox_api::presentation::http::links::create_link,
            linkbox_api::presentation::http::links::get_link,
            linkbox_api::presentation::http::links::update_link,
            linkbox_api::presentation::http::links::delete_link,
            linkbox_api::presentation::http::links::sync_link_tags,
            linkbox_api::presentation::http::links::sync_link_groups,
            linkbox_api::presentation::http::tags::list_tags,
            linkbox_api::presentation::http::tags::create_tag,
            linkbox_api::presentation::http::groups::list_groups,
            linkbox_api::presentation::http::groups::create_group,
            linkbox_api::presentation::http::health::health,
        ),
        components(schemas(
            linkbox_api::presentation::http::inbox::InboxResponse,
            linkbox_api::presentation::http::links::LinkListItem,
            linkbox_api::presentation::http::links::LinkPage,
            linkbox_api::presentation::http::links::LinkIndexResponse,
            linkbox_api::presentation::http::links::LinkDetail,
            linkbox_api::presentation::http::links::LinkRequest,
            linkbox_api::presentation::http::links::CreatedResponse,
            linkbox_api::presentation::http::links::SyncTagsRequest,
            linkbox_api::presentation::http::links::SyncGroupsRequest,
            linkbox_api::presentation::http::tags::TagItem,
            linkbox_api::presentation::http::tags::TagRef,
            linkbox_api::presentation::http::tags::CreateTagRequest,
            linkbox_api::presentation::http::groups::GroupItem,
            linkbox_api::presentation::http::groups::CreateGroupRequest,
            linkbox_api::presentation::http::error::ValidationErrorBody,
            linkbox_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Inbox", description = "Links without tags or groups"),
            (name = "Links", description = "Saved links and their associations"),
            (name = "Tags", description = "Tag catalog"),
            (name = "Groups", description = "Group catalog"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // In production FRONTEND_URL is validated by Config; deny all if it still fails to parse
        _ if cfg.is_production => base.allow_origin(AllowOrigin::exact(
            HeaderValue::from_static("http://invalid"),
        )),
        // Development convenience
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "linkbox_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        production = cfg.is_production,
        frontend_url = ?cfg.frontend_url,
        "Starting linkbox backend"
    );

    // Database
    let pool = linkbox_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    linkbox_api::infrastructure::db::migrate(&pool).await?;

    let title_lookup = ReqwestTitleLookup::new(
        cfg.title_lookup_timeout(),
        cfg.title_lookup_max_bytes,
        &cfg.title_lookup_user_agent,
    )?;
    let services = AppServices::new(
        Arc::new(SqlxLinkRepository::new(pool.clone())),
        Arc::new(SqlxTagRepository::new(pool.clone())),
        Arc::new(SqlxGroupRepository::new(pool.clone())),
        Arc::new(title_lookup),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .nest(
            "/api",
            linkbox_api::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api",
            linkbox_api::presentation::http::inbox::routes(ctx.clone()),
        )
        .nest(
            "/api",
            linkbox_api::presentation::http::links::routes(ctx.clone()),
        )
        .nest(
            "/api",
            linkbox_api::presentation::http::tags::routes(ctx.clone()),
        )
        .nest(
            "/api",
            linkbox_api::presentation::http::groups::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown_requested");
        })
        .await?;
    Ok(())
}
