use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info};

use menu_api::{routing::RouteTable, AppState};
use menu_core::{MenuBuilder, MenuEnvironment, MenuService};
use menu_security::JwtService;
use menu_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    menu_shared::telemetry::init_telemetry("info");

    info!("Menu Server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Item kinds and aliases
    let environment = MenuEnvironment::new()
        .with_default_kind(config.menu.default_item_class.clone())
        .with_kind_aliases(config.menu.item_class_aliases.clone());

    // Build every menu up front; a broken definition stops the server
    let builder = Arc::new(MenuBuilder::new(
        config.menu.definitions.clone(),
        Arc::new(environment),
    ));
    let menus = builder.menus()?;
    info!("{} menus ready: {:?}", menus.len(), builder.menu_names());

    // Create App State
    let state = AppState {
        menus: Arc::new(MenuService::new(builder)),
        routes: Arc::new(RouteTable::new(config.routes.clone(), config.app.base_url.clone())),
        jwt: config
            .jwt
            .as_ref()
            .map(|jwt| Arc::new(JwtService::new(jwt.secret.clone(), jwt.access_token_expiry))),
    };
    if state.jwt.is_none() {
        info!("No JWT settings, all menu requests are anonymous");
    }

    // Build router
    let origin: HeaderValue = config.app.base_url.parse()?;
    let app = menu_api::router(state).layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
