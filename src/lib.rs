pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::AppConfig;
pub use db::{create_pool, DbPool};
pub use handlers::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::members::create_team,
        handlers::members::sign_up,
        handlers::members::list_members,
        handlers::members::get_member,
        handlers::members::update_member,
        handlers::members::search_members,
        handlers::members::search_members_page_simple,
        handlers::members::search_members_page,
        handlers::items::create_item,
        handlers::items::list_items,
        handlers::items::update_item,
        handlers::orders::place_order,
        handlers::orders::search_orders,
        handlers::orders::get_order,
        handlers::orders::cancel_order,
        handlers::orders::order_summaries,
        handlers::orders::order_details,
        handlers::orders::order_details_flat,
    ),
    tags(
        (name = "members", description = "Teams, members and member search"),
        (name = "items", description = "Catalogue items"),
        (name = "orders", description = "Order lifecycle and order read models"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Register every route on an actix `ServiceConfig`.
///
/// Literal segments (`/members/search`, `/orders/summaries`, ...) are
/// registered before the `{id}` routes they would otherwise collide with.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::{items, members, orders};

    cfg.route("/teams", web::post().to(members::create_team))
        .service(
            web::scope("/members")
                .route("", web::get().to(members::list_members))
                .route("", web::post().to(members::sign_up))
                .route("/search", web::get().to(members::search_members))
                .route(
                    "/search/simple",
                    web::get().to(members::search_members_page_simple),
                )
                .route("/search/page", web::get().to(members::search_members_page))
                .route("/{id}", web::get().to(members::get_member))
                .route("/{id}", web::put().to(members::update_member)),
        )
        .service(
            web::scope("/items")
                .route("", web::get().to(items::list_items))
                .route("", web::post().to(items::create_item))
                .route("/{id}", web::put().to(items::update_item)),
        )
        .service(
            web::scope("/orders")
                .route("", web::get().to(orders::search_orders))
                .route("", web::post().to(orders::place_order))
                .route("/summaries", web::get().to(orders::order_summaries))
                .route("/details", web::get().to(orders::order_details))
                .route("/details/flat", web::get().to(orders::order_details_flat))
                .route("/{id}", web::get().to(orders::get_order))
                .route("/{id}/cancel", web::post().to(orders::cancel_order)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
    order_search_limit: i64,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(AppState::new(pool, order_search_limit));
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
