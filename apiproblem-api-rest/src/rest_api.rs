/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! REST API server and resources.

mod http_resources {
    //! API resources

    pub mod get_order;
    pub mod put_order;
}
pub mod common {
    //! Common RESP API resources and utils.

    mod api_error_mapper;
    mod problem_json;
    mod problem_normalizer;

    pub use api_error_mapper::*;
    pub use problem_json::*;
    pub use problem_normalizer::*;
}

use actix_web::App;
use actix_web::Error;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::error::PathError;
use actix_web::get;
use actix_web::http::header::ContentType;
use actix_web::web;
use apiproblem::FailureReason;
use apiproblem::OrderRegistry;
use apiproblem::StatusCode;
use common::ApiErrorMapper;
use common::ProblemJsonConfig;
use std::sync::Arc;
use tyst_api_rest_health::AppHealth;
use tyst_api_rest_health::health_resources;
use utoipa::OpenApi;

/// Number of parallel requests the can be served for each assigned CPU core.
const WORKERS_PER_CORE: usize = 1024;

/// Shared state between requests.
#[derive(Clone)]
pub struct AppState {
    orders: Arc<OrderRegistry>,
}

impl AppState {
    /// Return a new instance serving the `orders`.
    pub fn new(orders: &Arc<OrderRegistry>) -> Self {
        Self {
            orders: Arc::clone(orders),
        }
    }
}

/// Simple health check that holds the registry instance.
pub struct AppHealthImpl {
    _orders: Arc<OrderRegistry>,
}
impl AppHealthImpl {
    fn with_registry(orders: &Arc<OrderRegistry>) -> Arc<dyn AppHealth> {
        Arc::new(Self {
            _orders: Arc::clone(orders),
        })
    }
}
impl AppHealth for AppHealthImpl {
    fn is_health_started(&self) -> bool {
        true
    }
    fn is_health_ready(&self) -> bool {
        true
    }
    fn is_health_live(&self) -> bool {
        true
    }
}

/// Run HTTP server.
pub async fn run_http_server(
    orders: &Arc<OrderRegistry>,
    bind_address: &str,
    bind_port: u16,
    max_body_bytes: usize,
) -> Result<(), Box<dyn core::error::Error>> {
    let workers = std::thread::available_parallelism()
        .map(|non_zero| non_zero.get())
        .unwrap_or(1);
    let max_connections = WORKERS_PER_CORE * workers;
    log::info!(
        "API described by http://{bind_address}:{bind_port}/openapi.json allows {max_connections} concurrent connections."
    );
    let app_data = web::Data::<AppState>::new(AppState::new(orders));
    let app_health = web::Data::<Arc<dyn AppHealth>>::new(AppHealthImpl::with_registry(orders));

    HttpServer::new(move || {
        App::new()
            .wrap(common::problem_error_handlers())
            .app_data(app_data.clone())
            .app_data(app_health.clone())
            .app_data(ProblemJsonConfig::with_limit(max_body_bytes))
            .configure(configure)
            .service(health_resources::health)
            .service(health_resources::health_live)
            .service(health_resources::health_ready)
            .service(health_resources::health_started)
    })
    .workers(workers)
    .backlog(u32::try_from(max_connections / 2).unwrap_or(2048))
    .worker_max_blocking_threads(max_connections)
    .max_connections(max_connections)
    .bind_auto_h2c((bind_address, bind_port))?
    .disable_signals()
    .shutdown_timeout(5) // Default 30
    .run()
    .await?;
    Ok(())
}

/// Register the API resources and request binding error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(invalid_path_parameter))
        .service(web::redirect("/openapi", "/api/v1/openapi.json"))
        .service(web::redirect("/openapi.json", "/api/v1/openapi.json"))
        .service(
            web::scope("/api/v1")
                .service(get_openapi)
                .service(http_resources::get_order::get_order)
                .service(http_resources::put_order::put_order),
        );
}

/// Respond with a problem when a path segment can't be bound.
fn invalid_path_parameter(e: PathError, _req: &HttpRequest) -> Error {
    ApiErrorMapper::from_reason(FailureReason::InvalidParameter {
        status: StatusCode::BAD_REQUEST,
        detail: e.to_string(),
    })
}

/// Serve Open API documentation.
#[get("/openapi.json")]
async fn get_openapi() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(openapi_as_string())
}

/// Get the OpenAPI definition as a pretty JSON String.
pub fn openapi_as_string() -> String {
    #[derive(OpenApi)]
    #[openapi(
        // Use Cargo.toml as source for the "info" section
        paths(
            http_resources::get_order::get_order,
            http_resources::put_order::put_order,
            health_resources::health,
            health_resources::health_live,
            health_resources::health_ready,
            health_resources::health_started,
        ),
        components(schemas(apiproblem::Problem, apiproblem::Order, apiproblem::Address))
    )]
    struct ApiDoc;
    ApiDoc::openapi()
        .to_pretty_json()
        .inspect_err(|e| log::error!("Failed to render OpenAPI document: {e}"))
        .unwrap_or_default()
}
