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

//! API resource for storing an order by id.

use crate::rest_api::AppState;
use crate::rest_api::common::ProblemJson;
use actix_web::Error;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::put;
use actix_web::web::Data;
use actix_web::web::Path;
use apiproblem::Order;

/// Store an order by id.
#[utoipa::path(
    tag = "orders",
    params(
        ("order_id", description = "Order identifier."),
    ),
    request_body(content = apiproblem::Order, content_type = "application/json"),
    responses(
        (status = 201, description = "Created. The order was stored."),
        (status = 204, description = "No content. The existing order was replaced."),
        (
            status = 400,
            description = "Bad Request. The body or identifier could not be read.",
            body = apiproblem::Problem,
            content_type = "application/problem+json",
        ),
        (
            status = 413,
            description = "Payload too large.",
            body = apiproblem::Problem,
            content_type = "application/problem+json",
        ),
        (
            status = 415,
            description = "Unsupported media type.",
            body = apiproblem::Problem,
            content_type = "application/problem+json",
        ),
    ),
)]
#[put("/orders/{order_id}")]
pub async fn put_order(
    app_state: Data<AppState>,
    path: Path<u64>,
    body: ProblemJson<Order>,
) -> Result<HttpResponse, Error> {
    let order_id = path.into_inner();
    let status = if app_state.orders.put(order_id, body.into_inner()) {
        StatusCode::CREATED
    } else {
        StatusCode::NO_CONTENT
    };
    Ok(HttpResponse::build(status).finish())
}
