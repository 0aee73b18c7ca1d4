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

//! API resource for retrieving an order by id.

use crate::rest_api::AppState;
use crate::rest_api::common::ApiErrorMapper;
use actix_web::Error;
use actix_web::HttpResponse;
use actix_web::get;
use actix_web::web::Data;
use actix_web::web::Path;

/// Retrieve an order by id.
#[utoipa::path(
    tag = "orders",
    params(
        ("order_id", description = "Order identifier."),
    ),
    responses(
        (
            status = 200,
            description = "Return the order.",
            body = apiproblem::Order,
            content_type = "application/json",
        ),
        (
            status = 400,
            description = "The order identifier is not a number.",
            body = apiproblem::Problem,
            content_type = "application/problem+json",
        ),
        (
            status = 404,
            description = "No order with the identifier was found.",
            body = apiproblem::Problem,
            content_type = "application/problem+json",
        ),
    ),
)]
#[get("/orders/{order_id}")]
pub async fn get_order(app_state: Data<AppState>, path: Path<u64>) -> Result<HttpResponse, Error> {
    let order_id = path.into_inner();
    let order = app_state
        .orders
        .get(order_id)
        .inspect_err(|e| log::info!("Request for order {order_id} failed: {e}"))
        .map_err(ApiErrorMapper::from_error)?;
    Ok(HttpResponse::Ok().json(order.as_ref()))
}
