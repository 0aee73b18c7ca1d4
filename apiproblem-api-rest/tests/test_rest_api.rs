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

//! Integration tests of problem responses served by the REST API.

use actix_web::App;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::http::header::ContentType;
use actix_web::test;
use actix_web::web;
use apiproblem::OrderRegistry;
use apiproblem::Problem;
use apiproblem_api_rest::rest_api;
use apiproblem_api_rest::rest_api::AppState;
use apiproblem_api_rest::rest_api::common::ProblemJsonConfig;
use apiproblem_api_rest::rest_api::common::problem_error_handlers;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;

const ORDER: &str =
    r#"{"customer":"Ann","quantity":2,"address":{"street":"Main Street 1","zipCode":12345}}"#;

macro_rules! init_app {
    ($orders:expr) => {
        test::init_service(
            App::new()
                .wrap(problem_error_handlers())
                .app_data(web::Data::new(AppState::new($orders)))
                .app_data(ProblemJsonConfig::with_limit(512))
                .configure(rest_api::configure),
        )
        .await
    };
}

fn assert_problem_content_type<B>(res: &actix_web::dev::ServiceResponse<B>) {
    assert_eq!(
        res.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/problem+json")
    );
}

#[actix_web::test]
async fn missing_order_is_not_found_problem() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::get()
        .uri("/api/v1/orders/42")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_problem_content_type(&res);
    let problem: Problem = test::read_body_json(res).await;
    assert_eq!(problem.status.as_u16(), 404);
    assert_eq!(problem.detail.as_deref(), Some("Order 42 not found"));
    assert_eq!(problem.type_uri.as_deref(), Some("/problems/entity-not-found"));
    assert!(problem.timestamp.is_some());
}

#[actix_web::test]
async fn stored_order_is_served() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::put()
        .uri("/api/v1/orders/7")
        .insert_header(ContentType::json())
        .set_payload(ORDER)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let req = test::TestRequest::put()
        .uri("/api/v1/orders/7")
        .set_payload(ORDER)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let req = test::TestRequest::get().uri("/api/v1/orders/7").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["address"]["zipCode"], 12345);
    assert_eq!(orders.len(), 1);
}

#[actix_web::test]
async fn type_mismatch_names_the_field() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::put()
        .uri("/api/v1/orders/1")
        .insert_header(ContentType::json())
        .set_payload(r#"{"customer":"Ann","quantity":"abc","address":{"street":"Main","zipCode":1}}"#)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_problem_content_type(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["type"], "/problems/unreadable-entity");
    assert_eq!(body["title"], "Invalid request body");
    assert_eq!(
        body["detail"],
        "Property 'quantity' received value 'abc' which is of invalid type. Expected type is 'u32'."
    );
    assert!(orders.is_empty());
}

#[actix_web::test]
async fn nested_type_mismatch_has_dotted_path() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::put()
        .uri("/api/v1/orders/1")
        .set_payload(r#"{"customer":"Ann","quantity":1,"address":{"street":"Main","zipCode":"x1"}}"#)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["detail"],
        "Property 'address.zipCode' received value 'x1' which is of invalid type. Expected type is 'u32'."
    );
}

#[actix_web::test]
async fn malformed_body_is_generic_bad_request() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::put()
        .uri("/api/v1/orders/1")
        .set_payload(r#"{"customer":"#)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "status": 400, "title": "Bad Request" }));
}

#[actix_web::test]
async fn oversized_and_non_json_bodies_are_rejected() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::put()
        .uri("/api/v1/orders/1")
        .set_payload(vec![b' '; 1024])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "status": 413, "title": "Payload Too Large" }));
    let req = test::TestRequest::put()
        .uri("/api/v1/orders/1")
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload(ORDER)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "status": 415, "title": "Unsupported Media Type" }));
}

#[actix_web::test]
async fn invalid_path_parameter_is_problem() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::get()
        .uri("/api/v1/orders/abc")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_problem_content_type(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["type"], "/problems/invalid-parameter");
    assert_eq!(body["title"], "Invalid parameter");
    assert!(body["detail"].as_str().is_some_and(|detail| detail.contains("abc")));
}

#[actix_web::test]
async fn unknown_route_is_normalized_to_problem() {
    let orders: Arc<OrderRegistry> = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::get().uri("/api/v1/nothing").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_problem_content_type(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "status": 404, "title": "Not Found" }));
}

#[actix_web::test]
async fn openapi_document_describes_problem() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::get()
        .uri("/api/v1/openapi.json")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(
        body["paths"]
            .as_object()
            .is_some_and(|paths| paths.keys().any(|path| path.ends_with("/orders/{order_id}")))
    );
    assert!(body["components"]["schemas"]["Problem"].is_object());
}

#[actix_web::test]
async fn plain_text_error_becomes_problem_title() {
    let orders = OrderRegistry::new();
    let app = test::init_service(
        App::new()
            .wrap(problem_error_handlers())
            .app_data(web::Data::new(AppState::new(&orders)))
            .configure(rest_api::configure)
            .route(
                "/locked",
                web::get().to(|| async {
                    Err::<HttpResponse, _>(actix_web::error::ErrorConflict("order locked"))
                }),
            ),
    )
    .await;
    let req = test::TestRequest::get().uri("/locked").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_problem_content_type(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "status": 409, "title": "order locked" }));
}

#[actix_web::test]
async fn method_mismatch_is_reason_phrase_problem() {
    let orders = OrderRegistry::new();
    let app = init_app!(&orders);
    let req = test::TestRequest::post()
        .uri("/api/v1/orders/1")
        .insert_header(ContentType::json())
        .set_payload(ORDER)
        .to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    assert!(status.is_client_error());
    assert_problem_content_type(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({
            "status": status.as_u16(),
            "title": status.canonical_reason().unwrap_or_default(),
        })
    );
    assert!(orders.is_empty());
}
