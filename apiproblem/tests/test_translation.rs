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

//! Integration tests of request failure translation.

use apiproblem::FailureReason;
use apiproblem::Order;
use apiproblem::OrderRegistry;
use apiproblem::ProblemType;
use apiproblem::StatusCode;
use apiproblem::from_json_slice;
use apiproblem::translator;

#[test]
fn unreadable_order_body() {
    let body = br#"{"customer":"Ann","quantity":1,"address":{"street":"Main","zipCode":"abc"}}"#;
    let defect = from_json_slice::<Order>(body).expect_err("Zip code should be a number.");
    let problem = translator::classify(FailureReason::from(defect));
    let json = serde_json::to_value(&problem).unwrap();
    assert_eq!(json["status"], 400);
    assert_eq!(json["type"], ProblemType::UnreadableEntity.uri());
    assert_eq!(json["title"], "Invalid request body");
    assert_eq!(
        json["detail"],
        "Property 'address.zipCode' received value 'abc' which is of invalid type. Expected type is 'u32'."
    );
    assert!(json["timestamp"].is_string());
}

#[test]
fn missing_order() {
    let registry = OrderRegistry::new();
    let error = registry.get(42).expect_err("Registry should be empty.");
    let problem = translator::classify(FailureReason::from(error));
    assert_eq!(problem.status, StatusCode::NOT_FOUND);
    assert_eq!(problem.detail.as_deref(), Some("Order 42 not found"));
    assert_eq!(problem.title.as_deref(), Some("Entity not found"));
}

#[test]
fn stored_order_is_returned() {
    let registry = OrderRegistry::new();
    let body = br#"{"customer":"Ann","quantity":2,"address":{"street":"Main","zipCode":12345}}"#;
    let order = from_json_slice::<Order>(body).expect("Body should be valid.");
    registry.put(7, order.clone());
    assert_eq!(*registry.get(7).unwrap(), order);
}
