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

//! Lock-free in-memory registry of orders.

use crate::ApiProblemError;
use crate::ApiProblemErrorKind;
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::map::Entry;
use serde::Deserialize;
use serde::Serialize;
use std::sync::Arc;

/// Order placed by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Name of the customer.
    pub customer: String,
    /// Number of ordered items.
    pub quantity: u32,
    /// Delivery address.
    pub address: Address,
}

/// Delivery address of an [Order].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street and number.
    pub street: String,
    /// Postal code.
    pub zip_code: u32,
}

/// Registry of [Order]s by order id.
#[derive(Default)]
pub struct OrderRegistry {
    orders: SkipMap<u64, Arc<Order>>,
}

impl OrderRegistry {
    /// Return a new instance.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get an order by id.
    pub fn get(&self, order_id: u64) -> Result<Arc<Order>, ApiProblemError> {
        self.orders
            .get(&order_id)
            .as_ref()
            .map(Entry::value)
            .map(Arc::clone)
            .ok_or_else(|| {
                ApiProblemErrorKind::NotFound.error_with_msg(format!("Order {order_id} not found"))
            })
    }

    /// Insert or replace an order.
    ///
    /// Returns `true` if no order with the same id existed before.
    pub fn put(&self, order_id: u64, order: Order) -> bool {
        let created = !self.orders.contains_key(&order_id);
        self.orders.insert(order_id, Arc::new(order));
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Stored order {order_id}. created: {created}");
        }
        created
    }

    /// Return the number of registered orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Return `true` if no orders are registered.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn order(quantity: u32) -> Order {
        Order {
            customer: "Ann".to_string(),
            quantity,
            address: Address {
                street: "Main Street 1".to_string(),
                zip_code: 12345,
            },
        }
    }

    #[test]
    fn missing_order_is_not_found() {
        let registry = OrderRegistry::new();
        let e = registry.get(42).unwrap_err();
        assert_eq!(e.kind(), &ApiProblemErrorKind::NotFound);
        assert_eq!(e.message(), Some("Order 42 not found"));
    }

    #[test]
    fn put_then_replace() {
        let registry = OrderRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.put(1, order(1)));
        assert!(!registry.put(1, order(2)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(1).unwrap().quantity, 2);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(order(3)).unwrap();
        assert_eq!(json["address"]["zipCode"], 12345);
    }
}
