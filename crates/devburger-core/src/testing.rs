//! Shared in-memory fakes for core tests: a fixed catalog, a ledger that
//! mimics the transactional all-or-nothing contract, and a chat model that
//! replays a script of canned replies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use rust_decimal::Decimal;

use devburger_types::error::RepositoryError;
use devburger_types::llm::{CompletionRequest, LlmError, ModelReply};
use devburger_types::menu::MenuItem;
use devburger_types::order::{
    LedgerError, Order, OrderLine, OrderRequest, OrderStatus, PlacedOrder,
};

use crate::catalog::CatalogRepository;
use crate::ledger::OrderLedger;
use crate::llm::ChatModel;

/// The canonical DevBurger menu used across core tests.
pub(crate) fn menu_fixture() -> Vec<MenuItem> {
    let items = [
        ("X-Python", "Pão brioche, burger 180g, cheddar e bacon.", 2890, "Lanche"),
        ("Smash Java", "Dois burgers de 80g amassados na chapa.", 2250, "Lanche"),
        ("Batata Array", "Batata frita rústica com alecrim.", 1200, "Acompanhamento"),
        ("Coca-Cola Lata", "350ml bem gelada.", 600, "Bebida"),
    ];
    items
        .into_iter()
        .enumerate()
        .map(|(i, (name, description, cents, category))| MenuItem {
            id: i as i64 + 1,
            name: name.to_string(),
            description: description.to_string(),
            price: Decimal::new(cents, 2),
            category: category.to_string(),
        })
        .collect()
}

/// In-memory [`CatalogRepository`] over a fixed item list.
pub(crate) struct MemoryCatalog {
    items: Vec<MenuItem>,
}

impl MemoryCatalog {
    pub(crate) fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }
}

impl CatalogRepository for MemoryCatalog {
    async fn get_all(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        Ok(self.items.clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>, RepositoryError> {
        Ok(self.items.iter().find(|item| item.name == name).cloned())
    }
}

/// In-memory [`OrderLedger`] honoring the all-or-nothing contract: price
/// resolution happens against its own catalog copy, and an unknown product
/// leaves the store untouched.
pub(crate) struct MemoryLedger {
    catalog: Vec<MenuItem>,
    orders: Mutex<Vec<PlacedOrder>>,
    next_id: AtomicI64,
}

impl MemoryLedger {
    pub(crate) fn new(catalog: Vec<MenuItem>) -> Self {
        Self {
            catalog,
            orders: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub(crate) async fn count(&self) -> u64 {
        self.orders.lock().unwrap().len() as u64
    }

    pub(crate) async fn order(&self, id: i64) -> Option<PlacedOrder> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|placed| placed.order.id == id)
            .cloned()
    }
}

impl OrderLedger for MemoryLedger {
    async fn create_order(&self, request: &OrderRequest) -> Result<PlacedOrder, LedgerError> {
        request.validate()?;

        let mut resolved = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let product = self
                .catalog
                .iter()
                .find(|p| p.name == item.product_name)
                .ok_or_else(|| LedgerError::UnknownProduct(item.product_name.clone()))?;
            resolved.push((item, product.price));
        }

        let order_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut total = Decimal::ZERO;
        let mut lines = Vec::with_capacity(resolved.len());
        for (i, (item, unit_price)) in resolved.into_iter().enumerate() {
            total += unit_price * Decimal::from(item.quantity);
            lines.push(OrderLine {
                id: i as i64 + 1,
                order_id,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price,
                note: item.note.clone(),
            });
        }

        let placed = PlacedOrder {
            order: Order {
                id: order_id,
                customer_name: request.customer_name.clone(),
                phone: request.phone.clone(),
                address: request.address.clone(),
                status: OrderStatus::Received,
                created_at: Utc::now(),
                total,
            },
            lines,
        };
        self.orders.lock().unwrap().push(placed.clone());
        Ok(placed)
    }

    async fn count_orders(&self) -> Result<u64, RepositoryError> {
        Ok(self.count().await)
    }

    async fn get_order(&self, id: i64) -> Result<Option<PlacedOrder>, RepositoryError> {
        Ok(self.order(id).await)
    }
}

/// A [`ChatModel`] that replays a fixed script of replies in order.
///
/// Each `complete` call pops the next scripted reply; running past the end
/// of the script is a test bug and panics. Requests are recorded for
/// assertions on what the model was shown.
pub(crate) struct ScriptedModel {
    script: Mutex<VecDeque<Result<ModelReply, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub(crate) fn new(script: Vec<Result<ModelReply, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<ModelReply, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted model ran out of replies")
    }
}
