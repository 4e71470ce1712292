//! Tool registry: typed dispatch for the model's deterministic operations.
//!
//! The fixed tool set is a checked enum rather than a string lookup, and
//! argument payloads are decoded into validated request types before any
//! business logic runs. Execution never fails structurally at this
//! boundary: unknown names, malformed payloads, and catalog/ledger errors
//! are all folded into human-readable result strings the model can relay.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use devburger_types::llm::ToolSpec;
use devburger_types::order::{
    LedgerError, LineItemRequest, OrderRequest, OrderValidationError, PlacedOrder,
};

use crate::catalog::CatalogRepository;
use crate::ledger::OrderLedger;

/// The fixed set of tools the model may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ListMenu,
    FinalizeOrder,
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolName::ListMenu => write!(f, "listMenu"),
            ToolName::FinalizeOrder => write!(f, "finalizeOrder"),
        }
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listMenu" => Ok(ToolName::ListMenu),
            "finalizeOrder" => Ok(ToolName::FinalizeOrder),
            other => Err(format!("unknown tool: '{other}'")),
        }
    }
}

impl ToolName {
    /// Tool declarations offered to the model on the first pass of a round.
    pub fn specs() -> Vec<ToolSpec> {
        vec![
            ToolSpec {
                name: ToolName::ListMenu.to_string(),
                description: "Consulta o cardápio e os preços atuais.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            ToolSpec {
                name: ToolName::FinalizeOrder.to_string(),
                description: "Salva o pedido no banco.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "nameCliente": {"type": "string"},
                        "phone": {"type": "string"},
                        "address": {"type": "string"},
                        "items": {
                            "type": "array",
                            "minItems": 1,
                            "items": {
                                "type": "object",
                                "properties": {
                                    "product": {"type": "string"},
                                    "quantity": {"type": "integer", "minimum": 1},
                                    "note": {"type": "string"}
                                },
                                "required": ["product", "quantity"]
                            }
                        }
                    },
                    "required": ["nameCliente", "phone", "address", "items"]
                }),
            },
        ]
    }
}

/// Wire shape of the `finalizeOrder` argument payload.
#[derive(Debug, Deserialize)]
struct FinalizeOrderArgs {
    #[serde(rename = "nameCliente")]
    name_cliente: String,
    phone: String,
    address: String,
    #[serde(default)]
    items: Vec<LineItemArgs>,
}

#[derive(Debug, Deserialize)]
struct LineItemArgs {
    product: String,
    quantity: u32,
    #[serde(default)]
    note: Option<String>,
}

/// Executes validated tool calls against the catalog and the order ledger.
pub struct ToolRegistry<C, L> {
    catalog: C,
    ledger: L,
}

impl<C, L> ToolRegistry<C, L>
where
    C: CatalogRepository,
    L: OrderLedger,
{
    pub fn new(catalog: C, ledger: L) -> Self {
        Self { catalog, ledger }
    }

    /// Execute one requested call. Always returns the result as text:
    /// errors become strings the model is expected to use when asking the
    /// customer to clarify.
    pub async fn execute(&self, name: &str, arguments: &Value) -> String {
        let Ok(tool) = name.parse::<ToolName>() else {
            warn!(tool = name, "unknown tool requested");
            return format!("Ferramenta desconhecida: '{name}'.");
        };
        debug!(tool = %tool, "executing tool");
        match tool {
            ToolName::ListMenu => self.list_menu().await,
            ToolName::FinalizeOrder => self.finalize_order(arguments).await,
        }
    }

    async fn list_menu(&self) -> String {
        match self.catalog.get_all().await {
            Ok(items) if items.is_empty() => "O cardápio está vazio.".to_string(),
            Ok(items) => {
                let mut text = String::from("🍔 CARDÁPIO 🍔\n");
                for item in &items {
                    text.push_str(&format!(
                        "- {}: R$ {:.2} ({})\n",
                        item.name, item.price, item.description
                    ));
                }
                text
            }
            Err(e) => {
                warn!(error = %e, "catalog read failed");
                format!("Erro ao consultar o cardápio: {e}")
            }
        }
    }

    async fn finalize_order(&self, arguments: &Value) -> String {
        let args: FinalizeOrderArgs = match serde_json::from_value(arguments.clone()) {
            Ok(args) => args,
            Err(e) => return format!("Erro ao processar dados do pedido: {e}"),
        };

        let request = OrderRequest {
            customer_name: args.name_cliente.trim().to_string(),
            phone: args.phone.trim().to_string(),
            address: args.address.trim().to_string(),
            items: args
                .items
                .into_iter()
                .map(|item| LineItemRequest {
                    product_name: item.product,
                    quantity: item.quantity,
                    note: item.note,
                })
                .collect(),
        };

        if let Err(e) = request.validate() {
            return validation_message(&e);
        }

        // All-or-nothing: every product must resolve before the ledger is
        // touched, so a typo in one item never leaves a partial order.
        for item in &request.items {
            match self.catalog.find_by_name(&item.product_name).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return format!("Erro: Produto '{}' não encontrado.", item.product_name);
                }
                Err(e) => {
                    warn!(error = %e, "catalog lookup failed");
                    return format!("Erro ao consultar o cardápio: {e}");
                }
            }
        }

        match self.ledger.create_order(&request).await {
            Ok(placed) => {
                debug!(order_id = placed.order.id, "order committed");
                format_confirmation(&placed)
            }
            Err(LedgerError::UnknownProduct(name)) => {
                format!("Erro: Produto '{name}' não encontrado.")
            }
            Err(LedgerError::Invalid(e)) => validation_message(&e),
            Err(e) => {
                warn!(error = %e, "order persistence failed");
                format!("Erro interno ao salvar: {e}")
            }
        }
    }
}

fn validation_message(err: &OrderValidationError) -> String {
    match err {
        OrderValidationError::MissingField(field) => {
            format!("Erro: o campo '{field}' é obrigatório.")
        }
        OrderValidationError::EmptyItems => {
            "Erro: o pedido precisa de pelo menos um item.".to_string()
        }
        OrderValidationError::InvalidQuantity { product } => {
            format!("Erro: quantidade inválida para '{product}'.")
        }
    }
}

fn format_confirmation(placed: &PlacedOrder) -> String {
    let summary = placed
        .lines
        .iter()
        .map(|line| format!("{}x {}", line.quantity, line.product_name))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "✅ Pedido #{} confirmado!\n🏠 Entrega em: {}\n🍔 Itens: {}\n💰 Total: R$ {:.2}",
        placed.order.id, placed.order.address, summary, placed.order.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{menu_fixture, MemoryCatalog, MemoryLedger};
    use serde_json::json;

    fn registry() -> ToolRegistry<MemoryCatalog, MemoryLedger> {
        let items = menu_fixture();
        ToolRegistry::new(MemoryCatalog::new(items.clone()), MemoryLedger::new(items))
    }

    fn order_args() -> Value {
        json!({
            "nameCliente": "Ana",
            "phone": "11999999999",
            "address": "Rua A, 123",
            "items": [{"product": "X-Python", "quantity": 2}]
        })
    }

    #[test]
    fn test_tool_name_roundtrip() {
        for tool in [ToolName::ListMenu, ToolName::FinalizeOrder] {
            let parsed: ToolName = tool.to_string().parse().unwrap();
            assert_eq!(tool, parsed);
        }
        assert!("grillCleaner".parse::<ToolName>().is_err());
    }

    #[test]
    fn test_specs_match_wire_contract() {
        let specs = ToolName::specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "listMenu");
        let finalize = &specs[1];
        assert_eq!(finalize.name, "finalizeOrder");
        let required = finalize.parameters["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(required.contains(&json!("nameCliente")));
        assert_eq!(
            finalize.parameters["properties"]["items"]["items"]["required"],
            json!(["product", "quantity"])
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_checked_case() {
        let result = registry().execute("grillCleaner", &json!({})).await;
        assert_eq!(result, "Ferramenta desconhecida: 'grillCleaner'.");
    }

    #[tokio::test]
    async fn test_list_menu_empty_catalog() {
        let registry = ToolRegistry::new(
            MemoryCatalog::new(Vec::new()),
            MemoryLedger::new(Vec::new()),
        );
        let result = registry.execute("listMenu", &json!({})).await;
        assert_eq!(result, "O cardápio está vazio.");
    }

    #[tokio::test]
    async fn test_list_menu_formats_names_and_prices() {
        let result = registry().execute("listMenu", &json!({})).await;
        assert!(result.starts_with("🍔 CARDÁPIO 🍔"));
        assert!(result.contains("X-Python: R$ 28.90"));
        assert!(result.contains("Coca-Cola Lata: R$ 6.00"));
    }

    #[tokio::test]
    async fn test_finalize_order_success_confirmation() {
        let registry = registry();
        let result = registry.execute("finalizeOrder", &order_args()).await;
        assert!(result.contains("✅ Pedido #1 confirmado!"), "{result}");
        assert!(result.contains("Entrega em: Rua A, 123"));
        assert!(result.contains("2x X-Python"));
        assert!(result.contains("Total: R$ 57.80"));
        assert_eq!(registry.ledger.count().await, 1);

        let placed = registry.ledger.order(1).await.unwrap();
        assert_eq!(placed.lines.len(), 1);
        assert_eq!(placed.lines[0].quantity, 2);
        assert_eq!(format!("{:.2}", placed.order.total), "57.80");
    }

    #[tokio::test]
    async fn test_finalize_order_unknown_product_persists_nothing() {
        let registry = registry();
        let args = json!({
            "nameCliente": "Ana",
            "phone": "11999999999",
            "address": "Rua A, 123",
            "items": [
                {"product": "X-Python", "quantity": 1},
                {"product": "X-Rust", "quantity": 1}
            ]
        });
        let result = registry.execute("finalizeOrder", &args).await;
        assert_eq!(result, "Erro: Produto 'X-Rust' não encontrado.");
        assert_eq!(registry.ledger.count().await, 0);
    }

    #[tokio::test]
    async fn test_finalize_order_malformed_payload() {
        let registry = registry();
        let result = registry
            .execute("finalizeOrder", &json!({"nameCliente": "Ana"}))
            .await;
        assert!(result.starts_with("Erro ao processar dados do pedido:"));
        assert_eq!(registry.ledger.count().await, 0);
    }

    #[tokio::test]
    async fn test_finalize_order_blank_field_rejected() {
        let registry = registry();
        let mut args = order_args();
        args["address"] = json!("   ");
        let result = registry.execute("finalizeOrder", &args).await;
        assert_eq!(result, "Erro: o campo 'address' é obrigatório.");
        assert_eq!(registry.ledger.count().await, 0);
    }

    #[tokio::test]
    async fn test_finalize_order_empty_items_rejected() {
        let registry = registry();
        let mut args = order_args();
        args["items"] = json!([]);
        let result = registry.execute("finalizeOrder", &args).await;
        assert_eq!(result, "Erro: o pedido precisa de pelo menos um item.");
    }

    #[tokio::test]
    async fn test_finalize_order_zero_quantity_rejected() {
        let registry = registry();
        let mut args = order_args();
        args["items"][0]["quantity"] = json!(0);
        let result = registry.execute("finalizeOrder", &args).await;
        assert_eq!(result, "Erro: quantidade inválida para 'X-Python'.");
    }

    #[tokio::test]
    async fn test_finalize_order_carries_note() {
        let registry = registry();
        let mut args = order_args();
        args["items"][0]["note"] = json!("sem cebola");
        registry.execute("finalizeOrder", &args).await;
        let placed = registry.ledger.order(1).await.unwrap();
        assert_eq!(placed.lines[0].note.as_deref(), Some("sem cebola"));
    }
}
