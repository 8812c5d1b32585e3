//! Starter catalog for a fresh supply room.

use tracing::info;

use crate::errors::ServiceError;
use crate::models::StockItemInput;
use crate::repositories::StockRepository;
use crate::services::StockService;

/// `(id, description, unit, current, minimum, location)`
pub const STARTER_CATALOG: [(&str, &str, &str, i32, i32, &str); 5] = [
    ("1", "Papel A4 Branco", "Resma", 50, 10, "Armário A1"),
    ("2", "Caneta Esferográfica Azul", "Caixa 50un", 15, 5, "Gaveta B2"),
    ("3", "Toner HP LaserJet 1020", "Unidade", 3, 2, "Prateleira C1"),
    ("4", "Clips N. 2/0", "Caixa 100un", 100, 20, "Armário A2"),
    ("5", "Borracha Branca", "Unidade", 2, 10, "Gaveta B3"),
];

/// Inserts the catalog items whose ids are not present yet. Existing rows keep
/// their current quantities. Returns how many items were inserted.
pub async fn load_starter_catalog(
    repo: &StockRepository,
    stock: &StockService,
) -> Result<usize, ServiceError> {
    let mut inserted = 0;
    for (id, description, unit, current, minimum, location) in STARTER_CATALOG {
        if repo.find(id).await?.is_some() {
            continue;
        }
        stock
            .save_item(StockItemInput {
                id: Some(id.to_string()),
                description: description.to_string(),
                unit_of_measure: unit.to_string(),
                current_quantity: current,
                minimum_quantity: minimum,
                location: location.to_string(),
            })
            .await?;
        inserted += 1;
    }

    info!(inserted, "Starter catalog loaded");
    Ok(inserted)
}
