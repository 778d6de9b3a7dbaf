//! Demo binary: wires up the inventory system and runs one end-to-end
//! scenario — register a product, post receipts and sales, then report
//! profit and portfolio statistics.

use rust_decimal::Decimal;
use stockroom::lifecycle::{setup_tracing, InventorySystem};
use stockroom::model::{MovementCreate, ProductCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting inventory system demo");

    let system = InventorySystem::new();

    // Register a product
    let product_params = ProductCreate {
        code: "NB-001".to_string(),
        description: "14-inch notebook".to_string(),
        category: "ELECTRONIC".to_string(),
        supplier_cost: Decimal::from(3000),
        stock_quantity: 0,
    };

    let span = tracing::info_span!("product_registration");
    let product = async {
        info!("Registering product");
        system
            .product_client
            .create_product(product_params)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(product_id = %product.id, code = %product.code, "Product registered");

    // Post two receipts and two sales
    let movements = vec![
        MovementCreate::entry(&product.id, 10, Decimal::from(3000))
            .with_description("Initial purchase order"),
        MovementCreate::entry(&product.id, 5, Decimal::from(3500))
            .with_description("Restock at higher cost"),
        MovementCreate::exit(&product.id, 8, Decimal::from(5800)).with_description("Retail sale"),
        MovementCreate::exit(&product.id, 4, Decimal::from(6000)).with_description("Retail sale"),
    ];

    let span = tracing::info_span!("movement_posting");
    async {
        for params in movements {
            let movement = system
                .movement_client
                .apply_movement(params)
                .await
                .map_err(|e| e.to_string())?;
            info!(
                movement_id = movement.id,
                movement_type = %movement.movement_type,
                quantity = movement.quantity,
                stock_after = movement.stock_after,
                "Movement recorded"
            );
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // A sale beyond the remaining stock is rejected without touching state
    let oversell = MovementCreate::exit(&product.id, 50, Decimal::from(6000));
    match system.movement_client.apply_movement(oversell).await {
        Ok(_) => error!("Oversell unexpectedly succeeded"),
        Err(e) => info!(error = %e, "Oversell rejected as expected"),
    }

    // Report profit and portfolio statistics
    let report = system
        .movement_client
        .compute_profit(&product.id)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        revenue = %report.revenue,
        cost = %report.cost,
        profit = %report.profit,
        quantity_sold = report.quantity_sold,
        "Profit report"
    );

    let stats = system
        .movement_client
        .dashboard_stats()
        .await
        .map_err(|e| e.to_string())?;
    info!(
        total_stock_value = %stats.total_stock_value,
        ranked = stats.top_profit_products.len(),
        "Dashboard"
    );

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
