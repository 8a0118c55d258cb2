use std::sync::Arc;

use chrono::{Days, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use sales_orders::config::AppConfig;
use sales_orders::domain::order::{
    AddOrderItemCommand, OrderCommandHandler, OrderFactory, OrderItem, Voucher, VoucherType,
};
use sales_orders::infrastructure::InMemoryOrderRepository;
use sales_orders::messaging::InMemoryMediator;
use sales_orders::metrics::Metrics;
use sales_orders::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Default to INFO level, can be overridden with RUST_LOG env var
    telemetry::init_tracing(&config.log_filter);

    tracing::info!("Starting sales order demo");

    let repository = Arc::new(InMemoryOrderRepository::new());
    let mediator = Arc::new(InMemoryMediator::new());
    let metrics = Arc::new(Metrics::new()?);
    let handler = OrderCommandHandler::new(
        repository.clone(),
        mediator.clone(),
        metrics.clone(),
        config.commit_retry.clone(),
    );

    // === 1. Add an item through the command handler ===
    let customer_id = Uuid::new_v4();
    let command = AddOrderItemCommand::new(
        customer_id,
        Uuid::new_v4(),
        "Mechanical keyboard",
        2,
        Decimal::from(50),
    );
    let committed = handler.handle(command).await?;
    tracing::info!(committed, orders = repository.committed_count(), "Command handled");

    // === 2. Work with an order directly and apply a voucher ===
    let mut order = OrderFactory::generate_order(customer_id);
    let product_id = Uuid::new_v4();
    order.add_item(OrderItem::new(product_id, "USB cable", 2, Decimal::from(50)))?;
    order.add_item(OrderItem::new(product_id, "USB cable", 1, Decimal::from(50)))?;
    order.add_item(OrderItem::new(Uuid::new_v4(), "Monitor", 1, Decimal::from(250)))?;

    let voucher = Arc::new(Voucher::new(
        "WELCOME-10",
        None,
        Some(Decimal::from(10)),
        1,
        true,
        false,
        Utc::now().date_naive() + Days::new(30),
        VoucherType::Percentage,
    ));
    let result = handler.apply_voucher(&mut order, voucher);

    tracing::info!(
        order_id = %order.id(),
        valid = result.is_valid(),
        items = order.order_items().len(),
        discount = %order.discount(),
        total_value = %order.total_value(),
        "Order snapshot: {}",
        serde_json::to_string(&order)?
    );

    tracing::debug!("Metrics:\n{}", metrics.render()?);
    tracing::info!(events = mediator.published().len(), "Demo complete");

    Ok(())
}
