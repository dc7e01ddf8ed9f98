//! Offline walkthrough of a sales flow against the in-memory cart
//! aggregator, mirroring a cashier session on the sales screen. No backend
//! required; run with `cargo run --bin cart_demo`.

use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bpims_core::format::{format_currency, format_quantity};
use bpims_core::{CartAdjustments, CartAggregator, LineItem};

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bpims_core=debug,bpims_client=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut cart = CartAggregator::new();
    cart.set_cart(CartAdjustments {
        id: 1,
        delivery_fee: None,
        discount: None,
        sub_total: Decimal::ZERO,
        customer_id: None,
        customer_name: None,
    });

    // Cashier scans two of item 1, then three more of the same item.
    // The second add merges into the first line.
    cart.add_line_item(line(11, 1, "Coke 330ml", Decimal::new(2500, 2), Decimal::from(2), true));
    cart.add_line_item(line(11, 1, "Coke 330ml", Decimal::new(2500, 2), Decimal::from(3), true));

    // A weighed item with a fractional quantity.
    cart.add_line_item(line(
        12,
        3,
        "Rice (kg)",
        Decimal::new(5250, 2),
        Decimal::new(15, 1),
        false,
    ));

    for item in cart.line_items() {
        info!(
            name = %item.name,
            quantity = %format_quantity(item.quantity, item.sell_by_unit),
            total = %format_currency(item.line_total()),
            "cart line"
        );
    }

    let mut adjustments = cart.adjustments().cloned().unwrap_or_default();
    adjustments.delivery_fee = Some(Decimal::from(20));
    adjustments.discount = Some(Decimal::from(5));
    cart.set_cart(adjustments);

    let totals = cart.totals();
    info!(
        sub_total = %format_currency(totals.sub_total),
        items = %totals.total_cart_items,
        total = %format_currency(totals.total_amount),
        "totals with delivery fee and discount"
    );

    cart.clear_cart();
    info!(empty = cart.is_empty(), "cart cleared after payment");
}

fn line(
    id: i64,
    item_id: i64,
    name: &str,
    price: Decimal,
    quantity: Decimal,
    sell_by_unit: bool,
) -> LineItem {
    LineItem {
        id,
        item_id,
        name: name.to_string(),
        price,
        quantity,
        sell_by_unit,
        branch_qty: Decimal::from(100),
        branch_name: Some("Main Branch".to_string()),
        branch_item_id: item_id * 10,
    }
}
