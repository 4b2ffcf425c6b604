//! Checkout commands.
//!
//! The order itself is placed against the remote order API; these commands
//! record its outcome against the local cart.

use std::fmt::Write as _;

use biobaum_cart::{CartContext, CheckoutSummary, OrderOutcome, complete_order};
use biobaum_core::{OrderId, Price};
use tracing::instrument;

use super::CommandError;

/// Print the sponsorship summary.
pub fn summary(ctx: &CartContext) {
    let output = render_summary(&ctx.checkout_summary());

    #[allow(clippy::print_stdout)]
    {
        print!("{output}");
    }
}

/// Record a confirmed order. The cart is cleared.
///
/// # Errors
///
/// Returns `EmptyCart` if there is nothing to order.
#[instrument(skip(ctx))]
pub fn confirm(ctx: &CartContext, order_id: &str) -> Result<(), CommandError> {
    let receipt = ctx.update(|store| {
        complete_order(
            store,
            OrderOutcome::Confirmed {
                order_id: OrderId::new(order_id),
            },
        )
    })?;

    #[allow(clippy::print_stdout)]
    {
        println!("Thank you for your sponsorship!");
        println!(
            "Order {}: {} trees, {}",
            receipt.order_id,
            receipt.entries.iter().map(|e| u64::from(e.quantity())).sum::<u64>(),
            Price::new(receipt.total, ctx.currency())
        );
    }
    Ok(())
}

/// Record a failed order. The cart is kept for a retry.
///
/// # Errors
///
/// Always returns an error: `OrderFailed` with `reason`, or `EmptyCart`.
#[instrument(skip(ctx))]
pub fn fail(ctx: &CartContext, reason: String) -> Result<(), CommandError> {
    ctx.update(|store| complete_order(store, OrderOutcome::Failed { reason }))?;
    Ok(())
}

/// Render the checkout page summary.
fn render_summary(summary: &CheckoutSummary) -> String {
    if summary.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::from("Sponsorship summary\n");
    for line in &summary.lines {
        let name = line.name.as_deref().unwrap_or_else(|| line.item_id.as_str());
        let _ = writeln!(out, "  {name}");
        let _ = writeln!(
            out,
            "    {} x {} each = {}",
            line.quantity, line.price, line.line_price
        );
    }
    let _ = writeln!(out, "Trees: {}", summary.item_count);
    let _ = writeln!(out, "Subtotal: {}", summary.subtotal);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use biobaum_cart::{CartStore, CheckoutError, DisplayMetadata};
    use biobaum_core::{CurrencyCode, ItemId};
    use rust_decimal::Decimal;

    use super::*;

    fn ctx_with_apple() -> CartContext {
        let ctx = CartContext::new(CartStore::new(), CurrencyCode::EUR);
        ctx.update(|store| {
            store.add_item(
                ItemId::new("apple"),
                Decimal::new(2_500, 2),
                2,
                DisplayMetadata::named("Apple tree", None),
            )
        })
        .unwrap();
        ctx
    }

    #[test]
    fn test_render_summary() {
        let output = render_summary(&ctx_with_apple().checkout_summary());
        assert_eq!(
            output,
            "Sponsorship summary\n  Apple tree\n    2 x €25.00 each = €50.00\nTrees: 2\nSubtotal: €50.00\n"
        );
    }

    #[test]
    fn test_render_empty_summary() {
        let output = render_summary(&CheckoutSummary::empty(CurrencyCode::EUR));
        assert_eq!(output, "Your cart is empty\n");
    }

    #[test]
    fn test_confirm_clears_cart() {
        let ctx = ctx_with_apple();
        confirm(&ctx, "order-1").unwrap();
        assert!(ctx.read(CartStore::is_empty));
    }

    #[test]
    fn test_fail_keeps_cart() {
        let ctx = ctx_with_apple();
        let err = fail(&ctx, "card declined".to_string()).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Checkout(CheckoutError::OrderFailed(_))
        ));
        assert_eq!(ctx.read(|s| s.quantity(&ItemId::new("apple"))), 2);
    }
}
