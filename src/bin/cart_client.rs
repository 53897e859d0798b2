use clap::Parser;
use shop_cart::client::CartClient;
use shop_cart::config::{init_tracing, ClientArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = ClientArgs::parse();
    let client = CartClient::new(&args.addr);

    let resp = client.add(args.product_id, args.quantity).await?;
    if let Some(item) = resp.item() {
        tracing::info!(
            product_id = item.product_id,
            quantity = item.quantity,
            "product added to cart"
        );
    }

    let resp = client.get().await?;
    if let Some(cart) = resp.cart() {
        tracing::info!(
            items = cart.items_count,
            quantity = cart.quantity_count,
            total = cart.total_price,
            "cart contents"
        );
    }
    Ok(())
}
