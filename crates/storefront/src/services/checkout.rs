//! Checkout handoff.
//!
//! Checkout does not create an order. It renders the cart as a pre-filled
//! chat message and builds a `wa.me` deep link to the shop's phone number;
//! the conversation takes it from there. The cart is left as it is.

use thiserror::Error;
use url::Url;

use crate::services::cart::CartStore;

/// Base of the messaging deep link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Greeting that opens every order message.
const GREETING: &str = "¡Hola! Quiero comprar estos productos:";

/// Errors that can occur when building a checkout link.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The destination produced an unusable link.
    #[error("invalid checkout link: {0}")]
    InvalidLink(#[from] url::ParseError),
}

/// Render the order message for `cart`.
///
/// One line per cart line with quantity, name and line total, followed by
/// the grand total.
#[must_use]
pub fn order_message(cart: &CartStore) -> String {
    let mut lines = Vec::with_capacity(cart.lines().len() + 2);
    lines.push(GREETING.to_owned());
    lines.extend(cart.lines().iter().map(|line| {
        format!(
            "• {}× {} – {}",
            line.quantity,
            line.name,
            line.line_total().display()
        )
    }));
    lines.push(format!("Total: {}", cart.total().display()));
    lines.join("\n")
}

/// Build the deep link that opens a chat with `phone` and the order message.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart, or
/// `CheckoutError::InvalidLink` if the result does not parse as a URL.
pub fn checkout_link(phone: &str, cart: &CartStore) -> Result<Url, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let message = order_message(cart);
    let link = format!(
        "{WHATSAPP_BASE_URL}/{phone}?text={}",
        urlencoding::encode(&message)
    );
    tracing::info!(
        lines = cart.lines().len(),
        total = %cart.total(),
        "Checkout link built"
    );
    Ok(Url::parse(&link)?)
}
