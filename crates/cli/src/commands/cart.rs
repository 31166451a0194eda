//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! electrohome cart add k3j9x0qa
//! electrohome cart inc k3j9x0qa --by 2
//! electrohome cart show
//! electrohome cart checkout
//! ```

use std::io::Write;

use electrohome_core::ProductId;
use electrohome_storefront::Storefront;

use super::CommandError;

/// Print the cart lines, item count and total.
pub fn show(storefront: &Storefront, out: &mut impl Write) -> Result<(), CommandError> {
    let cart = storefront.cart();
    if cart.is_empty() {
        writeln!(out, "Cart is empty.")?;
        return Ok(());
    }

    for line in cart.lines() {
        let gone = if storefront.catalog().get(&line.product_id).is_none() {
            "  (no longer in catalog)"
        } else {
            ""
        };
        writeln!(
            out,
            "{}  {}× {} @ {} = {}{gone}",
            line.product_id,
            line.quantity,
            line.name,
            line.unit_price.display(),
            line.line_total().display()
        )?;
    }
    writeln!(
        out,
        "{} items · Total: {}",
        cart.item_count(),
        cart.total().display()
    )?;
    Ok(())
}

/// Add one unit of a catalog product.
pub fn add(
    storefront: &mut Storefront,
    id: &ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    storefront.add_to_cart(id)?;
    write_quantity(storefront, id, out)
}

/// Shift a line's quantity; positive `delta` increments, negative decrements.
pub fn change(
    storefront: &mut Storefront,
    id: &ProductId,
    delta: i64,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    storefront.change_quantity(id, delta)?;
    write_quantity(storefront, id, out)
}

/// Drop a line from the cart.
pub fn remove(
    storefront: &mut Storefront,
    id: &ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if storefront.remove_from_cart(id)? {
        writeln!(out, "Removed {id} from the cart.")?;
    } else {
        writeln!(out, "{id} is not in the cart.")?;
    }
    Ok(())
}

/// Print the order message and the link that sends it.
pub fn checkout(storefront: &Storefront, out: &mut impl Write) -> Result<(), CommandError> {
    let link = storefront.checkout_link()?;
    writeln!(out, "{}\n", storefront.checkout_message())?;
    writeln!(out, "Send your order: {link}")?;
    Ok(())
}

fn write_quantity(
    storefront: &Storefront,
    id: &ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match storefront.cart().line(id) {
        Some(line) => writeln!(out, "{}× {} in the cart.", line.quantity, line.name)?,
        None => writeln!(out, "{id} is not in the cart.")?,
    }
    Ok(())
}
