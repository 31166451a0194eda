//! Admin mode commands.
//!
//! # Usage
//!
//! ```bash
//! electrohome admin login 2468
//! electrohome admin status
//! electrohome admin logout
//! ```

use std::io::Write;

use electrohome_storefront::Storefront;

use super::CommandError;

pub fn login(
    storefront: &mut Storefront,
    pin: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    storefront.login(pin)?;
    writeln!(out, "Admin mode enabled.")?;
    Ok(())
}

pub fn logout(storefront: &mut Storefront, out: &mut impl Write) -> Result<(), CommandError> {
    storefront.logout()?;
    writeln!(out, "Admin mode disabled.")?;
    Ok(())
}

pub fn status(storefront: &Storefront, out: &mut impl Write) -> Result<(), CommandError> {
    let state = if storefront.is_admin() { "on" } else { "off" };
    writeln!(out, "Admin mode: {state}")?;
    Ok(())
}
