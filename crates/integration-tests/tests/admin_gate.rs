//! Editor operations refused outside admin mode.

#![allow(clippy::unwrap_used)]

use electrohome_integration_tests::{ADMIN_PIN, TestContext, id};
use electrohome_storefront::StorefrontError;
use electrohome_storefront::services::auth::AuthError;
use electrohome_storefront::services::editor::EditorSession;

fn is_unauthorized<T>(result: Result<T, StorefrontError>) -> bool {
    matches!(result, Err(StorefrontError::Unauthorized))
}

#[test]
fn test_editor_refused_when_logged_out() {
    let ctx = TestContext::new();
    let mut storefront = ctx.open();
    let existing = storefront.catalog().list().first().unwrap().id.clone();

    assert!(is_unauthorized(storefront.begin_create()));
    assert!(is_unauthorized(storefront.begin_edit(&existing)));
    assert!(is_unauthorized(storefront.save_editor(EditorSession::create())));
    assert!(is_unauthorized(storefront.delete_product(&existing)));
    assert!(is_unauthorized(storefront.import_catalog("[]")));
    assert!(is_unauthorized(storefront.export_catalog()));

    assert_eq!(storefront.catalog().len(), 3);
}

#[test]
fn test_shopping_needs_no_admin() {
    let ctx = TestContext::new();
    let mut storefront = ctx.open();
    let existing = storefront.catalog().list().first().unwrap().id.clone();

    storefront.add_to_cart(&existing).unwrap();
    storefront.change_quantity(&existing, 1).unwrap();
    assert!(storefront.checkout_link().is_ok());
    assert!(storefront.remove_from_cart(&existing).unwrap());
}

#[test]
fn test_wrong_pin_keeps_gate_closed() {
    let ctx = TestContext::new();
    let mut storefront = ctx.open();

    for attempt in ["", "0000", "2468 ", "24680"] {
        let err = storefront.login(attempt).unwrap_err();
        assert!(matches!(err, StorefrontError::Auth(AuthError::WrongPin)));
    }
    assert!(!storefront.is_admin());
    assert!(!ctx.open().is_admin());
}

#[test]
fn test_logout_locks_editor_again() {
    let ctx = TestContext::new();
    let mut storefront = ctx.open();

    storefront.login(ADMIN_PIN).unwrap();
    assert!(storefront.begin_create().is_ok());
    storefront.logout().unwrap();
    assert!(is_unauthorized(storefront.begin_create()));
    assert!(is_unauthorized(storefront.delete_product(&id("any"))));
}
