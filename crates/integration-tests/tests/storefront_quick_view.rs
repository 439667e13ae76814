//! Integration tests for the quick-view modal flow.
//!
//! These tests require:
//! - A running storefront (cargo run -p lumora-storefront)
//! - A reachable catalog feed with at least one product
//!
//! Run with: cargo test -p lumora-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;

use lumora_integration_tests::{
    extract_first_product_name, extract_generation, storefront_base_url, visitor_client,
};

/// Open the quick view on the first feed product and settle the open
/// transition, returning the modal HTML.
async fn open_settled(client: &reqwest::Client) -> String {
    let base_url = storefront_base_url();

    let grid = client
        .get(format!("{base_url}/products/grid"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let name = extract_first_product_name(&grid).expect("Grid has no products");

    let modal = client
        .post(format!("{base_url}/quick-view/open"))
        .form(&[("name", name.as_str())])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let generation = extract_generation(&modal).expect("Modal carries no generation");
    client
        .post(format!("{base_url}/quick-view/opened"))
        .form(&[("generation", generation.to_string().as_str())])
        .send()
        .await
        .unwrap();

    modal
}

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog feed"]
async fn test_open_renders_modal_with_product() {
    let client = visitor_client();
    let modal = open_settled(&client).await;

    assert!(modal.contains("qv-overlay"));
    assert!(modal.contains("id=\"qv-media\""));
    assert!(modal.contains("id=\"qv-qty\""));
    assert!(!modal.contains("closing"));
}

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog feed"]
async fn test_carousel_navigation_responds() {
    let client = visitor_client();
    let base_url = storefront_base_url();
    open_settled(&client).await;

    let resp = client
        .post(format!("{base_url}/quick-view/next"))
        .send()
        .await
        .unwrap();

    // 200 with a fresh media fragment, or 204 when the product has a
    // single image and the carousel is inert
    assert!(matches!(
        resp.status(),
        StatusCode::OK | StatusCode::NO_CONTENT
    ));
}

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog feed"]
async fn test_quantity_clamps_at_one() {
    let client = visitor_client();
    let base_url = storefront_base_url();
    open_settled(&client).await;

    let body = client
        .post(format!("{base_url}/quick-view/quantity"))
        .form(&[("delta", "-5")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("<b>1</b>"));
}

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog feed"]
async fn test_add_commits_draft_quantity_to_cart() {
    let client = visitor_client();
    let base_url = storefront_base_url();
    open_settled(&client).await;

    client
        .post(format!("{base_url}/quick-view/quantity"))
        .form(&[("delta", "2")])
        .send()
        .await
        .unwrap();

    let body = client
        .post(format!("{base_url}/quick-view/add"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Added ✓"));

    let count = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(count.contains(">3<"));
}

#[tokio::test]
#[ignore = "Requires running storefront and reachable catalog feed"]
async fn test_close_cycle_discards_modal_state() {
    let client = visitor_client();
    let base_url = storefront_base_url();
    open_settled(&client).await;

    let closing = client
        .post(format!("{base_url}/quick-view/close"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(closing.contains("closing"));

    let generation = extract_generation(&closing).unwrap();
    let resp = client
        .post(format!("{base_url}/quick-view/closed"))
        .form(&[("generation", generation.to_string().as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().is_empty());

    // The controller is gone; further carousel requests are no-ops
    let resp = client
        .post(format!("{base_url}/quick-view/next"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
