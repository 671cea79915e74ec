//! Shared fixtures for OxCatalog end-to-end tests
//!
//! Wires the controllers to a wiremock backend that serves each tenant
//! under a path prefix (`/{tenant}/...`).

use oxcatalog_app::{LoginController, ProductListController, SearchController, SessionGate};
use oxcatalog_core::{SearchField, SessionStore};
use oxcatalog_egress::{AuthService, CatalogClient, HttpClientConfig, TenantEndpoint, create_client};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

pub const TENANT: &str = "toko";
pub const TOKEN: &str = "jwt-token-123";

/// Controllers sharing one session store
pub struct TestApp {
    pub store: Arc<dyn SessionStore>,
    pub gate: SessionGate,
    pub login: LoginController,
    pub products: ProductListController,
    pub search: SearchController,
}

impl TestApp {
    pub fn new(base_uri: &str, store: Arc<dyn SessionStore>, page_size: u32) -> Self {
        Self::with_search_field(base_uri, store, page_size, SearchField::Sku)
    }

    pub fn with_search_field(
        base_uri: &str,
        store: Arc<dyn SessionStore>,
        page_size: u32,
        field: SearchField,
    ) -> Self {
        let client = create_client(&HttpClientConfig::default()).unwrap();
        let endpoint = TenantEndpoint::new(format!("{}/{{tenant}}", base_uri)).unwrap();
        let catalog = CatalogClient::new(client.clone(), endpoint.clone());
        let gate = SessionGate::new(Arc::clone(&store));

        Self {
            login: LoginController::new(AuthService::new(client, endpoint), Arc::clone(&store)),
            products: ProductListController::new(catalog.clone(), gate.clone(), page_size),
            search: SearchController::new(catalog, gate.clone(), 1000, field),
            gate,
            store,
        }
    }
}

pub fn item(id: i64, sku: &str) -> Value {
    json!({
        "id": id,
        "sku": sku,
        "supplier": "ACME",
        "barcode": format!("4780{id:06}"),
        "lastUpdateTime": "2024-03-01 10:00:00"
    })
}

pub fn numbered_items(range: std::ops::RangeInclusive<i64>) -> Vec<Value> {
    range.map(|id| item(id, &format!("SKU-{id:03}"))).collect()
}

/// Identity endpoint for [`TENANT`] accepting `user_task` / `user_task`
pub async fn mount_login(server: &MockServer) {
    mount_tenant_login(server, TENANT, TOKEN).await;
}

/// Identity endpoint for `tenant` accepting `user_task` / `user_task`
pub async fn mount_tenant_login(server: &MockServer, tenant: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/{}/security/auth_check", tenant)))
        .and(body_string_contains("_username=user_task"))
        .and(body_string_contains("_password=user_task"))
        .and(body_string_contains(format!("_subdomain={}", tenant)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .mount(server)
        .await;
}

/// One catalog page for the test token
pub async fn mount_page(
    server: &MockServer,
    page: u32,
    size: u32,
    items: Vec<Value>,
    total_count: u64,
) {
    mount_tenant_page(server, TENANT, TOKEN, page, size, items, total_count).await;
}

/// One catalog page of `tenant`, served only to `token`
pub async fn mount_tenant_page(
    server: &MockServer,
    tenant: &str,
    token: &str,
    page: u32,
    size: u32,
    items: Vec<Value>,
    total_count: u64,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/variations", tenant)))
        .and(query_param("page", page.to_string()))
        .and(query_param("size", size.to_string()))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": items,
            "total_count": total_count
        })))
        .mount(server)
        .await;
}
