// Catalog API client against an in-process fake backend
use storefront::models::{NewCategory, NewProduct, NewUser};
use storefront::testing::constants::{
    ADMIN_PASSWORD, ADMIN_TOKEN, ADMIN_USERNAME, CUSTOMER_TOKEN,
};
use storefront::testing::{FakeBackend, TestFixtures};
use storefront::{ApiClient, ApiError};

fn client(backend: &FakeBackend) -> ApiClient {
    ApiClient::new(backend.base_url()).expect("fake backend URL should parse")
}

#[actix_web::test]
async fn test_login_returns_token() {
    let backend = FakeBackend::start();
    let api = client(&backend);

    let credential = api.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(credential.as_str(), ADMIN_TOKEN);

    let err = api.login(ADMIN_USERNAME, "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert_eq!(err.user_message(), "Incorrect username or password");

    backend.stop().await;
}

#[actix_web::test]
async fn test_signup_then_duplicate_reports_detail() {
    let backend = FakeBackend::start();
    let api = client(&backend);
    let user = NewUser {
        username: "bob".to_string(),
        password: "hunter2".to_string(),
    };

    let created = api.signup(&user).await.unwrap();
    assert_eq!(created.username, "bob");
    assert_eq!(created.role, "customer");

    let err = api.signup(&user).await.unwrap_err();
    assert_eq!(err.user_message(), "Username already registered");

    backend.stop().await;
}

#[actix_web::test]
async fn test_session_info_reports_role() {
    let backend = FakeBackend::start();
    let api = client(&backend);

    let session = api
        .session_info(&TestFixtures::credential(CUSTOMER_TOKEN))
        .await
        .unwrap();
    assert_eq!(session.role, "customer");

    let err = api
        .session_info(&TestFixtures::credential("stale"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert_eq!(backend.session_calls(), 2);

    backend.stop().await;
}

#[actix_web::test]
async fn test_catalog_reads() {
    let backend = FakeBackend::start();
    let api = client(&backend);
    let mugs = backend.seed_category("Mugs");
    let _ = backend.seed_category("Shirts");
    let mug = backend.seed_product("Blue Mug", 9.5, &mugs);

    let categories = api.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0], mugs);

    let detail = api.category(mugs.id).await.unwrap();
    assert_eq!(detail.name, "Mugs");
    assert_eq!(detail.products.len(), 1);
    assert_eq!(detail.products[0].name, mug.name);
    assert!(detail.products[0].category.is_none());

    let products = api.products(None).await.unwrap();
    assert_eq!(products, vec![mug]);

    let missing = api.category(999).await.unwrap_err();
    assert_eq!(missing.user_message(), "Category not found");

    backend.stop().await;
}

#[actix_web::test]
async fn test_catalog_writes() {
    let backend = FakeBackend::start();
    let api = client(&backend);
    let admin = TestFixtures::credential(ADMIN_TOKEN);

    let category = api
        .create_category(
            Some(&admin),
            &NewCategory {
                name: "Lamps".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(category.name, "Lamps");

    let product = api
        .create_product(
            &admin,
            &NewProduct {
                name: "Desk Lamp".to_string(),
                description: "Warm light".to_string(),
                price: 24.0,
                category_id: category.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(product.category, Some(category.clone()));

    let forbidden = api
        .create_product(
            &TestFixtures::credential(CUSTOMER_TOKEN),
            &NewProduct {
                name: "Floor Lamp".to_string(),
                description: String::new(),
                price: 40.0,
                category_id: category.id,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(forbidden.user_message(), "Not enough permissions");

    backend.stop().await;
}

#[actix_web::test]
async fn test_validation_errors_join_messages() {
    let backend = FakeBackend::start();
    let api = client(&backend);
    let admin = TestFixtures::credential(ADMIN_TOKEN);
    let category = backend.seed_category("Mugs");

    let err = api
        .create_product(
            &admin,
            &NewProduct {
                name: "Free Mug".to_string(),
                description: String::new(),
                price: 0.0,
                category_id: category.id,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 422, .. }));
    assert_eq!(err.user_message(), "Input should be greater than 0");

    let err = api
        .create_category(Some(&admin), &NewCategory { name: " ".to_string() })
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "String should have at least 1 character");

    backend.stop().await;
}

#[actix_web::test]
async fn test_unreachable_backend_is_transport_error() {
    let backend = FakeBackend::start();
    let api = client(&backend);
    backend.stop().await;

    let err = api.categories().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
