//! Mock objects and fake implementations for testing
//!
//! - [`MockSessionSource`] answers session lookups from memory and counts them
//! - [`FakeBackend`] is an in-process catalog API served over real HTTP

use actix_web::{dev::ServerHandle, web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

use crate::api::ApiError;
use crate::models::{Category, NewCategory, NewProduct, NewUser, Product, SessionPayload};
use crate::session::{Credential, SessionSource};

use super::constants::{
    ADMIN_PASSWORD, ADMIN_TOKEN, ADMIN_USERNAME, CUSTOMER_PASSWORD, CUSTOMER_TOKEN,
    CUSTOMER_USERNAME,
};

enum MockResponse {
    Role(String),
    Status(u16),
    Malformed,
}

/// Session source with a canned answer
pub struct MockSessionSource {
    response: MockResponse,
    calls: AtomicUsize,
    last_token: Mutex<Option<String>>,
    gate: Option<watch::Sender<bool>>,
}

impl MockSessionSource {
    fn new(response: MockResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_token: Mutex::new(None),
            gate: None,
        }
    }

    /// Every lookup succeeds with this role string
    #[must_use]
    pub fn with_role(role: &str) -> Self {
        Self::new(MockResponse::Role(role.to_string()))
    }

    /// Every lookup fails with this HTTP status
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self::new(MockResponse::Status(status))
    }

    /// Every lookup returns a body without a role
    #[must_use]
    pub fn malformed() -> Self {
        Self::new(MockResponse::Malformed)
    }

    /// Hold every lookup until [`release`](Self::release) is called
    #[must_use]
    pub fn gated(mut self) -> Self {
        self.gate = Some(watch::channel(false).0);
        self
    }

    /// Let held and future lookups complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.send_replace(true);
        }
    }

    /// Number of lookups started so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Token presented in the most recent lookup
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionSource for MockSessionSource {
    async fn fetch_session(&self, credential: &Credential) -> Result<SessionPayload, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = Some(credential.as_str().to_string());

        if let Some(gate) = &self.gate {
            let mut open = gate.subscribe();
            let _ = open.wait_for(|open| *open).await;
        }

        match &self.response {
            MockResponse::Role(role) => Ok(SessionPayload {
                id: Some(1),
                username: Some("mock".to_string()),
                role: role.clone(),
            }),
            MockResponse::Status(status) => Err(ApiError::Status {
                status: *status,
                detail: "Could not validate credentials".to_string(),
            }),
            MockResponse::Malformed => Err(ApiError::Malformed("missing field `role`".to_string())),
        }
    }
}

struct FakeUser {
    password: String,
    role: String,
    token: String,
}

#[derive(Default)]
struct FakeCatalog {
    users: HashMap<String, FakeUser>,
    categories: Vec<Category>,
    products: Vec<Product>,
    next_id: i64,
}

impl FakeCatalog {
    fn seeded() -> Self {
        let mut catalog = Self {
            next_id: 1,
            ..Self::default()
        };
        for (username, password, role, token) in [
            (ADMIN_USERNAME, ADMIN_PASSWORD, "admin", ADMIN_TOKEN),
            (CUSTOMER_USERNAME, CUSTOMER_PASSWORD, "customer", CUSTOMER_TOKEN),
        ] {
            catalog.users.insert(
                username.to_string(),
                FakeUser {
                    password: password.to_string(),
                    role: role.to_string(),
                    token: token.to_string(),
                },
            );
        }
        catalog
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn user_for_token(&self, token: &str) -> Option<(&String, &FakeUser)> {
        self.users.iter().find(|(_, user)| user.token == token)
    }
}

struct FakeState {
    catalog: Mutex<FakeCatalog>,
    session_calls: AtomicUsize,
}

type Shared = web::Data<FakeState>;

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

fn detail(status: actix_web::http::StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": message }))
}

fn bearer(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

async fn token(state: Shared, form: web::Form<LoginForm>) -> HttpResponse {
    let catalog = state.catalog.lock().unwrap();
    match catalog.users.get(&form.username) {
        Some(user) if user.password == form.password => HttpResponse::Ok().json(json!({
            "access_token": user.token,
            "token_type": "bearer",
        })),
        _ => detail(
            actix_web::http::StatusCode::UNAUTHORIZED,
            "Incorrect username or password",
        ),
    }
}

async fn signup(state: Shared, body: web::Json<NewUser>) -> HttpResponse {
    let mut catalog = state.catalog.lock().unwrap();
    if catalog.users.contains_key(&body.username) {
        return detail(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Username already registered",
        );
    }
    let id = catalog.next_id();
    catalog.users.insert(
        body.username.clone(),
        FakeUser {
            password: body.password.clone(),
            role: "customer".to_string(),
            token: format!("token-{}", body.username),
        },
    );
    HttpResponse::Created().json(json!({
        "id": id,
        "username": body.username,
        "role": "customer",
    }))
}

async fn my_session(state: Shared, req: HttpRequest) -> HttpResponse {
    state.session_calls.fetch_add(1, Ordering::SeqCst);
    let catalog = state.catalog.lock().unwrap();
    match bearer(&req).as_deref().and_then(|t| catalog.user_for_token(t)) {
        Some((username, user)) => HttpResponse::Ok().json(json!({
            "id": 1,
            "username": username,
            "role": user.role,
        })),
        None => detail(
            actix_web::http::StatusCode::UNAUTHORIZED,
            "Could not validate credentials",
        ),
    }
}

async fn list_categories(state: Shared) -> HttpResponse {
    HttpResponse::Ok().json(&state.catalog.lock().unwrap().categories)
}

async fn create_category(state: Shared, body: web::Json<NewCategory>) -> HttpResponse {
    let mut catalog = state.catalog.lock().unwrap();
    if body.name.trim().is_empty() {
        return HttpResponse::UnprocessableEntity().json(json!({
            "detail": [{"loc": ["body", "name"], "msg": "String should have at least 1 character"}]
        }));
    }
    let category = Category {
        id: catalog.next_id(),
        name: body.name.clone(),
    };
    catalog.categories.push(category.clone());
    HttpResponse::Created().json(category)
}

async fn get_category(state: Shared, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let catalog = state.catalog.lock().unwrap();
    let Some(category) = catalog.categories.iter().find(|c| c.id == id) else {
        return detail(actix_web::http::StatusCode::NOT_FOUND, "Category not found");
    };
    let products: Vec<_> = catalog
        .products
        .iter()
        .filter(|p| p.category.as_ref().is_some_and(|c| c.id == id))
        .map(|p| {
            json!({
                "id": p.id,
                "name": p.name,
                "description": p.description,
                "price": p.price,
            })
        })
        .collect();
    HttpResponse::Ok().json(json!({
        "id": category.id,
        "name": category.name,
        "products": products,
    }))
}

async fn list_products(state: Shared) -> HttpResponse {
    HttpResponse::Ok().json(&state.catalog.lock().unwrap().products)
}

async fn create_product(state: Shared, req: HttpRequest, body: web::Json<NewProduct>) -> HttpResponse {
    let mut catalog = state.catalog.lock().unwrap();
    let is_admin = bearer(&req)
        .as_deref()
        .and_then(|t| catalog.user_for_token(t))
        .is_some_and(|(_, user)| user.role == "admin");
    if !is_admin {
        return detail(actix_web::http::StatusCode::FORBIDDEN, "Not enough permissions");
    }
    if body.price <= 0.0 {
        return HttpResponse::UnprocessableEntity().json(json!({
            "detail": [{"loc": ["body", "price"], "msg": "Input should be greater than 0"}]
        }));
    }
    let Some(category) = catalog
        .categories
        .iter()
        .find(|c| c.id == body.category_id)
        .cloned()
    else {
        return detail(actix_web::http::StatusCode::NOT_FOUND, "Category not found");
    };
    let product = Product {
        id: catalog.next_id(),
        name: body.name.clone(),
        description: body.description.clone(),
        price: body.price,
        category: Some(category),
    };
    catalog.products.push(product.clone());
    HttpResponse::Created().json(product)
}

/// In-process stand-in for the catalog API, bound to an ephemeral port
///
/// Seeded with one admin and one customer account (see
/// [`constants`](super::constants)). Must be started inside an actix runtime,
/// e.g. from an `#[actix_web::test]`.
pub struct FakeBackend {
    base_url: String,
    state: Shared,
    handle: ServerHandle,
}

impl FakeBackend {
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    #[must_use]
    pub fn start() -> Self {
        let state = web::Data::new(FakeState {
            catalog: Mutex::new(FakeCatalog::seeded()),
            session_calls: AtomicUsize::new(0),
        });

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/api/v1/users/token", web::post().to(token))
                .route("/api/v1/users/", web::post().to(signup))
                .route("/api/v1/users/my_session/", web::get().to(my_session))
                .route("/api/v1/categories", web::get().to(list_categories))
                .route("/api/v1/categories", web::post().to(create_category))
                .route("/api/v1/categories/{id}", web::get().to(get_category))
                .route("/api/v1/products", web::get().to(list_products))
                .route("/api/v1/products", web::post().to(create_product))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            state,
            handle,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of requests the session endpoint has received
    #[must_use]
    pub fn session_calls(&self) -> usize {
        self.state.session_calls.load(Ordering::SeqCst)
    }

    /// Register an account with an arbitrary role string; its token is `token-{username}`
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed_user(&self, username: &str, password: &str, role: &str) {
        self.state.catalog.lock().unwrap().users.insert(
            username.to_string(),
            FakeUser {
                password: password.to_string(),
                role: role.to_string(),
                token: format!("token-{username}"),
            },
        );
    }

    /// Add a category directly, bypassing HTTP
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn seed_category(&self, name: &str) -> Category {
        let mut catalog = self.state.catalog.lock().unwrap();
        let category = Category {
            id: catalog.next_id(),
            name: name.to_string(),
        };
        catalog.categories.push(category.clone());
        category
    }

    /// Add a product directly, bypassing HTTP
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn seed_product(&self, name: &str, price: f64, category: &Category) -> Product {
        let mut catalog = self.state.catalog.lock().unwrap();
        let product = Product {
            id: catalog.next_id(),
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: Some(category.clone()),
        };
        catalog.products.push(product.clone());
        product
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
