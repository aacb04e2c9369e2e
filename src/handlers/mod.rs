// HTTP request handlers for the storefront pages
pub mod admin;
pub mod auth;
pub mod customer;
pub mod helpers;
pub mod home;
pub mod outcome;
pub mod pages;
pub mod static_files;
pub mod types;

use actix_web::web;

pub use admin::{create_category, create_product, dashboard};
pub use auth::{login_page, login_submit, signup_page, signup_submit};
pub use customer::catalog;
pub use home::home;
pub use outcome::guard_outcome;
pub use static_files::health;

/// Register every storefront route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Entry route, resolved by the root guard
        .route("/", web::get().to(home))
        // Session forms
        .route("/login", web::get().to(login_page))
        .route("/login", web::post().to(login_submit))
        .route("/signup", web::get().to(signup_page))
        .route("/signup", web::post().to(signup_submit))
        // Admin area
        .route("/admin", web::get().to(dashboard))
        .route("/admin/categories", web::post().to(create_category))
        .route("/admin/products", web::post().to(create_product))
        // Customer area
        .route("/customer", web::get().to(catalog))
        // Guard outcomes for client-rendered views
        .route("/auth/outcome/{guard}", web::get().to(guard_outcome))
        // Health endpoint
        .route("/ping", web::get().to(health));
}
