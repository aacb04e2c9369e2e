use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use super::helpers::require;
use super::pages;
use super::types::CatalogQuery;
use crate::guard::GuardPolicy;
use crate::models::{Category, Product};
use crate::state::AppState;
use crate::utils::{LoggingHelper, ResponseBuilder};

const ALL_PRODUCTS_TITLE: &str = "Our Star Products";

/// GET /customer[?category=id]
pub async fn catalog(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> HttpResponse {
    let credential = match require(&state, GuardPolicy::Customer, &req).await {
        Ok((_, credential)) => credential,
        Err(response) => return response,
    };

    let categories = state.api.categories().await.unwrap_or_else(|err| {
        LoggingHelper::log_catalog_unavailable("categories", &err.to_string());
        Vec::new()
    });

    let category_id = query
        .category
        .as_deref()
        .and_then(|id| id.trim().parse::<i64>().ok());

    let (selected, title, products): (Option<Category>, String, Vec<Product>) = match category_id {
        Some(id) => match state.api.category(id).await {
            Ok(detail) => {
                let selected = Category {
                    id: detail.id,
                    name: detail.name,
                };
                let title = format!("Products in {}", selected.name);
                (Some(selected), title, detail.products)
            }
            Err(err) => {
                LoggingHelper::log_catalog_unavailable("category products", &err.to_string());
                (None, ALL_PRODUCTS_TITLE.to_string(), Vec::new())
            }
        },
        None => {
            let products = state
                .api
                .products(Some(&credential))
                .await
                .unwrap_or_else(|err| {
                    LoggingHelper::log_catalog_unavailable("products", &err.to_string());
                    Vec::new()
                });
            (None, ALL_PRODUCTS_TITLE.to_string(), products)
        }
    };

    ResponseBuilder::page(
        StatusCode::OK,
        pages::customer_page(&categories, selected.as_ref(), &title, &products),
    )
}
