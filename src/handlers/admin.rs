use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use super::helpers::require;
use super::pages::{self, Flash};
use super::types::{CategoryForm, FlashQuery, ProductForm};
use crate::guard::GuardPolicy;
use crate::models::{NewCategory, NewProduct};
use crate::state::AppState;
use crate::utils::{LoggingHelper, ResponseBuilder};

const DASHBOARD_PATH: &str = "/admin";
const CATEGORY_FAILED: &str = "Failed to create category. Please try again.";

/// GET /admin
pub async fn dashboard(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<FlashQuery>,
) -> HttpResponse {
    let credential = match require(&state, GuardPolicy::Admin, &req).await {
        Ok((_, credential)) => credential,
        Err(response) => return response,
    };

    let categories = state.api.categories().await.unwrap_or_else(|err| {
        LoggingHelper::log_catalog_unavailable("categories", &err.to_string());
        Vec::new()
    });
    let product_count = match state.api.products(Some(&credential)).await {
        Ok(products) => products.len(),
        Err(err) => {
            LoggingHelper::log_catalog_unavailable("products", &err.to_string());
            0
        }
    };

    let flash = Flash {
        notice: query.notice.as_deref(),
        error: query.error.as_deref(),
    };
    ResponseBuilder::page(
        StatusCode::OK,
        pages::admin_dashboard(categories.len(), product_count, &categories, flash),
    )
}

/// POST /admin/categories
pub async fn create_category(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<CategoryForm>,
) -> HttpResponse {
    let credential = match require(&state, GuardPolicy::Admin, &req).await {
        Ok((_, credential)) => credential,
        Err(response) => return response,
    };

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return back_with_error(CATEGORY_FAILED);
    }

    match state
        .api
        .create_category(Some(&credential), &NewCategory { name: name.clone() })
        .await
    {
        Ok(category) => {
            LoggingHelper::log_catalog_created("category", &category.name);
            ResponseBuilder::redirect(DASHBOARD_PATH)
                .with_notice(&format!("Category {name} created successfully"))
                .build()
        }
        Err(err) => {
            LoggingHelper::log_catalog_failure("category", &err.to_string());
            back_with_error(CATEGORY_FAILED)
        }
    }
}

/// POST /admin/products
pub async fn create_product(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<ProductForm>,
) -> HttpResponse {
    let credential = match require(&state, GuardPolicy::Admin, &req).await {
        Ok((_, credential)) => credential,
        Err(response) => return response,
    };

    let product = match parse_product(form.into_inner()) {
        Ok(product) => product,
        Err(reason) => return back_with_error(&format!("Failed to create product: {reason}")),
    };

    match state.api.create_product(&credential, &product).await {
        Ok(created) => {
            LoggingHelper::log_catalog_created("product", &created.name);
            ResponseBuilder::redirect(DASHBOARD_PATH)
                .with_notice("Product created successfully!")
                .build()
        }
        Err(err) => {
            LoggingHelper::log_catalog_failure("product", &err.to_string());
            back_with_error(&format!("Failed to create product: {}", err.user_message()))
        }
    }
}

fn back_with_error(message: &str) -> HttpResponse {
    ResponseBuilder::redirect(DASHBOARD_PATH)
        .with_error(message)
        .build()
}

/// Validate the product form's text fields into a creation request
fn parse_product(form: ProductForm) -> Result<NewProduct, String> {
    let price = form
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| "price must be a number".to_string())?;
    let category_id = form
        .category_id
        .trim()
        .parse::<i64>()
        .map_err(|_| "select a category".to_string())?;

    Ok(NewProduct {
        name: form.name.trim().to_string(),
        description: form.description.trim().to_string(),
        price,
        category_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str, category_id: &str) -> ProductForm {
        ProductForm {
            name: " Mug ".to_string(),
            description: "Blue".to_string(),
            price: price.to_string(),
            category_id: category_id.to_string(),
        }
    }

    #[test]
    fn test_parse_product() {
        let product = parse_product(form("4.50", "2")).unwrap();
        assert_eq!(product.name, "Mug");
        assert!((product.price - 4.5).abs() < f64::EPSILON);
        assert_eq!(product.category_id, 2);
    }

    #[test]
    fn test_parse_product_rejects_bad_numbers() {
        assert_eq!(
            parse_product(form("cheap", "2")).unwrap_err(),
            "price must be a number"
        );
        assert_eq!(
            parse_product(form("NaN", "2")).unwrap_err(),
            "price must be a number"
        );
        assert_eq!(parse_product(form("3", "")).unwrap_err(), "select a category");
    }
}
