//! Server-rendered HTML pages
//!
//! Every dynamic value passes through [`escape_html`] before it reaches markup.

use std::fmt::Write as _;

use crate::models::{Category, Product};
use crate::utils::escape_html;

const BRAND: &str = "E-Com Storefront";

const STYLES: &str = r"
body { margin: 0; font-family: system-ui, -apple-system, sans-serif; background: #f5f6fa; color: #222; }
.navbar { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; background: #1f2937; color: #fff; }
.nav-brand { font-weight: 700; font-size: 1.2rem; }
.nav-links a { color: #e5e7eb; margin-left: 1.5rem; text-decoration: none; }
.container { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.page-title { text-align: center; }
form.stacked { max-width: 400px; margin: 0 auto; display: flex; flex-direction: column; gap: .75rem; }
input, textarea, select { padding: .6rem; border: 1px solid #ccc; border-radius: 4px; font: inherit; }
button { padding: .6rem 1.2rem; border: 0; border-radius: 4px; background: #2563eb; color: #fff; cursor: pointer; }
.notice { color: green; text-align: center; }
.error { color: red; text-align: center; }
.dashboard-cards { display: flex; gap: 1rem; justify-content: center; margin-bottom: 2rem; }
.dashboard-card { background: #fff; padding: 1rem 2rem; border-radius: 8px; text-align: center; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.admin-forms { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.category-tabs { display: flex; flex-wrap: wrap; gap: .5rem; justify-content: center; }
.category-tabs a { padding: .4rem .9rem; border-radius: 999px; background: #e5e7eb; color: #111; text-decoration: none; }
.category-tabs a.active { background: #2563eb; color: #fff; }
.product-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1rem; }
.product-card { background: #fff; padding: 1rem; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.product-price { font-weight: 700; }
.product-category { font-size: .8rem; color: #555; }
";

/// Messages carried across a redirect
#[derive(Debug, Default, Clone, Copy)]
pub struct Flash<'a> {
    pub notice: Option<&'a str>,
    pub error: Option<&'a str>,
}

impl Flash<'_> {
    fn render(&self) -> String {
        let mut html = String::new();
        if let Some(notice) = self.notice {
            let _ = write!(html, r#"<p class="notice">{}</p>"#, escape_html(notice));
        }
        if let Some(error) = self.error {
            let _ = write!(html, r#"<p class="error">{}</p>"#, escape_html(error));
        }
        html
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {BRAND}</title>
    <style>{STYLES}</style>
</head>
<body>
<nav class="navbar">
    <div class="nav-brand">{BRAND}</div>
    <div class="nav-links">
        <a href="/">Customer View</a>
        <a href="/admin">Admin View</a>
    </div>
</nav>
<main class="container">
{body}
</main>
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// Placeholder shown while a guard has not settled; reloads itself
#[must_use]
pub fn loading_page() -> String {
    layout(
        "Loading",
        r#"<meta http-equiv="refresh" content="1"><div>Loading...</div>"#,
    )
}

/// Access-denied page; the message is the same whatever caused the denial
#[must_use]
pub fn denial_page(message: &str) -> String {
    layout(
        "Access denied",
        &format!(
            r#"<div class="container"><h2>{}</h2></div>"#,
            escape_html(message)
        ),
    )
}

#[must_use]
pub fn login_page(flash: Flash<'_>) -> String {
    let body = format!(
        r#"<h1 class="page-title">Login</h1>
{flash}
<form class="stacked" method="post" action="/login">
    <input type="text" name="username" placeholder="Username" required>
    <input type="password" name="password" placeholder="Password" required>
    <button type="submit">Login</button>
    <p>Don't have an account? <a href="/signup">Signup</a></p>
</form>"#,
        flash = flash.render(),
    );
    layout("Login", &body)
}

#[must_use]
pub fn signup_page(flash: Flash<'_>) -> String {
    let body = format!(
        r#"<h1 class="page-title">Signup</h1>
{flash}
<form class="stacked" method="post" action="/signup">
    <input type="text" name="username" placeholder="Username" required>
    <input type="password" name="password" placeholder="Password" required>
    <button type="submit">Signup</button>
    <p>Already have an account? <a href="/login">Login</a></p>
</form>"#,
        flash = flash.render(),
    );
    layout("Signup", &body)
}

/// Admin dashboard: catalog counts plus the two creation forms
#[must_use]
pub fn admin_dashboard(
    category_count: usize,
    product_count: usize,
    categories: &[Category],
    flash: Flash<'_>,
) -> String {
    let mut options = String::from(r#"<option value="" disabled selected>Select a Category</option>"#);
    for category in categories {
        let _ = write!(
            options,
            r#"<option value="{}">{}</option>"#,
            category.id,
            escape_html(&category.name)
        );
    }

    let body = format!(
        r#"<h1 class="page-title">Admin Dashboard</h1>
{flash}
<div class="dashboard-cards">
    <div class="dashboard-card"><h2>Total Categories</h2><p>{category_count}</p></div>
    <div class="dashboard-card"><h2>Total Products</h2><p>{product_count}</p></div>
</div>
<div class="admin-forms">
    <form class="stacked" method="post" action="/admin/categories">
        <h2>Add Category</h2>
        <input type="text" name="name" placeholder="Category Name" required>
        <button type="submit">Submit</button>
    </form>
    <form class="stacked" method="post" action="/admin/products">
        <h2>Add New Product</h2>
        <select name="category_id" required>{options}</select>
        <input type="text" name="name" placeholder="Product Name" required>
        <textarea name="description" placeholder="Description" required></textarea>
        <input type="number" step="0.01" name="price" placeholder="Price" required>
        <button type="submit">Create Product</button>
    </form>
</div>"#,
        flash = flash.render(),
    );
    layout("Admin Dashboard", &body)
}

/// Customer catalog: category tabs above a product grid
///
/// `selected` is the category whose products are shown, if any; its name
/// labels products that come without their own category.
#[must_use]
pub fn customer_page(
    categories: &[Category],
    selected: Option<&Category>,
    title: &str,
    products: &[Product],
) -> String {
    let mut tabs = format!(
        r#"<a href="/customer"{}>All Products</a>"#,
        if selected.is_none() { r#" class="active""# } else { "" }
    );
    for category in categories {
        let active = selected.is_some_and(|s| s.id == category.id);
        let _ = write!(
            tabs,
            r#"<a href="/customer?category={}"{}>{}</a>"#,
            category.id,
            if active { r#" class="active""# } else { "" },
            escape_html(&category.name)
        );
    }

    let body = format!(
        r#"<div class="category-tabs">{tabs}</div>
<h1 class="page-title">{title}</h1>
{grid}"#,
        title = escape_html(title),
        grid = product_grid(products, selected),
    );
    layout(title, &body)
}

fn product_grid(products: &[Product], selected: Option<&Category>) -> String {
    if products.is_empty() {
        return "<p>No products found.</p>".to_string();
    }

    let mut grid = String::from(r#"<div class="product-grid">"#);
    for product in products {
        let category_name = product
            .category
            .as_ref()
            .or(selected)
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        let _ = write!(
            grid,
            r#"<div class="product-card"><div class="product-info">
<h3>{name}</h3>
<p class="product-desc">{description}</p>
<p class="product-price">${price:.2}</p>
<span class="product-category">{category}</span>
</div></div>"#,
            name = escape_html(&product.name),
            description = escape_html(&product.description),
            price = product.price,
            category = escape_html(category_name),
        );
    }
    grid.push_str("</div>");
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mug(category: Option<Category>) -> Product {
        Product {
            id: 1,
            name: "Mug <large>".to_string(),
            description: "Blue".to_string(),
            price: 4.5,
            category,
        }
    }

    #[test]
    fn test_product_grid_formats_price_and_escapes() {
        let kitchen = Category {
            id: 2,
            name: "Kitchen".to_string(),
        };
        let html = product_grid(&[mug(Some(kitchen))], None);
        assert!(html.contains("$4.50"));
        assert!(html.contains("Mug &lt;large&gt;"));
        assert!(html.contains("Kitchen"));
    }

    #[test]
    fn test_nested_products_use_selected_category_name() {
        let garden = Category {
            id: 3,
            name: "Garden".to_string(),
        };
        let html = product_grid(&[mug(None)], Some(&garden));
        assert!(html.contains(r#"<span class="product-category">Garden</span>"#));
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(product_grid(&[], None), "<p>No products found.</p>");
    }

    #[test]
    fn test_flash_messages_are_escaped() {
        let html = login_page(Flash {
            notice: None,
            error: Some("<b>bad</b>"),
        });
        assert!(html.contains(r#"<p class="error">&lt;b&gt;bad&lt;/b&gt;</p>"#));
    }

    #[test]
    fn test_denial_page() {
        let html = denial_page("This page is for admin only.");
        assert!(html.contains("<h2>This page is for admin only.</h2>"));
    }
}
