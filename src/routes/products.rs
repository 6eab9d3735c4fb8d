//! Product catalog endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::{AppError, AppResult};
use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub image: String,
    pub price: f64,
}

async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products =
        sqlx::query_as::<_, Product>("SELECT id, name, image, price FROM products ORDER BY id")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(products))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product =
        sqlx::query_as::<_, Product>("SELECT id, name, image, price FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    Ok(Json(product))
}

async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, image, price) VALUES ($1, $2, $3) \
         RETURNING id, name, image, price",
    )
    .bind(&input.name)
    .bind(&input.image)
    .bind(input.price)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(product))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET name = $1, image = $2, price = $3 WHERE id = $4 \
         RETURNING id, name, image, price",
    )
    .bind(&input.name)
    .bind(&input.image)
    .bind(input.price)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Product {id} not found")));
    }

    Ok(Json(serde_json::json!({ "deleted": id })))
}
