//! Placeholder endpoints. Neither touches the database.

use axum::{Json, extract::Path};

use super::{ItemResponse, RootResponse};

const ITEM_NAME: &str = "测试商品";

/// `GET /`
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "hello world",
        status: "ok",
    })
}

/// `GET /items/{item_id}`
///
/// A non-integer `item_id` is rejected by the `Path` extractor with 400.
pub async fn read_item(Path(item_id): Path<i64>) -> Json<ItemResponse> {
    Json(ItemResponse {
        item_id,
        name: ITEM_NAME,
    })
}
