use axum::Json;

use crate::category::Category;

pub async fn list() -> Json<&'static [Category]> {
    Json(Category::all())
}
