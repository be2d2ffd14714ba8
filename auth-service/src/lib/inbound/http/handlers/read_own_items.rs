use auth::AuthenticatedUser;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use super::UserData;

pub async fn read_own_items(
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiSuccess<Vec<ItemData>> {
    let items = vec![ItemData {
        item_id: 1,
        owner: (&current_user).into(),
    }];

    ApiSuccess::new(StatusCode::OK, items)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemData {
    pub item_id: u64,
    pub owner: UserData,
}
