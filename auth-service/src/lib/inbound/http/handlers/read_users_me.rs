use auth::AuthenticatedUser;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::UserData;

pub async fn read_users_me(
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&current_user).into())
}
