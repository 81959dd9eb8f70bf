use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// `Json` extractor whose rejections use the API's `{"error": ..}` body
///
/// Keeps axum's status (400 for malformed JSON, 415 for a missing content
/// type, 422 for a body of the wrong shape).
pub struct JsonBody<T>(pub T);

#[async_trait::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                tracing::warn!(status = %rejection.status(), error = %message, "Rejected request body");
                Err((rejection.status(), Json(json!({ "error": message }))))
            }
        }
    }
}
