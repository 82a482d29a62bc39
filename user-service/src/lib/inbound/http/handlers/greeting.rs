use axum::extract::Path;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn health() -> &'static str {
    "Server is up and running with Auth!"
}

pub async fn say_name(Path(name): Path<String>) -> ApiSuccess<GreetingResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        GreetingResponseData {
            message: format!("Hello {}, How are you doing ?", name),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingResponseData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_say_name() {
        let response = say_name(Path("Ada".to_string())).await;

        assert_eq!(
            response,
            ApiSuccess::new(
                StatusCode::OK,
                GreetingResponseData {
                    message: "Hello Ada, How are you doing ?".to_string()
                }
            )
        );
    }
}
