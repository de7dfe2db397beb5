use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::error::AppError;

/// The authenticated identity on whose behalf an operation executes.
///
/// `AuthMiddleware` validates the bearer token and inserts the decoded
/// `Claims` into request extensions; this extractor surfaces them to
/// handlers. If the claims are missing (middleware not applied, or an
/// internal wiring error), the request is rejected with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(Claims);

impl CurrentUser {
    /// Stable id of the calling user; every todo query is scoped by it.
    pub fn user_id(&self) -> Uuid {
        self.0.sub
    }
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(CurrentUser(claims))),
            None => {
                let err =
                    AppError::AuthenticationFailed("Could not validate user".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_current_user_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        let user_id = Uuid::new_v4();
        req.extensions_mut().insert(Claims {
            sub: user_id,
            exp: 4102444800, // far future
        });

        let mut payload = Payload::None;
        let current_user = CurrentUser::from_request(&req, &mut payload).await;
        assert!(current_user.is_ok());
        assert_eq!(current_user.unwrap().user_id(), user_id);
    }

    #[actix_rt::test]
    async fn test_current_user_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();
        // No claims inserted into extensions.

        let mut payload = Payload::None;
        let result = CurrentUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let err = result.unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
