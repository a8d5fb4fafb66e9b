use actix_web::{
    cookie::{Cookie, SameSite},
    HttpRequest,
};

use crate::utils::AppError;

/// Cookie and form field share this name.
pub const TOKEN_NAME: &str = "__RequestVerificationToken";

/// Double-submit token: the same random value goes into a cookie and into a
/// hidden form field, and a POST is accepted only when both agree.
pub struct AntiForgeryToken {
    pub value: String,
}

impl AntiForgeryToken {
    pub fn generate() -> Self {
        AntiForgeryToken {
            value: uuid::Uuid::new_v4().simple().to_string(),
        }
    }

    /// Reuses the token already held in the request cookie, if any, so a
    /// re-rendered form stays valid for the same browser.
    pub fn for_request(req: &HttpRequest) -> Self {
        match req.cookie(TOKEN_NAME) {
            Some(cookie) if !cookie.value().is_empty() => AntiForgeryToken {
                value: cookie.value().to_string(),
            },
            _ => Self::generate(),
        }
    }

    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::build(TOKEN_NAME, self.value.clone())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .finish()
    }
}

/// Checks the submitted form token against the cookie.
pub fn verify(req: &HttpRequest, submitted: Option<&str>) -> Result<(), AppError> {
    let cookie = req
        .cookie(TOKEN_NAME)
        .ok_or_else(|| AppError::InvalidRequest("missing anti-forgery cookie".into()))?;

    let submitted = submitted
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("missing anti-forgery token".into()))?;

    if constant_time_eq(cookie.value().as_bytes(), submitted.as_bytes()) {
        Ok(())
    } else {
        log::warn!("⚠️  Anti-forgery token mismatch on {}", req.path());
        Err(AppError::InvalidRequest("anti-forgery token mismatch".into()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_verify_accepts_matching_token() {
        let token = AntiForgeryToken::generate();
        let req = TestRequest::default().cookie(token.cookie()).to_http_request();
        assert!(verify(&req, Some(&token.value)).is_ok());
    }

    #[test]
    fn test_verify_rejects_mismatch_and_missing() {
        let token = AntiForgeryToken::generate();
        let req = TestRequest::default().cookie(token.cookie()).to_http_request();
        assert!(matches!(verify(&req, Some("other")), Err(AppError::InvalidRequest(_))));
        assert!(matches!(verify(&req, None), Err(AppError::InvalidRequest(_))));

        let bare = TestRequest::default().to_http_request();
        assert!(matches!(verify(&bare, Some(&token.value)), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_for_request_reuses_cookie() {
        let token = AntiForgeryToken::generate();
        let req = TestRequest::default().cookie(token.cookie()).to_http_request();
        assert_eq!(AntiForgeryToken::for_request(&req).value, token.value);
    }

    #[test]
    fn test_generated_tokens_differ() {
        assert_ne!(AntiForgeryToken::generate().value, AntiForgeryToken::generate().value);
    }
}
