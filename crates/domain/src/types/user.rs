//! User identity and authentication request types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authenticated user as returned by `/auth/me`, `/auth/login` and
/// `/auth/signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl User {
    /// Interpret the body of an identity probe.
    ///
    /// A `null` body, a non-object, an object carrying an `error` field or an
    /// object that does not describe a user all mean "no identity".
    pub fn from_probe_body(body: Option<&Value>) -> Option<Self> {
        let body = body?;
        let object = body.as_object()?;
        if object.contains_key("error") {
            return None;
        }
        serde_json::from_value(body.clone()).ok()
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

/// Body of `POST /auth/signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl SignupForm {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self { email: email.into(), name: name.into(), password: password.into() }
    }
}
