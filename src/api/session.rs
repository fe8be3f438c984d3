use std::convert::Infallible;
use std::ops::{Deref, DerefMut};

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::db::{Database, Session};

/// Per-request database session, injected from the shared [`Database`].
///
/// The session closes when the handler returns; anything it did not commit
/// is rolled back.
pub struct DbSession(pub Session);

impl<S> FromRequestParts<S> for DbSession
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Database::from_ref(state).session()))
    }
}

impl Deref for DbSession {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
