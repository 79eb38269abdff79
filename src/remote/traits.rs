//! Remote collection trait.

use super::RemoteError;
use crate::models::ServerId;
use serde_json::Value;

/// Result of a remote call.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// A REST collection of JSON objects.
///
/// Bodies are exchanged in server shape: the store normalizes what comes
/// back and denormalizes what goes out.
pub trait RemoteCollection {
    /// Returns the collection URL, for logs.
    fn endpoint(&self) -> &str;

    /// `GET <collection>`. The response must be a JSON array.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure, non-2xx status, or a
    /// body that is not a JSON array.
    fn list(&self) -> RemoteResult<Vec<Value>>;

    /// `POST <collection>`. Returns the created object when the server echoes
    /// one.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure or non-2xx status.
    fn create(&self, body: &Value) -> RemoteResult<Option<Value>>;

    /// `PUT <collection>/<id>`. Returns the updated object when the server
    /// echoes one.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure or non-2xx status.
    fn update(&self, id: &ServerId, body: &Value) -> RemoteResult<Option<Value>>;

    /// `DELETE <collection>/<id>`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure or non-2xx status.
    fn delete(&self, id: &ServerId) -> RemoteResult<()>;
}

impl<T: RemoteCollection + ?Sized> RemoteCollection for Box<T> {
    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }

    fn list(&self) -> RemoteResult<Vec<Value>> {
        (**self).list()
    }

    fn create(&self, body: &Value) -> RemoteResult<Option<Value>> {
        (**self).create(body)
    }

    fn update(&self, id: &ServerId, body: &Value) -> RemoteResult<Option<Value>> {
        (**self).update(id, body)
    }

    fn delete(&self, id: &ServerId) -> RemoteResult<()> {
        (**self).delete(id)
    }
}
