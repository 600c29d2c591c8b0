//! Shared response envelope for the administration API.
//!
//! Admin responses use a `{ "data": ... }` envelope. The public lookup and
//! feedback endpoints return bare representations (see
//! [`crate::representation`]).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
