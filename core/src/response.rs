//! Response decoder.
//!
//! Status 200 is the only success status the Crowdin v1 API uses. Anything
//! else becomes `CrowdinError::Status` carrying the raw body; a 200 whose
//! body does not parse becomes `CrowdinError::Decode`, so callers can tell
//! "the server rejected the call" from "the success response didn't parse".

use serde::de::DeserializeOwned;

use crate::error::{CrowdinError, Result};
use crate::http::{HttpResponse, ResponseStream};

pub fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status == 200 {
        return Ok(());
    }
    Err(CrowdinError::Status {
        status: response.status,
        body: response.body_text(),
    })
}

/// Hand back a 200 stream unread. Any other status has its (small) body
/// read into a `CrowdinError::Status`.
pub fn accept_stream(stream: ResponseStream) -> Result<ResponseStream> {
    if stream.status == 200 {
        return Ok(stream);
    }
    let response = stream.into_response()?;
    Err(CrowdinError::Status {
        status: response.status,
        body: response.body_text(),
    })
}

pub fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    check_status(response)?;
    serde_json::from_slice(&response.body).map_err(|source| CrowdinError::Decode {
        source,
        body: response.body_text(),
    })
}
