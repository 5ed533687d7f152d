// SPDX-License-Identifier: GPL-3.0-only

//! Camera access through xdg-desktop-portal
//!
//! Sandboxed apps must ask the `org.freedesktop.portal.Camera` interface for
//! access. The answer arrives asynchronously as a `Response` signal on a
//! request object whose path we can predict from our unique bus name and a
//! handle token, so we subscribe before making the call.

use crate::backends::camera::types::{MediaAccessError, MediaErrorKind, MediaResult};
use crate::constants::portal;
use futures::StreamExt;
use std::collections::HashMap;
use std::os::fd::OwnedFd;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info, warn};
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

static NEXT_TOKEN: AtomicU32 = AtomicU32::new(0);

/// Outcome of asking the portal
#[derive(Debug)]
pub enum PortalAccess {
    /// Access granted; connect to PipeWire through this remote
    Granted(OwnedFd),
    /// No camera portal reachable (not sandboxed, or no portal running)
    Unavailable,
}

/// Ask the camera portal for access
///
/// Returns `Unavailable` when the session bus or the portal interface can't be
/// reached; the caller then talks to the PipeWire daemon directly.
pub async fn access_camera() -> MediaResult<PortalAccess> {
    let connection = match zbus::Connection::session().await {
        Ok(connection) => connection,
        Err(e) => {
            warn!(error = %e, "No session bus, skipping camera portal");
            return Ok(PortalAccess::Unavailable);
        }
    };

    let camera = match zbus::Proxy::new(
        &connection,
        portal::DESTINATION,
        portal::PATH,
        portal::CAMERA_INTERFACE,
    )
    .await
    {
        Ok(proxy) => proxy,
        Err(e) => {
            warn!(error = %e, "Camera portal proxy unavailable");
            return Ok(PortalAccess::Unavailable);
        }
    };

    let present = match camera.get_property::<bool>("IsCameraPresent").await {
        Ok(present) => present,
        Err(e) => {
            warn!(error = %e, "Camera portal not implemented on this desktop");
            return Ok(PortalAccess::Unavailable);
        }
    };
    if !present {
        return Err(MediaAccessError::new(
            MediaErrorKind::NotFound,
            "The camera portal reports no camera",
        ));
    }

    let token = format!(
        "selfie{}_{}",
        std::process::id(),
        NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
    );
    let sender = connection
        .unique_name()
        .map(|name| sender_path_component(name.as_str()))
        .ok_or_else(|| {
            MediaAccessError::new(MediaErrorKind::Abort, "Session bus connection has no name")
        })?;
    let request_path = format!("{}/request/{}/{}", portal::PATH, sender, token);
    debug!(path = %request_path, "Subscribing to portal request");

    let request = zbus::Proxy::new(
        &connection,
        portal::DESTINATION,
        request_path.clone(),
        portal::REQUEST_INTERFACE,
    )
    .await
    .map_err(abort)?;
    let mut responses = request.receive_signal("Response").await.map_err(abort)?;

    let mut options: HashMap<&str, Value<'_>> = HashMap::new();
    options.insert("handle_token", Value::from(token.as_str()));
    let handle: OwnedObjectPath = camera
        .call("AccessCamera", &(options,))
        .await
        .map_err(abort)?;
    if handle.as_str() != request_path {
        warn!(expected = %request_path, actual = %handle.as_str(), "Portal used an unexpected request path");
    }

    info!("Waiting for the user to answer the camera request");
    let message = responses.next().await.ok_or_else(|| {
        MediaAccessError::new(MediaErrorKind::Abort, "Portal request closed without answer")
    })?;
    let (code, _results): (u32, HashMap<String, OwnedValue>) =
        message.body().deserialize().map_err(abort)?;
    response_to_result(code)?;

    let remote_options: HashMap<&str, Value<'_>> = HashMap::new();
    let remote: zbus::zvariant::OwnedFd = camera
        .call("OpenPipeWireRemote", &(remote_options,))
        .await
        .map_err(|e| MediaAccessError::new(MediaErrorKind::NotReadable, e.to_string()))?;

    info!("Camera access granted by portal");
    Ok(PortalAccess::Granted(remote.into()))
}

/// Map a portal response code onto the access outcome
pub fn response_to_result(code: u32) -> MediaResult<()> {
    match code {
        portal::RESPONSE_SUCCESS => Ok(()),
        portal::RESPONSE_CANCELLED => Err(MediaAccessError::new(
            MediaErrorKind::NotAllowed,
            "Permission to use the camera was denied",
        )),
        other => Err(MediaAccessError::new(
            MediaErrorKind::Abort,
            format!("Camera request ended with portal response {}", other),
        )),
    }
}

/// ":1.42" becomes "1_42", as the portal spells it in request paths
fn sender_path_component(unique_name: &str) -> String {
    unique_name.trim_start_matches(':').replace('.', "_")
}

fn abort(err: zbus::Error) -> MediaAccessError {
    MediaAccessError::new(MediaErrorKind::Abort, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_success() {
        assert!(response_to_result(0).is_ok());
    }

    #[test]
    fn test_response_cancelled_is_not_allowed() {
        let err = response_to_result(1).unwrap_err();
        assert_eq!(err.kind, MediaErrorKind::NotAllowed);
        assert_eq!(err.name(), "NotAllowedError");
    }

    #[test]
    fn test_response_other_is_abort() {
        let err = response_to_result(2).unwrap_err();
        assert_eq!(err.kind, MediaErrorKind::Abort);
    }

    #[test]
    fn test_sender_path_component() {
        assert_eq!(sender_path_component(":1.42"), "1_42");
        assert_eq!(sender_path_component(":1.1234.5"), "1_1234_5");
    }
}
