use blob_core::TiltPermission;
use glam::Vec2;
use web_sys as web;

#[inline]
pub fn pointer_client_px(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Window inner size in CSS pixels. Zero when unavailable, which the engine
/// treats as "drop the sample".
pub fn viewport_px() -> Vec2 {
    let Some(w) = web::window() else {
        return Vec2::ZERO;
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(width as f32, height as f32)
}

#[inline]
pub fn orientation_degrees(beta: Option<f64>, gamma: Option<f64>) -> (Option<f32>, Option<f32>) {
    (beta.map(|b| b as f32), gamma.map(|g| g as f32))
}

/// Map the string a `requestPermission()` promise resolves with.
#[inline]
pub fn permission_from_response(response: Option<&str>) -> TiltPermission {
    match response {
        Some("granted") => TiltPermission::Granted,
        _ => TiltPermission::Denied,
    }
}

/// A rejected or throwing request (e.g. not inside a user activation) is
/// not an answer from the user, so the permission stays `Unknown`.
#[inline]
pub fn permission_from_outcome<E>(outcome: Result<Option<&str>, E>) -> TiltPermission {
    match outcome {
        Ok(response) => permission_from_response(response),
        Err(_) => TiltPermission::Unknown,
    }
}

/// Whether a gesture should open the orientation prompt.
#[inline]
pub fn should_request_tilt(permission: TiltPermission, pending: bool) -> bool {
    permission == TiltPermission::Unknown && !pending
}

/// Touch pointers vanish on lift; mouse and pen keep hovering.
#[inline]
pub fn lift_clears_pointer(pointer_type: &str) -> bool {
    pointer_type == "touch"
}

