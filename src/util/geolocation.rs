//! Best-effort device location for OTP registration.
//!
//! Registration sends coordinates when the browser grants them; denial,
//! unavailability, or errors fall back to `(0, 0)` without failing the flow.

use async_trait::async_trait;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait(?Send)]
pub trait LocationProvider: Send + Sync {
    /// Current position, or `None` when it cannot be determined.
    async fn current_position(&self) -> Option<Coordinates>;
}

/// Location from `navigator.geolocation`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

#[async_trait(?Send)]
impl LocationProvider for BrowserLocation {
    async fn current_position(&self) -> Option<Coordinates> {
        #[cfg(feature = "csr")]
        {
            browser_position().await
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }
}

#[cfg(feature = "csr")]
async fn browser_position() -> Option<Coordinates> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    let geolocation = web_sys::window()?.navigator().geolocation().ok()?;
    let (tx, rx) = oneshot::channel::<Option<Coordinates>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let tx_ok = tx.clone();
    let on_success = Closure::<dyn FnMut(JsValue)>::new(move |position: JsValue| {
        if let Some(tx) = tx_ok.borrow_mut().take() {
            let _ = tx.send(coordinates_from_js(&position));
        }
    });
    let tx_err = tx;
    let on_error = Closure::<dyn FnMut(JsValue)>::new(move |_err: JsValue| {
        if let Some(tx) = tx_err.borrow_mut().take() {
            let _ = tx.send(None);
        }
    });

    geolocation
        .get_current_position_with_error_callback(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
        )
        .ok()?;

    // Both closures must outlive the browser callback.
    let position = rx.await.ok().flatten();
    drop((on_success, on_error));
    position
}

#[cfg(feature = "csr")]
fn coordinates_from_js(position: &wasm_bindgen::JsValue) -> Option<Coordinates> {
    let coords = js_sys::Reflect::get(position, &"coords".into()).ok()?;
    let latitude = js_sys::Reflect::get(&coords, &"latitude".into()).ok()?.as_f64()?;
    let longitude = js_sys::Reflect::get(&coords, &"longitude".into()).ok()?.as_f64()?;
    Some(Coordinates { latitude, longitude })
}
