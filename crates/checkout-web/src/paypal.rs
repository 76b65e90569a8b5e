//! PayPal JS SDK bindings
//!
//! The SDK is loaded by script tag and exposes a global `paypal` object.
//! Button callbacks are bridged to a [`CheckoutFlow`]; every terminal
//! outcome becomes a full page navigation.

use std::rc::Rc;

use checkout_core::{CheckoutFlow, Destination, OrderApi};
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise, spawn_local};

const SDK_URL: &str = "https://www.paypal.com/sdk/js";

#[wasm_bindgen]
extern "C" {
    type Buttons;

    #[wasm_bindgen(catch, js_namespace = paypal, js_name = Buttons)]
    fn paypal_buttons(options: &JsValue) -> Result<Buttons, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn render(this: &Buttons, container: &str) -> Result<Promise, JsValue>;
}

/// Inject the SDK script tag; `on_load` runs once it has executed,
/// `on_error` if the script could not be fetched
pub fn load_sdk(
    client_id: &str,
    currency: &str,
    on_load: impl FnOnce() + 'static,
    on_error: impl FnOnce() + 'static,
) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;

    let script: web_sys::HtmlScriptElement = document.create_element("script")?.dyn_into()?;
    script.set_src(&format!(
        "{SDK_URL}?client-id={}&currency={}&intent=capture",
        urlencoding::encode(client_id),
        urlencoding::encode(currency),
    ));
    script.set_onload(Some(Closure::once_into_js(on_load).unchecked_ref()));
    script.set_onerror(Some(Closure::once_into_js(on_error).unchecked_ref()));

    head.append_child(&script)?;
    Ok(())
}

/// Render the button stack into `container` with callbacks driving `flow`.
///
/// A rejected render ends the flow like a widget error.
pub fn render_buttons<A: OrderApi + 'static>(
    flow: Rc<CheckoutFlow<A>>,
    container: &str,
) -> Result<(), JsValue> {
    let style = Object::new();
    Reflect::set(&style, &"layout".into(), &"vertical".into())?;
    Reflect::set(&style, &"shape".into(), &"rect".into())?;

    let create_flow = Rc::clone(&flow);
    let create_order = Closure::<dyn FnMut() -> Promise>::new(move || {
        let flow = Rc::clone(&create_flow);
        future_to_promise(async move {
            match flow.create().await {
                Ok(order_id) => Ok(JsValue::from_str(&order_id)),
                // The SDK reports the rejection through onError
                Err(e) => Err(js_sys::Error::new(&e.user_message()).into()),
            }
        })
    });

    let approve_flow = Rc::clone(&flow);
    let on_approve = Closure::<dyn FnMut(JsValue) -> Promise>::new(move |data: JsValue| {
        let flow = Rc::clone(&approve_flow);
        future_to_promise(async move {
            let order_id = Reflect::get(&data, &"orderID".into())
                .ok()
                .and_then(|v| v.as_string());
            navigate(flow.approve(order_id.as_deref()).await);
            Ok(JsValue::UNDEFINED)
        })
    });

    let error_flow = Rc::clone(&flow);
    let on_error = Closure::<dyn FnMut(JsValue)>::new(move |err: JsValue| {
        let reason = error_reason(&err);
        leptos::logging::error!("PayPal button error: {}", reason);
        navigate(error_flow.fail(reason));
    });

    let options = Object::new();
    Reflect::set(&options, &"style".into(), &style)?;
    Reflect::set(&options, &"createOrder".into(), &create_order.into_js_value())?;
    Reflect::set(&options, &"onApprove".into(), &on_approve.into_js_value())?;
    Reflect::set(&options, &"onError".into(), &on_error.into_js_value())?;

    let rendered = paypal_buttons(&options)?.render(container)?;
    spawn_local(async move {
        if let Err(err) = JsFuture::from(rendered).await {
            let reason = error_reason(&err);
            leptos::logging::error!("PayPal buttons failed to render: {}", reason);
            navigate(flow.fail(reason));
        }
    });
    Ok(())
}

fn error_reason(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "PayPal reported an error".into())
}

fn navigate(destination: Destination) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(destination.path());
    }
}
