//! Window scroll listener for infinite lists.

use dioxus::prelude::*;
use store::ScrollMetrics;

/// Calls `handler` with the window's scroll metrics at most once per
/// `throttle_ms`. A scroll that lands inside the interval is evaluated once
/// the interval ends, so the final position is never skipped. The listener
/// and any pending evaluation are dropped when the component unmounts.
pub fn use_window_scroll(throttle_ms: f64, handler: impl FnMut(ScrollMetrics) + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;
        use store::{ScrollDecision, ScrollThrottle};
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let listener = use_hook(move || {
            let state = Rc::new(RefCell::new(WindowScroll {
                throttle: ScrollThrottle::new(throttle_ms),
                handler: Box::new(handler),
                trailing: None,
            }));
            let shared = state.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let decision = shared.borrow_mut().throttle.on_event(js_sys::Date::now());
                match decision {
                    ScrollDecision::Evaluate => evaluate(&shared),
                    ScrollDecision::Defer(delay_ms) => {
                        let pending = shared.clone();
                        let timeout = gloo_timers::callback::Timeout::new(delay_ms.ceil() as u32, move || {
                            let due = pending.borrow_mut().throttle.trailing_due(js_sys::Date::now());
                            if due {
                                evaluate(&pending);
                            }
                        });
                        // Replacing an already-fired timeout is harmless.
                        shared.borrow_mut().trailing = Some(timeout);
                    }
                    ScrollDecision::Ignore => {}
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
            }
            Rc::new((closure, state))
        });

        use_drop(move || {
            let (closure, state) = &*listener;
            if let Some(window) = web_sys::window() {
                let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
                let _ = window.remove_event_listener_with_callback("scroll", callback);
            }
            // Cancels a pending evaluation and breaks the timeout's reference cycle.
            state.borrow_mut().trailing = None;
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (throttle_ms, handler);
    }
}

#[cfg(target_arch = "wasm32")]
struct WindowScroll {
    throttle: store::ScrollThrottle,
    handler: Box<dyn FnMut(ScrollMetrics)>,
    trailing: Option<gloo_timers::callback::Timeout>,
}

#[cfg(target_arch = "wasm32")]
fn evaluate(state: &std::cell::RefCell<WindowScroll>) {
    if let Some(metrics) = read_metrics() {
        (state.borrow_mut().handler)(metrics);
    }
}

#[cfg(target_arch = "wasm32")]
fn read_metrics() -> Option<ScrollMetrics> {
    let window = web_sys::window()?;
    let scroll_y = window.scroll_y().ok()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    let document_height = window.document()?.document_element()?.scroll_height() as f64;
    Some(ScrollMetrics {
        scroll_y,
        viewport_height,
        document_height,
    })
}
