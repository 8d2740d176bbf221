//! Browser tests for the exported `XlNav` engine.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use wasm_bindgen_test::*;
use xlnav::XlNav;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_keyboard_navigation() {
    let mut nav = XlNav::new(640.0, 200.0);
    nav.navigate("select-cell A10").unwrap();
    assert!(nav.key_down("ArrowDown", false).unwrap());
    assert_eq!(nav.selection_text().as_deref(), Some("A11"));
    assert_eq!(nav.home_text(), "A2");
    assert!(!nav.key_down("Tab", false).unwrap());
}

#[wasm_bindgen_test]
fn test_frozen_windows() {
    let mut nav = XlNav::new(128.0, 80.0);
    nav.set_frozen(1, 2);
    assert_eq!(nav.windows_text(), "B3:B4,B1:B2,A3:A4,A1:A2");
}

#[wasm_bindgen_test]
fn test_errors_cross_as_js_values() {
    let mut nav = XlNav::new(640.0, 200.0);
    let error = nav.navigate("jump-somewhere").unwrap_err();
    assert!(error.as_string().unwrap().contains("jump-somewhere"));
    assert!(nav.navigate("select-label Missing").is_err());
    assert_eq!(nav.selection_text(), None);
}

#[wasm_bindgen_test]
fn test_viewport_js_object() {
    let mut nav = XlNav::new(640.0, 200.0);
    nav.define_label("Inputs", "B2:C4").unwrap();
    nav.navigate("select-label Inputs").unwrap();
    let value = nav.viewport_js().unwrap();
    assert!(value.is_object());
}

#[wasm_bindgen_test]
fn test_change_callback_fires() {
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let closure = Closure::<dyn FnMut()>::new(move || counter.set(counter.get() + 1));

    let mut nav = XlNav::new(640.0, 200.0);
    nav.set_change_callback(Some(closure.as_ref().unchecked_ref::<js_sys::Function>().clone()));
    nav.navigate("right-column").unwrap();
    nav.resize(300.0, 100.0);
    assert_eq!(calls.get(), 2);
}
