#![cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Object, Reflect};
use picture_slider_wasm::{abi_version, PictureSlider};
use serde_json::json;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn slides_json() -> JsValue {
    let slides = json!([
        { "src": "a.jpg", "caption": "A" },
        { "src": "b.jpg", "caption": "B" },
        { "content": "<p>c</p>" }
    ]);
    swb::to_value(&slides).unwrap()
}

fn probe() -> JsValue {
    let obj = Object::new();
    let caption = Function::new_with_args("text, width", "return 20;");
    Reflect::set(&obj, &JsValue::from_str("captionHeight"), &caption).unwrap();
    obj.into()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    let slider = PictureSlider::new(900.0, 600.0, slides_json(), JsValue::UNDEFINED, JsValue::NULL);
    assert!(slider.is_ok());
    let slider = slider.unwrap();
    assert_eq!(slider.current_index(), Some(0));
    assert_eq!(slider.slide_count(), 3);
}

#[wasm_bindgen_test]
fn bad_options_are_rejected() {
    let opts = swb::to_value(&json!({ "duration": "sometimes" })).unwrap();
    let slider = PictureSlider::new(900.0, 600.0, slides_json(), opts, JsValue::NULL);
    assert!(slider.is_err());
}

#[wasm_bindgen_test]
fn tick_returns_writes() {
    let mut slider =
        PictureSlider::new(900.0, 600.0, slides_json(), JsValue::UNDEFINED, probe()).unwrap();
    let out = slider.tick(16.0).unwrap();
    let writes = Array::from(&get(&out, "writes"));
    assert!(writes.length() > 0);
    let kind = get(&writes.get(0), "kind");
    assert!(kind.is_string());
}

#[wasm_bindgen_test]
fn navigation_and_change_callback() {
    let mut slider =
        PictureSlider::new(900.0, 600.0, slides_json(), JsValue::UNDEFINED, probe()).unwrap();

    let seen = Array::new();
    let callback = Function::new_with_args("index, change", "this.push(index);")
        .bind(&seen);
    let id = slider.on_change(callback);

    let slide = slider.switch_to(1).unwrap();
    assert_eq!(get(&slide, "src").as_string().as_deref(), Some("b.jpg"));
    slider.right().unwrap();
    assert_eq!(slider.current_index(), Some(2));
    assert!(slider.off_change(id));
    slider.left().unwrap();

    assert_eq!(seen.length(), 2);
    assert_eq!(seen.get(0).as_f64(), Some(1.0));
    assert_eq!(seen.get(1).as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn touch_drag_round_trip() {
    let mut slider =
        PictureSlider::new(900.0, 600.0, slides_json(), JsValue::UNDEFINED, probe()).unwrap();
    let start = swb::to_value(&json!({ "type": "touch", "touches": [500.0] })).unwrap();
    let end = swb::to_value(&json!({ "type": "touch", "touches": [100.0] })).unwrap();
    assert!(slider.pointer_move(start).unwrap());
    assert!(slider.pointer_move(end).unwrap());
    let resolution = slider.pointer_up().unwrap();
    assert_eq!(resolution.as_string().as_deref(), Some("next"));
    assert_eq!(slider.current_index(), Some(1));
    assert!(slider.pointer_up().unwrap().is_undefined());
}

#[wasm_bindgen_test]
fn keys_need_hover() {
    let mut slider =
        PictureSlider::new(900.0, 600.0, slides_json(), JsValue::UNDEFINED, probe()).unwrap();
    slider.key_down("ArrowRight".into()).unwrap();
    assert_eq!(slider.current_index(), Some(0));
    slider.hover_enter();
    slider.key_down("ArrowRight".into()).unwrap();
    assert_eq!(slider.current_index(), Some(1));
}

#[wasm_bindgen_test]
fn content_is_laid_out_once_ready() {
    let obj = Object::new();
    let content_box = Function::new_with_args(
        "index",
        "return this.ready ? { width: 300, height: 100 } : null;",
    )
    .bind(&obj);
    Reflect::set(&obj, &JsValue::from_str("contentBox"), &content_box).unwrap();
    let slides = swb::to_value(&json!([{ "content": "<p>c</p>" }])).unwrap();
    let mut slider =
        PictureSlider::new(900.0, 600.0, slides, JsValue::UNDEFINED, obj.clone().into()).unwrap();
    slider.drain_outputs().unwrap();

    Reflect::set(&obj, &JsValue::from_str("ready"), &JsValue::TRUE).unwrap();
    slider.content_ready(0);
    let out = slider.drain_outputs().unwrap();
    let writes = Array::from(&get(&out, "writes"));
    assert_eq!(writes.length(), 1);
    let layout = get(&writes.get(0), "layout");
    let content = get(&layout, "content");
    assert_eq!(get(&content, "left").as_f64(), Some(300.0));
}
