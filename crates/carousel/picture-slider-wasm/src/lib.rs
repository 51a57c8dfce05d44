use js_sys::{Function, Reflect, JSON};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use picture_slider_core::{
    parse_slides_json, BoxMetrics, Carousel, CarouselOptions, Key, ObserverId, PointerInput,
    Size, Slide, SurfaceProbe,
};

#[wasm_bindgen]
pub struct PictureSlider {
    core: Carousel,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn stringify(value: &JsValue, context: &str) -> Result<String, JsError> {
    JSON::stringify(value)
        .map_err(|e| JsError::new(&format!("{context} stringify error: {:?}", e)))?
        .as_string()
        .ok_or_else(|| JsError::new(&format!("{context}: stringify produced non-string")))
}

/// Optional method `name` on a JS object, if it is callable.
fn method(obj: &JsValue, name: &str) -> Option<Function> {
    if jsvalue_is_undefined_or_null(obj) {
        return None;
    }
    Reflect::get(obj, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
}

/// Measurement hooks backed by JS callbacks:
///   captionHeight(text: string, width: number) -> number
///   contentBox(index: number) -> { width, height, padding, margin } | null
struct JsProbe {
    caption_height: Option<Function>,
    content_box: Option<Function>,
}

impl JsProbe {
    fn from_js(obj: &JsValue) -> Self {
        Self {
            caption_height: method(obj, "captionHeight"),
            content_box: method(obj, "contentBox"),
        }
    }
}

impl SurfaceProbe for JsProbe {
    fn caption_height(&mut self, text: &str, viewport_width: u32) -> f32 {
        let Some(f) = &self.caption_height else {
            return 0.0;
        };
        match f.call2(
            &JsValue::UNDEFINED,
            &JsValue::from_str(text),
            &JsValue::from(viewport_width),
        ) {
            Ok(val) => val.as_f64().map(|h| h as f32).unwrap_or(0.0),
            Err(_) => 0.0,
        }
    }

    fn content_box(&mut self, index: usize) -> Option<BoxMetrics> {
        let f = self.content_box.as_ref()?;
        let val = f.call1(&JsValue::UNDEFINED, &JsValue::from(index as u32)).ok()?;
        if jsvalue_is_undefined_or_null(&val) {
            return None;
        }
        swb::from_value(val).ok()
    }
}

/// Argument passed to `on_change` callbacks.
#[derive(Serialize)]
struct ChangeEvent<'a> {
    index: usize,
    slide: &'a Slide,
}

#[wasm_bindgen]
impl PictureSlider {
    /// Build a carousel in a container of `width` x `height` pixels.
    ///
    /// `slides` is an array of `{ src?, content?, link?, center?, caption? }`.
    /// `options` is a partial options object or undefined/null for defaults.
    /// `probe` is an object with optional `captionHeight` and `contentBox`
    /// callbacks. Example:
    ///   new PictureSlider(900, 600, [{ src: "a.jpg", caption: "A" }], { arrows: "large" }, probe)
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        slides: JsValue,
        options: JsValue,
        probe: JsValue,
    ) -> Result<PictureSlider, JsError> {
        console_error_panic_hook::set_once();

        let slides = if jsvalue_is_undefined_or_null(&slides) {
            Vec::new()
        } else {
            let s = stringify(&slides, "slides")?;
            parse_slides_json(&s).map_err(|e| JsError::new(&format!("slides error: {e}")))?
        };
        let options = if jsvalue_is_undefined_or_null(&options) {
            CarouselOptions::default()
        } else {
            let s = stringify(&options, "options")?;
            CarouselOptions::from_json(&s)
                .map_err(|e| JsError::new(&format!("options error: {e}")))?
        };

        Ok(PictureSlider {
            core: Carousel::new(
                Size::new(width, height),
                slides,
                options,
                Box::new(JsProbe::from_js(&probe)),
            ),
        })
    }

    /// Container width changed; height follows the initial aspect ratio.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32) {
        self.core.resize(width);
    }

    /// Report the natural size of frame `index`'s image once it has loaded.
    #[wasm_bindgen(js_name = image_loaded)]
    pub fn image_loaded(&mut self, index: u32, width: f32, height: f32) {
        self.core.image_loaded(index as usize, Size::new(width, height));
    }

    /// Frame `index`'s content element exists and `contentBox(index)` can
    /// measure it.
    #[wasm_bindgen(js_name = content_ready)]
    pub fn content_ready(&mut self, index: u32) {
        self.core.content_ready(index as usize);
    }

    /// Navigate to `index`. Returns the current slide afterwards.
    #[wasm_bindgen(js_name = switch_to)]
    pub fn switch_to(&mut self, index: u32) -> Result<JsValue, JsError> {
        let slide = self.core.switch_to(index as usize);
        slide_value(slide)
    }

    #[wasm_bindgen]
    pub fn left(&mut self) -> Result<JsValue, JsError> {
        let slide = self.core.left();
        slide_value(slide)
    }

    #[wasm_bindgen]
    pub fn right(&mut self) -> Result<JsValue, JsError> {
        let slide = self.core.right();
        slide_value(slide)
    }

    #[wasm_bindgen(js_name = drag_start)]
    pub fn drag_start(&mut self, pointer_x: f32) -> bool {
        self.core.drag_start(pointer_x)
    }

    #[wasm_bindgen(js_name = drag_move)]
    pub fn drag_move(&mut self, pointer_x: f32) -> bool {
        self.core.drag_move(pointer_x)
    }

    /// Returns "previous", "next", "snap_back" or undefined when no drag was active.
    #[wasm_bindgen(js_name = drag_stop)]
    pub fn drag_stop(&mut self) -> Result<JsValue, JsError> {
        let resolution = self.core.drag_stop();
        swb::to_value(&resolution).map_err(|e| JsError::new(&format!("drag_stop error: {e}")))
    }

    /// `input` is `{ type: "mouse", client_x }` or `{ type: "touch", touches: [x, ...] }`.
    #[wasm_bindgen(js_name = pointer_down)]
    pub fn pointer_down(&mut self, input: JsValue) -> Result<bool, JsError> {
        let input = pointer_input(input)?;
        Ok(self.core.pointer_down(&input))
    }

    #[wasm_bindgen(js_name = pointer_move)]
    pub fn pointer_move(&mut self, input: JsValue) -> Result<bool, JsError> {
        let input = pointer_input(input)?;
        Ok(self.core.pointer_move(&input))
    }

    #[wasm_bindgen(js_name = pointer_up)]
    pub fn pointer_up(&mut self) -> Result<JsValue, JsError> {
        let resolution = self.core.pointer_up();
        swb::to_value(&resolution).map_err(|e| JsError::new(&format!("pointer_up error: {e}")))
    }

    #[wasm_bindgen(js_name = pointer_leave)]
    pub fn pointer_leave(&mut self) -> Result<JsValue, JsError> {
        let resolution = self.core.pointer_leave();
        swb::to_value(&resolution)
            .map_err(|e| JsError::new(&format!("pointer_leave error: {e}")))
    }

    #[wasm_bindgen(js_name = hover_enter)]
    pub fn hover_enter(&mut self) {
        self.core.hover_enter();
    }

    #[wasm_bindgen(js_name = hover_exit)]
    pub fn hover_exit(&mut self) {
        self.core.hover_exit();
    }

    /// Forward a `KeyboardEvent.key`. Only arrow keys while hovered navigate.
    #[wasm_bindgen(js_name = key_down)]
    pub fn key_down(&mut self, key: String) -> Result<JsValue, JsError> {
        let slide = self.core.key_down(Key::from(key.as_str()));
        slide_value(slide)
    }

    /// Advance animations by `dt_ms` milliseconds. Returns Outputs JSON
    /// (`{ writes: [...] }`) to apply to the page.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt_ms: f32) -> Result<JsValue, JsError> {
        let out = self.core.tick(dt_ms);
        swb::to_value(&out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Pending writes without advancing time.
    #[wasm_bindgen(js_name = drain_outputs)]
    pub fn drain_outputs(&mut self) -> Result<JsValue, JsError> {
        let out = self.core.drain_outputs();
        swb::to_value(&out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Register `callback(index, { index, slide })` for committed slide
    /// changes. Returns a handle for `off_change`.
    #[wasm_bindgen(js_name = on_change)]
    pub fn on_change(&mut self, callback: Function) -> u32 {
        let id = self.core.subscribe(move |change| {
            let event = ChangeEvent {
                index: change.index,
                slide: change.slide,
            };
            let payload = swb::to_value(&event).unwrap_or(JsValue::UNDEFINED);
            let _ = callback.call2(
                &JsValue::UNDEFINED,
                &JsValue::from(change.index as u32),
                &payload,
            );
        });
        id.0
    }

    #[wasm_bindgen(js_name = off_change)]
    pub fn off_change(&mut self, id: u32) -> bool {
        self.core.unsubscribe(ObserverId(id))
    }

    #[wasm_bindgen(js_name = current_index)]
    pub fn current_index(&self) -> Option<u32> {
        self.core.current_index().map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = slide_count)]
    pub fn slide_count(&self) -> u32 {
        self.core.slides().len() as u32
    }

    /// Navigation snapshot: `{ current_index, target_offset, strip_offset, is_animating, is_dragging }`.
    #[wasm_bindgen]
    pub fn navigation(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.navigation())
            .map_err(|e| JsError::new(&format!("navigation error: {e}")))
    }

    /// `{ viewport_width, viewport_height, aspect_ratio }`.
    #[wasm_bindgen]
    pub fn geometry(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.core.geometry())
            .map_err(|e| JsError::new(&format!("geometry error: {e}")))
    }
}

fn slide_value(slide: Option<&Slide>) -> Result<JsValue, JsError> {
    match slide {
        Some(slide) => {
            swb::to_value(slide).map_err(|e| JsError::new(&format!("slide error: {e}")))
        }
        None => Ok(JsValue::UNDEFINED),
    }
}

fn pointer_input(input: JsValue) -> Result<PointerInput, JsError> {
    swb::from_value(input).map_err(|e| JsError::new(&format!("pointer input error: {e}")))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
