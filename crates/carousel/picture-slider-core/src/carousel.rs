//! Carousel: owns every component and is the single entry point for host
//! events.
//!
//! Methods:
//! - new, resize, image_loaded, content_ready (geometry)
//! - switch_to, left, right (navigation)
//! - pointer_down, pointer_move, pointer_up, pointer_leave (drag)
//! - hover_enter, hover_exit, key_down (controls)
//! - tick (advance animations → drain surface writes)

use log::debug;

use crate::caption::CaptionSynchronizer;
use crate::config::CarouselOptions;
use crate::controls::{ControlsPanel, Key, KeyCommand};
use crate::drag::{DragController, DragResolution, PointerInput};
use crate::geometry::{CarouselGeometry, FrameLayout, GeometryManager};
use crate::observers::{ObserverId, Observers, SlideChange};
use crate::outputs::{Arrow, Outputs, SurfaceWrite};
use crate::probe::{Size, SurfaceProbe};
use crate::slide::{Slide, SlideRegistry};
use crate::transition::{NavigationState, TransitionController};

pub struct Carousel {
    options: CarouselOptions,
    layout: GeometryManager,
    geometry: CarouselGeometry,
    slides: SlideRegistry,
    /// Natural image sizes, known once the host reports a load.
    image_sizes: Vec<Option<Size>>,
    transition: TransitionController,
    drag: DragController,
    caption: CaptionSynchronizer,
    controls: ControlsPanel,
    observers: Observers,
    probe: Box<dyn SurfaceProbe>,
    outputs: Outputs,
    initialized: bool,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("geometry", &self.geometry)
            .field("slides", &self.slides.len())
            .field("navigation", &self.transition.state())
            .field("caption", self.caption.state())
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl Carousel {
    /// Build the carousel inside a container of the given initial size.
    ///
    /// The initial size fixes the aspect ratio for the carousel's lifetime.
    /// Construction describes the whole surface in the pending outputs and
    /// then navigates to the first slide.
    pub fn new(
        container: Size,
        slides: Vec<Slide>,
        options: CarouselOptions,
        probe: Box<dyn SurfaceProbe>,
    ) -> Self {
        let mut carousel = Self {
            layout: GeometryManager::new(container, options.center),
            geometry: CarouselGeometry::default(),
            slides: SlideRegistry::new(),
            image_sizes: Vec::with_capacity(slides.len()),
            transition: TransitionController::new(options.duration.millis()),
            drag: DragController::default(),
            caption: CaptionSynchronizer::new(options.text.duration.millis()),
            controls: ControlsPanel::new(
                options.controls.opacity,
                options.controls.duration.millis(),
            ),
            observers: Observers::default(),
            probe,
            outputs: Outputs::default(),
            initialized: false,
            options,
        };

        // Geometry only; nothing to lay out yet.
        carousel.resize(container.width);

        for slide in slides {
            carousel.append_slide(slide);
        }
        carousel.emit_surface_sizes();
        carousel.outputs.push(SurfaceWrite::StripOffset { left: 0.0 });

        carousel.outputs.push(SurfaceWrite::CaptionHeight { height: 0.0 });
        carousel.outputs.push(SurfaceWrite::CaptionPanelOpacity {
            opacity: carousel.options.caption.opacity,
        });
        carousel.outputs.push(SurfaceWrite::ControlsOpacity { opacity: 0.0 });
        for arrow in [Arrow::Previous, Arrow::Next] {
            if let Some(variant) = &carousel.options.arrows {
                carousel.outputs.push(SurfaceWrite::ArrowClass {
                    arrow,
                    class: format!("{}-{}", arrow.class_name(), variant),
                });
            }
            carousel.outputs.push(SurfaceWrite::ArrowOpacity { arrow, opacity: 0.0 });
        }

        carousel.initialized = true;
        carousel.switch_to(0);
        carousel
    }

    fn append_slide(&mut self, slide: Slide) {
        self.outputs.push(SurfaceWrite::FrameAppended {
            index: self.slides.len(),
            link: slide.link.clone(),
            image: slide.source.clone(),
            content: slide.content.clone(),
        });
        let index = self.slides.append(slide);
        self.image_sizes.push(None);
        if let Some(layout) = self.layout_frame(index) {
            self.outputs.push(SurfaceWrite::Frame { layout });
        }
    }

    fn layout_frame(&mut self, index: usize) -> Option<FrameLayout> {
        let slide = self.slides.get(index)?;
        let content = if slide.content.is_some() {
            self.probe.content_box(index)
        } else {
            None
        };
        let image = self.image_sizes.get(index).copied().flatten();
        Some(self.layout.layout_frame(index, slide, &self.geometry, image, content))
    }

    fn emit_surface_sizes(&mut self) {
        let (width, height) = (self.geometry.width(), self.geometry.height());
        self.outputs.push(SurfaceWrite::ContainerHeight { height });
        self.outputs.push(SurfaceWrite::StripSize {
            width: width * self.slides.len() as f32,
            height,
        });
        self.outputs.push(SurfaceWrite::ControlsSize { width, height });
    }

    /// Container width changed.
    ///
    /// Any strip animation is abandoned, not replayed: every frame is laid
    /// out again and the strip is placed on the committed index.
    pub fn resize(&mut self, container_width: f32) {
        self.transition.cancel();
        self.geometry = self.layout.compute(container_width);
        debug!(
            "resize: viewport {}x{}",
            self.geometry.viewport_width, self.geometry.viewport_height
        );
        if !self.initialized {
            return;
        }
        self.caption.invalidate_measurements();
        self.caption.relayout(
            self.geometry.viewport_width,
            self.probe.as_mut(),
            &mut self.outputs,
        );
        self.emit_surface_sizes();
        for index in 0..self.slides.len() {
            if let Some(layout) = self.layout_frame(index) {
                self.outputs.push(SurfaceWrite::Frame { layout });
            }
        }
        self.transition.reposition(&self.geometry, &mut self.outputs);
    }

    /// The host finished loading frame `index`'s image.
    pub fn image_loaded(&mut self, index: usize, natural: Size) {
        let Some(slot) = self.image_sizes.get_mut(index) else {
            debug!("image_loaded: no frame {index}");
            return;
        };
        *slot = Some(natural);
        if let Some(layout) = self.layout_frame(index) {
            self.outputs.push(SurfaceWrite::Frame { layout });
        }
    }

    /// Frame `index`'s rich content can now be measured.
    pub fn content_ready(&mut self, index: usize) {
        if self.slides.get(index).is_none() {
            debug!("content_ready: no frame {index}");
            return;
        }
        if let Some(layout) = self.layout_frame(index) {
            self.outputs.push(SurfaceWrite::Frame { layout });
        }
    }

    /// Navigate to slide `index`.
    ///
    /// Out-of-range indices and calls made during a drag are ignored and
    /// return the current slide unchanged.
    pub fn switch_to(&mut self, index: usize) -> Option<&Slide> {
        if self.transition.is_dragging() {
            debug!("switch_to({index}) ignored while dragging");
            return self.current_slide();
        }
        let count = self.slides.len();
        if index >= count {
            debug!("switch_to({index}) out of range for {count} slides");
            return self.current_slide();
        }

        self.transition.begin(index, count, &self.geometry);
        let slide = self.slides.get(index)?;
        self.caption.set_caption(slide.caption.as_deref());
        self.observers.notify(&SlideChange { index, slide });
        Some(slide)
    }

    /// Previous slide, clamped at the first.
    pub fn left(&mut self) -> Option<&Slide> {
        let current = self.transition.current()?;
        self.switch_to(current.saturating_sub(1))
    }

    /// Next slide, clamped at the last.
    pub fn right(&mut self) -> Option<&Slide> {
        let current = self.transition.current()?;
        let last = self.slides.last_index()?;
        self.switch_to((current + 1).min(last))
    }

    /// Begin a drag. Ignored without slides, since nothing could snap back.
    pub fn drag_start(&mut self, pointer_x: f32) -> bool {
        if !pointer_x.is_finite() || self.slides.is_empty() {
            return false;
        }
        self.drag.start(&mut self.transition, pointer_x)
    }

    pub fn drag_move(&mut self, pointer_x: f32) -> bool {
        if !pointer_x.is_finite() {
            return false;
        }
        self.drag.move_to(&mut self.transition, pointer_x, &mut self.outputs)
    }

    /// Release the drag and navigate according to the displacement.
    pub fn drag_stop(&mut self) -> Option<DragResolution> {
        let resolution = self.drag.stop(&mut self.transition, &self.geometry)?;
        match resolution {
            DragResolution::Previous => {
                self.left();
            }
            DragResolution::Next => {
                self.right();
            }
            DragResolution::SnapBack => {
                if let Some(current) = self.transition.current() {
                    self.switch_to(current);
                }
            }
        }
        Some(resolution)
    }

    /// Mouse button or first touch went down.
    pub fn pointer_down(&mut self, input: &PointerInput) -> bool {
        match input.primary_x() {
            Some(x) => self.drag_start(x),
            None => false,
        }
    }

    /// A touch move opens a session on its own; mouse moves need a prior press.
    pub fn pointer_move(&mut self, input: &PointerInput) -> bool {
        let Some(x) = input.primary_x() else {
            return false;
        };
        if matches!(input, PointerInput::Touch { .. }) {
            self.drag_start(x);
        }
        self.drag_move(x)
    }

    pub fn pointer_up(&mut self) -> Option<DragResolution> {
        self.drag_stop()
    }

    /// Leaving the container ends a drag like a release.
    pub fn pointer_leave(&mut self) -> Option<DragResolution> {
        self.drag_stop()
    }

    pub fn hover_enter(&mut self) {
        self.controls.activate(&mut self.outputs);
    }

    pub fn hover_exit(&mut self) {
        self.controls.deactivate(&mut self.outputs);
    }

    /// Arrow keys navigate while the pointer is over the carousel.
    pub fn key_down(&mut self, key: Key) -> Option<&Slide> {
        match self.controls.command_for(key)? {
            KeyCommand::Previous => self.left(),
            KeyCommand::Next => self.right(),
        }
    }

    /// Advance all animations by `dt_ms` and drain the surface writes
    /// accumulated since the last drain.
    pub fn tick(&mut self, dt_ms: f32) -> Outputs {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.transition.step(dt_ms, &mut self.outputs);
        self.caption.step(
            dt_ms,
            self.geometry.viewport_width,
            self.probe.as_mut(),
            &mut self.outputs,
        );
        self.controls.step(dt_ms, &mut self.outputs);
        self.drain_outputs()
    }

    /// Take pending surface writes without advancing time.
    pub fn drain_outputs(&mut self) -> Outputs {
        std::mem::take(&mut self.outputs)
    }

    pub fn subscribe(&mut self, f: impl FnMut(&SlideChange<'_>) + 'static) -> ObserverId {
        self.observers.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.transition.current()
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.transition.current().and_then(|i| self.slides.get(i))
    }

    pub fn navigation(&self) -> NavigationState {
        self.transition.state()
    }

    pub fn strip_offset(&self) -> f32 {
        self.transition.strip_offset()
    }

    pub fn arrow_opacity(&self, arrow: Arrow) -> f32 {
        self.transition.arrow_opacity(arrow)
    }

    pub fn geometry(&self) -> &CarouselGeometry {
        &self.geometry
    }

    pub fn slides(&self) -> &SlideRegistry {
        &self.slides
    }

    pub fn caption(&self) -> &CaptionSynchronizer {
        &self.caption
    }

    pub fn controls(&self) -> &ControlsPanel {
        &self.controls
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }
}
