//! Picture Slider Core (host-agnostic)
//!
//! Coordination engine for a draggable image carousel: viewport geometry,
//! the strip transition, drag gestures and the caption cross-fade. The engine
//! never touches a real surface. Hosts feed it events, measurements and time
//! (`Carousel::tick`) and apply the `SurfaceWrite`s it returns.

pub mod caption;
pub mod carousel;
pub mod config;
pub mod controls;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod observers;
pub mod outputs;
pub mod probe;
pub mod slide;
pub mod transition;
pub mod tween;

// Re-exports for consumers (adapters)
pub use caption::{CaptionAnimationState, CaptionPhase, CaptionSynchronizer};
pub use carousel::Carousel;
pub use config::{CarouselOptions, DurationSpec, NamedDuration, OptionsPatch, PanelOptions};
pub use controls::{Key, KeyCommand};
pub use drag::{DragResolution, DragSession, PointerInput, COMMIT_THRESHOLD};
pub use error::CarouselError;
pub use geometry::{
    CarouselGeometry, ContentLayout, FrameLayout, GeometryManager, ImageFit, ImageLayout,
};
pub use observers::{ObserverId, SlideChange};
pub use outputs::{Arrow, Outputs, SurfaceWrite};
pub use probe::{BoxMetrics, Edges, NullProbe, Size, SurfaceProbe};
pub use slide::{parse_slides_json, Slide, SlideRegistry};
pub use transition::{Motion, NavigationState};
pub use tween::{Easing, Tween};
