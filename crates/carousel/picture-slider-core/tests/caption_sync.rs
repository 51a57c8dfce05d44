use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use picture_slider_core::{
    BoxMetrics, CaptionPhase, Carousel, CarouselOptions, Outputs, Size, Slide, SurfaceProbe,
    SurfaceWrite,
};

/// Every caption is 40px tall; records each measurement request.
#[derive(Default)]
struct FixedProbe {
    calls: Rc<RefCell<Vec<(String, u32)>>>,
}

impl SurfaceProbe for FixedProbe {
    fn caption_height(&mut self, text: &str, viewport_width: u32) -> f32 {
        self.calls.borrow_mut().push((text.to_string(), viewport_width));
        40.0
    }

    fn content_box(&mut self, _index: usize) -> Option<BoxMetrics> {
        None
    }
}

fn mk_carousel(slides: Vec<Slide>) -> (Carousel, Rc<RefCell<Vec<(String, u32)>>>) {
    let probe = FixedProbe::default();
    let calls = probe.calls.clone();
    let c = Carousel::new(
        Size::new(900.0, 600.0),
        slides,
        CarouselOptions::default(),
        Box::new(probe),
    );
    (c, calls)
}

fn captioned(n: usize) -> Vec<Slide> {
    (0..n)
        .map(|i| Slide::image(format!("img{i}.jpg")).with_caption(format!("caption {i}")))
        .collect()
}

fn caption_texts(out: &Outputs) -> Vec<&str> {
    out.writes
        .iter()
        .filter_map(|w| match w {
            SurfaceWrite::CaptionText { text } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn settle(c: &mut Carousel) {
    for _ in 0..4 {
        c.tick(1000.0);
    }
}

#[test]
fn first_caption_appears_after_the_initial_collapse() {
    let (mut c, _) = mk_carousel(captioned(2));
    c.drain_outputs();

    // Caption tweens default to 200ms: ten 20ms samples per phase.
    for _ in 0..9 {
        let out = c.tick(20.0);
        assert!(caption_texts(&out).is_empty());
        assert_eq!(c.caption().visible_text(), "");
        assert_eq!(c.caption().phase(), CaptionPhase::Collapsing);
    }
    let out = c.tick(20.0);
    assert_eq!(caption_texts(&out), vec!["caption 0"]);
    assert_eq!(c.caption().phase(), CaptionPhase::Expanding);

    for _ in 0..10 {
        c.tick(20.0);
    }
    assert_eq!(c.caption().phase(), CaptionPhase::Idle);
    assert_eq!(c.caption().height(), 40.0);
    assert_eq!(c.caption().text_opacity(), 1.0);
}

#[test]
fn text_swaps_only_at_the_phase_boundary() {
    let (mut c, _) = mk_carousel(captioned(3));
    settle(&mut c);

    c.switch_to(1);
    let mut last_height = c.caption().height();
    let mut last_opacity = c.caption().text_opacity();
    for _ in 0..9 {
        let out = c.tick(20.0);
        assert!(caption_texts(&out).is_empty());
        assert_eq!(c.caption().visible_text(), "caption 0");
        assert_eq!(c.caption().state().pending_text.as_deref(), Some("caption 1"));
        // Height and text fade move together.
        assert!(c.caption().height() < last_height);
        assert!(c.caption().text_opacity() < last_opacity);
        assert_relative_eq!(
            c.caption().height() / 40.0,
            c.caption().text_opacity(),
            epsilon = 1e-4
        );
        last_height = c.caption().height();
        last_opacity = c.caption().text_opacity();
    }

    let out = c.tick(20.0);
    assert_eq!(caption_texts(&out), vec!["caption 1"]);
    assert_eq!(c.caption().visible_text(), "caption 1");
    assert_eq!(c.caption().height(), 0.0);
    assert!(c.caption().state().pending_text.is_none());
}

#[test]
fn missing_caption_collapses_and_clears() {
    let slides = vec![
        Slide::image("a.jpg").with_caption("first"),
        Slide::image("b.jpg"),
    ];
    let (mut c, calls) = mk_carousel(slides);
    settle(&mut c);
    assert_eq!(c.caption().height(), 40.0);

    c.switch_to(1);
    let out = c.tick(1000.0);
    assert_eq!(caption_texts(&out), vec![""]);
    assert!(caption_texts(&c.tick(1000.0)).is_empty());
    assert_eq!(c.caption().phase(), CaptionPhase::Idle);
    assert_eq!(c.caption().visible_text(), "");
    assert_eq!(c.caption().height(), 0.0);
    assert_eq!(c.caption().text_opacity(), 0.0);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn interrupted_collapse_discards_the_stale_text() {
    let (mut c, _) = mk_carousel(captioned(3));
    settle(&mut c);

    c.switch_to(1);
    c.tick(100.0);
    let frozen = c.caption().height();
    c.switch_to(2);
    assert_eq!(c.caption().height(), frozen);

    let mut written = Vec::new();
    for _ in 0..40 {
        let out = c.tick(20.0);
        written.extend(caption_texts(&out).into_iter().map(str::to_owned));
    }
    assert_eq!(written, vec!["caption 2".to_string()]);
    assert_eq!(c.caption().visible_text(), "caption 2");
}

#[test]
fn measurements_are_cached_per_width() {
    let (mut c, calls) = mk_carousel(captioned(2));
    settle(&mut c);
    c.switch_to(1);
    settle(&mut c);
    c.switch_to(0);
    settle(&mut c);

    c.resize(450.0);
    c.switch_to(1);
    settle(&mut c);
    c.switch_to(1);
    settle(&mut c);

    assert_eq!(
        *calls.borrow(),
        vec![
            ("caption 0".to_string(), 900),
            ("caption 1".to_string(), 900),
            // Resize refits the visible caption at the new width.
            ("caption 0".to_string(), 450),
            ("caption 1".to_string(), 450),
        ]
    );
}

/// Text wraps to more lines as the viewport narrows.
struct WrappingProbe;

impl SurfaceProbe for WrappingProbe {
    fn caption_height(&mut self, _text: &str, viewport_width: u32) -> f32 {
        36000.0 / viewport_width as f32
    }

    fn content_box(&mut self, _index: usize) -> Option<BoxMetrics> {
        None
    }
}

fn wrapping_carousel() -> Carousel {
    Carousel::new(
        Size::new(900.0, 600.0),
        captioned(2),
        CarouselOptions::default(),
        Box::new(WrappingProbe),
    )
}

#[test]
fn resize_refits_a_settled_caption() {
    let mut c = wrapping_carousel();
    settle(&mut c);
    assert_eq!(c.caption().height(), 40.0);
    c.drain_outputs();

    c.resize(300.0);
    assert_eq!(c.caption().height(), 120.0);
    let out = c.drain_outputs();
    assert!(out
        .writes
        .contains(&SurfaceWrite::CaptionHeight { height: 120.0 }));

    settle(&mut c);
    assert_eq!(c.caption().height(), 120.0);
    assert_eq!(c.caption().visible_text(), "caption 0");
}

#[test]
fn resize_retargets_a_running_expand() {
    let mut c = wrapping_carousel();
    c.tick(200.0);
    assert_eq!(c.caption().phase(), CaptionPhase::Expanding);
    c.tick(100.0);
    let partial = c.caption().height();
    assert!(partial > 0.0 && partial < 40.0);

    c.resize(300.0);
    assert_eq!(c.caption().height(), partial);
    settle(&mut c);
    assert_eq!(c.caption().phase(), CaptionPhase::Idle);
    assert_eq!(c.caption().height(), 120.0);
}
