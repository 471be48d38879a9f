//! Browser tests for the canvas adapter. Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use hop_garden::math::Vec2;
use hop_garden::render::{CanvasSurface, Color, Fill, Stroke, Surface};
use hop_garden::{start_garden, HopGarden};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
}

/// Canvas attached to the page under `id`
fn attached_canvas(id: &str, width: u32, height: u32) -> HtmlCanvasElement {
    let canvas = canvas(width, height);
    canvas.set_id(id);
    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
    body.append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn canvas_surface_reports_backing_size() {
    let mut surface = CanvasSurface::new(canvas(320, 200)).unwrap();
    assert_eq!(surface.size(), (320.0, 200.0));
    surface.resize(640, 400);
    assert_eq!(surface.size(), (640.0, 400.0));
}

#[wasm_bindgen_test]
fn canvas_surface_tolerates_degenerate_shapes() {
    let mut surface = CanvasSurface::new(canvas(100, 100)).unwrap();
    let fill = Fill::solid(Color::rgb(255, 0, 0), 0.5);
    let stroke = Stroke::new(Color::hsl(120.0, 50.0, 50.0), 1.0, 2.0);
    surface.save();
    surface.translate(Vec2::new(50.0, 50.0));
    surface.fill_ellipse(Vec2::ZERO, Vec2::new(-1.0, 4.0), &fill);
    surface.stroke_circle(Vec2::ZERO, 0.0, &stroke);
    surface.stroke_line(Vec2::ZERO, Vec2::new(10.0, 10.0), &stroke);
    surface.restore();
    surface.clear();
}

#[wasm_bindgen_test]
fn hop_garden_runs_frames() {
    let mut garden = HopGarden::new(canvas(800, 600), canvas(800, 600), canvas(800, 600), None).unwrap();
    assert_eq!(garden.plant_count(), 1);

    assert_eq!(garden.on_pointer_move(400.0, 300.0), 6);
    for i in 0..10 {
        garden.render(i as f64 * 16.0);
    }
    // Five more from the timer batch on the first frame
    assert_eq!(garden.rain_count(), 11);

    garden.resize(400, 300);
    garden.render(200.0);
}

#[wasm_bindgen_test]
fn hop_garden_rejects_bad_config() {
    let result = HopGarden::new(
        canvas(10, 10),
        canvas(10, 10),
        canvas(10, 10),
        Some("mode: [unterminated".to_string()),
    );
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn start_garden_without_canvases_is_a_no_op() {
    assert!(start_garden("no-plant", "no-flowers", "no-particles", None).is_ok());
}

#[wasm_bindgen_test]
fn start_garden_skips_canvas_without_2d_context() {
    let plant = attached_canvas("webgl-plant", 40, 30);
    attached_canvas("webgl-flowers", 40, 30);
    attached_canvas("webgl-particles", 40, 30);
    // A canvas holding another context type has no 2D context to give
    let claimed = plant.get_context("webgl").unwrap().is_some()
        || plant.get_context("bitmaprenderer").unwrap().is_some();
    assert!(claimed);

    assert!(start_garden("webgl-plant", "webgl-flowers", "webgl-particles", None).is_ok());
    assert_eq!((plant.width(), plant.height()), (40, 30));
}

#[wasm_bindgen_test]
fn start_garden_rejects_bad_config_before_touching_the_page() {
    let plant = attached_canvas("yaml-plant", 40, 30);
    attached_canvas("yaml-flowers", 40, 30);
    attached_canvas("yaml-particles", 40, 30);

    let result = start_garden(
        "yaml-plant",
        "yaml-flowers",
        "yaml-particles",
        Some("mode: [unterminated".to_string()),
    );
    assert!(result.is_err());
    assert_eq!((plant.width(), plant.height()), (40, 30));
}
