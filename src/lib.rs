use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, MouseEvent, TouchEvent};

pub mod animation;
pub mod config;
pub mod console;
pub mod garden;
pub mod growth;
pub mod interaction;
pub mod math;
pub mod particles;
pub mod render;

pub use config::GardenConfig;
pub use garden::Garden;

use config::DeviceClass;
use interaction::{to_surface_point, ClientRect};
use math::{MathRandom, Vec2};
use render::{CanvasSurface, Layers};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Garden bound to three stacked canvases, exposed to JavaScript
#[wasm_bindgen]
pub struct HopGarden {
    garden: Garden,
    layers: Layers<CanvasSurface>,
}

#[wasm_bindgen]
impl HopGarden {
    /// Create a garden drawing to the given canvases.
    ///
    /// `config_yaml` overlays the default configuration when given.
    #[wasm_bindgen(constructor)]
    pub fn new(
        plant: HtmlCanvasElement,
        flowers: HtmlCanvasElement,
        particles: HtmlCanvasElement,
        config_yaml: Option<String>,
    ) -> Result<HopGarden, JsValue> {
        let config = parse_config(config_yaml)?;
        let layers = canvas_layers(plant, flowers, particles).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self::with_layers(config, layers))
    }

    /// Advance and draw one frame
    #[wasm_bindgen]
    pub fn render(&mut self, time_ms: f64) {
        self.garden.frame(time_ms, &mut self.layers);
    }

    /// Pointer moved, in surface coordinates. Returns the number of flowers spawned.
    #[wasm_bindgen]
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> usize {
        self.garden.on_pointer_move(Vec2::new(x, y))
    }

    /// Touch moved; `coords` holds `x, y` pairs, one per touch point
    #[wasm_bindgen]
    pub fn on_touch_move(&mut self, coords: &[f32]) -> usize {
        self.garden.on_touch_move(&touch_points(coords))
    }

    /// Click or tap in surface coordinates. Returns the number of flowers popped.
    #[wasm_bindgen]
    pub fn on_click(&mut self, x: f32, y: f32) -> usize {
        self.garden.on_click(Vec2::new(x, y))
    }

    /// Resize all three canvases
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.layers.plant.resize(width, height);
        self.layers.flowers.resize(width, height);
        self.layers.particles.resize(width, height);
        self.garden.resize(width as f32, height as f32);
    }

    #[wasm_bindgen]
    pub fn rain_count(&self) -> usize {
        self.garden.rain().count()
    }

    #[wasm_bindgen]
    pub fn plant_count(&self) -> usize {
        self.garden.bed().plants().len()
    }

    #[wasm_bindgen]
    pub fn is_regenerating(&self) -> bool {
        self.garden.is_regenerating()
    }

    #[wasm_bindgen]
    pub fn is_mobile(&self) -> bool {
        self.garden.device() == DeviceClass::Mobile
    }
}

impl HopGarden {
    fn with_layers(config: GardenConfig, layers: Layers<CanvasSurface>) -> Self {
        let device = config.device_for_width(css_width(layers.plant.canvas()));
        let (width, height) = layers.size();
        let garden = Garden::new(config, device, width, height, Box::new(MathRandom));

        console::info(&format!("garden started ({:?}, {}x{})", device, width, height));
        Self { garden, layers }
    }

    fn plant_canvas(&self) -> &HtmlCanvasElement {
        self.layers.plant.canvas()
    }
}

/// Look up the three canvases by id, size them to their container, wire input
/// and run the animation loop.
///
/// Only a malformed config is reported as an error, and it is checked before
/// the page is touched. Missing elements or canvases without a 2D context are
/// logged and leave the page untouched.
#[wasm_bindgen]
pub fn start_garden(
    plant_id: &str,
    flowers_id: &str,
    particles_id: &str,
    config_yaml: Option<String>,
) -> Result<(), JsValue> {
    let config = parse_config(config_yaml)?;

    let Some(window) = web_sys::window() else {
        console::warn("no window, garden not started");
        return Ok(());
    };
    let Some(document) = window.document() else {
        console::warn("no document, garden not started");
        return Ok(());
    };

    let mut canvases = Vec::with_capacity(3);
    for id in [plant_id, flowers_id, particles_id] {
        match document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => canvases.push(canvas),
            None => {
                console::warn(&format!("canvas #{} not found, garden not started", id));
                return Ok(());
            }
        }
    }

    let (Some(particles), Some(flowers), Some(plant)) = (canvases.pop(), canvases.pop(), canvases.pop()) else {
        return Ok(());
    };
    let (width, height) = container_size(&plant);
    let mut layers = match canvas_layers(plant, flowers, particles) {
        Ok(layers) => layers,
        Err(e) => {
            console::warn(&format!("{}, garden not started", e));
            return Ok(());
        }
    };
    layers.plant.resize(width, height);
    layers.flowers.resize(width, height);
    layers.particles.resize(width, height);

    let garden = Rc::new(RefCell::new(HopGarden::with_layers(config, layers)));

    // Pointer move rains flowers from the cursor
    {
        let garden = garden.clone();
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let mut garden = garden.borrow_mut();
            let point = event_point(garden.plant_canvas(), evt.client_x(), evt.client_y());
            garden.garden.on_pointer_move(point);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch move, every active touch point
    {
        let garden = garden.clone();
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            let mut garden = garden.borrow_mut();
            let touches = evt.touches();
            let points: Vec<Vec2> = (0..touches.length())
                .filter_map(|i| touches.get(i))
                .map(|t| event_point(garden.plant_canvas(), t.client_x(), t.client_y()))
                .collect();
            garden.garden.on_touch_move(&points);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Click pops falling flowers
    {
        let garden = garden.clone();
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let mut garden = garden.borrow_mut();
            let point = event_point(garden.plant_canvas(), evt.client_x(), evt.client_y());
            garden.garden.on_click(point);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keep the canvases filling their container
    {
        let garden = garden.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let mut garden = garden.borrow_mut();
            let (width, height) = container_size(garden.plant_canvas());
            garden.resize(width, height);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_loop(garden);
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop(garden: Rc<RefCell<HopGarden>>) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        garden.borrow_mut().render(ts);
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    if let (Some(window), Some(closure)) = (web_sys::window(), callback.borrow().as_ref()) {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn parse_config(config_yaml: Option<String>) -> Result<GardenConfig, JsValue> {
    match config_yaml {
        Some(yaml) => GardenConfig::from_yaml(&yaml).map_err(|e| JsValue::from_str(&e)),
        None => Ok(GardenConfig::default()),
    }
}

/// 2D surfaces for the three layers, back to front
fn canvas_layers(
    plant: HtmlCanvasElement,
    flowers: HtmlCanvasElement,
    particles: HtmlCanvasElement,
) -> Result<Layers<CanvasSurface>, String> {
    Ok(Layers::new(
        CanvasSurface::new(plant)?,
        CanvasSurface::new(flowers)?,
        CanvasSurface::new(particles)?,
    ))
}

fn client_rect(element: &Element) -> ClientRect {
    let rect = element.get_bounding_client_rect();
    ClientRect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

fn event_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
    to_surface_point(
        Vec2::new(client_x as f32, client_y as f32),
        client_rect(canvas),
        canvas.width() as f32,
        canvas.height() as f32,
    )
}

/// Size of the canvas' parent element, or of the canvas itself without one
fn container_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    match canvas.parent_element() {
        Some(parent) => (parent.client_width().max(0) as u32, parent.client_height().max(0) as u32),
        None => (canvas.width(), canvas.height()),
    }
}

/// On-screen width in CSS pixels, used to pick the device profile
fn css_width(canvas: &HtmlCanvasElement) -> f32 {
    match canvas.client_width() {
        w if w > 0 => w as f32,
        _ => canvas.width() as f32,
    }
}

/// Pair up a flat `x, y, x, y, ...` list; a trailing odd value is ignored
fn touch_points(coords: &[f32]) -> Vec<Vec2> {
    coords
        .chunks_exact(2)
        .map(|pair| Vec2::new(pair[0], pair[1]))
        .collect()
}
