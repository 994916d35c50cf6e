//! Orbit Canvas entry point
//!
//! Browser: wires DOM events to the app and runs the frame loop on
//! `requestAnimationFrame`. Native: headless run on a software framebuffer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, MouseEvent};

    use orbit_canvas::renderer::SdfRenderState;
    use orbit_canvas::{App, Settings};

    /// App plus the GPU surface it draws on
    struct Runtime {
        app: App,
        renderer: SdfRenderState,
    }

    impl Runtime {
        fn frame(&mut self) {
            let Runtime { app, renderer } = self;
            app.frame(renderer);
        }

        fn background(&mut self, bytes: &[u8]) {
            let Runtime { app, renderer } = self;
            // Failure is already logged; the session carries on
            let _ = app.on_background(bytes, renderer);
        }
    }

    /// Size the canvas backing store to its CSS size times the pixel ratio.
    /// Returns (css width, css height, pixel ratio).
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (f32, f32, f32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        canvas.set_width((client_w as f64 * dpr) as u32);
        canvas.set_height((client_h as f64 * dpr) as u32);
        (client_w as f32, client_h as f32, dpr as f32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Orbit Canvas starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (css_w, css_h, dpr) = fit_canvas(&canvas);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let app = App::new(seed, Vec2::new(css_w, css_h));
        log::info!("App initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = SdfRenderState::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
            dpr,
        )
        .await;

        let runtime = Rc::new(RefCell::new(Runtime { app, renderer }));

        setup_pointer_handler(&canvas, runtime.clone());
        setup_create_button(runtime.clone());
        setup_file_input(runtime.clone());
        setup_resize(canvas, runtime.clone());

        // Start frame loop
        request_animation_frame(runtime);

        log::info!("Orbit Canvas running!");
    }

    fn setup_pointer_handler(canvas: &HtmlCanvasElement, runtime: Rc<RefCell<Runtime>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            runtime
                .borrow_mut()
                .app
                .on_pointer_move(event.offset_x() as f32, event.offset_y() as f32);
        });
        let _ = canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_create_button(runtime: Rc<RefCell<Runtime>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(btn) = document.get_element_by_id("create-circle") else {
            log::warn!("No #create-circle button; circles can't be spawned");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            runtime.borrow_mut().app.on_create();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_file_input(runtime: Rc<RefCell<Runtime>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(input) = document
            .get_element_by_id("file-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::warn!("No #file-input element; background loading disabled");
            return;
        };

        let input_clone = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(file) = input_clone.files().and_then(|files| files.get(0)) else {
                return;
            };
            let runtime = runtime.clone();
            let read = JsFuture::from(file.array_buffer());
            wasm_bindgen_futures::spawn_local(async move {
                match read.await {
                    Ok(buffer) => {
                        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                        runtime.borrow_mut().background(&bytes);
                    }
                    Err(e) => log::error!("Error reading the image file: {:?}", e),
                }
            });
        });
        let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: HtmlCanvasElement, runtime: Rc<RefCell<Runtime>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (css_w, css_h, dpr) = fit_canvas(&canvas);
            let mut rt = runtime.borrow_mut();
            rt.renderer.resize(canvas.width(), canvas.height(), dpr);
            rt.app.resize(css_w, css_h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(runtime: Rc<RefCell<Runtime>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(runtime);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(runtime: Rc<RefCell<Runtime>>) {
        runtime.borrow_mut().frame();
        request_animation_frame(runtime);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs::File;
    use std::io::BufWriter;
    use std::time::{SystemTime, UNIX_EPOCH};

    use orbit_canvas::renderer::{Framebuffer, Surface};
    use orbit_canvas::{App, CanvasError, Settings, polar_to_cartesian};

    /// Pointer sweep speed for the headless run (radians per frame)
    const SWEEP_SPEED: f32 = 0.01;

    /// `orbit-canvas [OUT.png] [BACKGROUND]`
    pub fn run() -> Result<(), CanvasError> {
        let settings = Settings::load();
        let mut args = std::env::args().skip(1);
        let output = args.next();
        let background = args.next();

        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        log::info!("Seed: {}", seed);

        let mut fb = Framebuffer::new(settings.width, settings.height);
        let mut app = App::new(seed, fb.size());
        for _ in 0..settings.demo_circles {
            app.on_create();
        }

        // Pointer sweeps slowly around the middle of the surface
        let center = fb.size() / 2.0;
        let sweep = fb.size().min_element() * 0.35;
        for frame in 0..settings.demo_frames {
            let pointer = center + polar_to_cartesian(sweep, frame as f32 * SWEEP_SPEED);
            app.on_pointer_move(pointer.x, pointer.y);
            app.frame(&mut fb);
        }

        if let Some(selected) = app.state.circles.selected() {
            log::info!(
                "After {} frames circle {} is at ({:.1}, {:.1})",
                app.state.frame,
                selected.id,
                selected.pos.x,
                selected.pos.y
            );
        }

        if let Some(path) = background {
            let bytes = std::fs::read(&path)?;
            // Decode errors are logged inside; keep the last frame instead
            let _ = app.on_background(&bytes, &mut fb);
        }

        if let Some(path) = output {
            fb.write_png(BufWriter::new(File::create(&path)?))?;
            log::info!("Wrote {}x{} frame to {}", fb.width(), fb.height(), path);
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orbit Canvas (native) starting...");
    log::info!("Native mode renders headless - run with `trunk serve` for the interactive version");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
