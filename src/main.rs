#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use slide_ink::OverlayConfig;

/// Environment variable pointing at an optional JSON config file
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV_VAR: &str = "SLIDE_INK_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> OverlayConfig {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        return OverlayConfig::default();
    };
    match OverlayConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Ignoring config {path}: {err}");
            OverlayConfig::default()
        }
    }
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use slide_ink::host::{DesktopHost, MessageChannel};

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([320.0, 240.0])
            .with_transparent(true)
            .with_always_on_top(),
        ..Default::default()
    };
    eframe::run_native(
        "Slide Ink",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(slide_ink::OverlayApp::new(
                cc,
                &config,
                vec![Box::new(DesktopHost)],
                MessageChannel::new(),
            )))
        }),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;
    use eframe::wasm_bindgen::closure::Closure;
    use slide_ink::host::{MessageChannel, hosts_from_attributes};

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let window = web_sys::window().expect("No window");
        let document = window.document().expect("No document");

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let hosts = hosts_from_attributes(|name| canvas.get_attribute(name));

        // Forward cross-window posts into the overlay
        let messages = MessageChannel::new();
        let host_side = messages.clone();
        let on_message = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |event: web_sys::MessageEvent| {
            match event.data().as_string() {
                Some(raw) => host_side.post(raw),
                None => log::debug!("Ignoring non-string window message"),
            }
        });
        if let Err(err) = window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref()) {
            log::error!("Failed to listen for window messages: {err:?}");
        }
        on_message.forget();

        let config = OverlayConfig::default();
        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| Ok(Box::new(slide_ink::OverlayApp::new(cc, &config, hosts, messages)))),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html("<p> The overlay has crashed. See the developer console for details. </p>");
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
