use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use filegrid::app::{self, dispatch::ShellActionSink, file_dialog::NativeDialogService};
use filegrid::config;
use filegrid::web_assets;
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use wry::http::{header::CONTENT_TYPE, Request, Response};
use wry::WebViewBuilder;

// The custom protocol host part differs per platform.
#[cfg(any(target_os = "windows", target_os = "linux"))]
const UI_URL: &str = "filegrid://localhost/index.html";
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
const UI_URL: &str = "filegrid://index.html";

fn ui_protocol(request: Request<Vec<u8>>) -> Response<Cow<'static, [u8]>> {
    match web_assets::load(request.uri().path()) {
        Some((data, content_type)) => Response::builder()
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .expect("static response must build"),
        None => Response::builder()
            .status(404)
            .body(Cow::from(&b"Not Found"[..]))
            .expect("static response must build"),
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create the event loop and window
    let event_loop = EventLoopBuilder::<app::events::UserEvent>::with_user_event().build();

    let state = Arc::new(Mutex::new(app::state::AppState::default()));
    let ((width, height), (pos_x, pos_y)) = {
        let state_guard = state.lock().unwrap();
        (
            state_guard.config.window_size,
            state_guard.config.window_position,
        )
    };

    let window = WindowBuilder::new()
        .with_title("Filegrid")
        .with_inner_size(tao::dpi::LogicalSize::new(width, height))
        .with_position(tao::dpi::LogicalPosition::new(pos_x, pos_y))
        .with_min_inner_size(tao::dpi::LogicalSize::new(640, 420))
        .build(&event_loop)
        .expect("Failed to build Window");

    let window = Arc::new(window);

    let proxy = event_loop.create_proxy();
    let dialog_service = Arc::new(NativeDialogService {});
    let sink = Arc::new(ShellActionSink::new(proxy.clone(), state.clone()));

    let ipc_handler_state = state.clone();
    let ipc_handler_proxy = proxy.clone();
    let ipc_handler_dialog = dialog_service.clone();
    let ipc_handler_sink = sink.clone();
    let ipc_handler = move |message: String| {
        app::handle_ipc_message(
            message,
            ipc_handler_dialog.clone(),
            ipc_handler_sink.clone(),
            ipc_handler_proxy.clone(),
            ipc_handler_state.clone(),
        );
    };

    // OS-level drops onto the window navigate to the dropped directory.
    let drop_handler_state = state.clone();
    let drop_handler_proxy = proxy.clone();
    let file_drop_handler = move |event| {
        use wry::FileDropEvent;
        match event {
            FileDropEvent::Hovered { .. } => {
                drop_handler_proxy
                    .send_event(app::events::UserEvent::DragStateChanged(true))
                    .ok();
            }
            FileDropEvent::Dropped { paths, .. } => {
                drop_handler_proxy
                    .send_event(app::events::UserEvent::DragStateChanged(false))
                    .ok();
                if let Some(path) = paths.first() {
                    let directory = if path.is_dir() {
                        Some(path.clone())
                    } else {
                        path.parent().map(|p| p.to_path_buf())
                    };
                    if let Some(directory) = directory {
                        app::tasks::start_listing(
                            directory,
                            drop_handler_proxy.clone(),
                            drop_handler_state.clone(),
                        );
                    }
                }
            }
            FileDropEvent::Cancelled => {
                drop_handler_proxy
                    .send_event(app::events::UserEvent::DragStateChanged(false))
                    .ok();
            }
            _ => (),
        }
        true
    };

    let webview = WebViewBuilder::new(&*window)
        .with_custom_protocol("filegrid".to_string(), ui_protocol)
        .with_url(UI_URL)
        .with_ipc_handler(ipc_handler)
        .with_file_drop_handler(file_drop_handler)
        .with_devtools(cfg!(debug_assertions))
        .build()
        .expect("Failed to build WebView");

    let state_for_events = state.clone();
    let window_for_events = window.clone();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                tracing::info!("Application initialized.");
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    tracing::info!("Close requested. Saving final window state...");
                    let mut state_guard = state_for_events.lock().unwrap();
                    let size = window_for_events.inner_size();
                    let position = window_for_events.outer_position().unwrap_or_default();
                    state_guard.config.window_size = (size.width.into(), size.height.into());
                    state_guard.config.window_position = (position.x.into(), position.y.into());

                    if let Err(e) = config::settings::save_config(&state_guard.config, None) {
                        tracing::error!("Failed to save config on exit: {}", e);
                    }
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let mut state_guard = state_for_events.lock().unwrap();
                    state_guard.config.window_size = (size.width.into(), size.height.into());
                }
                WindowEvent::Moved(position) => {
                    let mut state_guard = state_for_events.lock().unwrap();
                    state_guard.config.window_position = (position.x.into(), position.y.into());
                }
                _ => (),
            },
            Event::UserEvent(user_event) => {
                app::handle_user_event(user_event, &webview);
            }
            _ => (),
        }
    });
}
