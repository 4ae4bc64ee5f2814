//! Window, GPU context and frame loop around the editor

use crate::demo;
use forge_editor::EditorUi;
use forge_engine::config::EngineConfig;
use forge_engine::graphics::{GraphicsError, RenderContext};
use forge_engine::scripting::ScriptEngine;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Failures that stop the editor from starting or running
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to initialize window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Failed to initialize graphics: {0}")]
    Graphics(#[from] GraphicsError),
}

/// Run the editor until the window closes
pub fn run(config: EngineConfig) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ForgeApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Everything that needs a window to exist
struct Session {
    window: Arc<Window>,
    context: RenderContext,
    editor: EditorUi,
}

struct ForgeApp {
    config: EngineConfig,
    session: Option<Session>,
    scripts: ScriptEngine,
    last_frame: Instant,
    error: Option<HostError>,
}

impl ForgeApp {
    fn new(config: EngineConfig) -> Self {
        let mut scripts = ScriptEngine::new();
        scripts.init();
        if let Some(assembly) = &config.scripting.assembly {
            if let Err(e) = scripts.load_assembly(assembly) {
                warn!(error = %e, "Script assembly not loaded");
            }
        }

        Self {
            config,
            session: None,
            scripts,
            last_frame: Instant::now(),
            error: None,
        }
    }

    fn start_session(&mut self, event_loop: &ActiveEventLoop) -> Result<Session, HostError> {
        let window_config = &self.config.window;
        let attributes = Window::default_attributes()
            .with_title(window_config.title.as_str())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);
        info!("Window initialized");

        let context = pollster::block_on(RenderContext::new(
            window.clone(),
            window_config.vsync,
        ))?;
        info!(adapter = %context.adapter_info.name, "Graphics initialized");

        let mut editor = EditorUi::new(
            &context.device,
            &context.queue,
            &window,
            context.surface_format(),
            &self.config.camera,
        );

        let mut scene = demo::build_demo_scene();
        let started = scene.start_scripts(&mut self.scripts);
        info!(entities = scene.len(), scripts = started, "Demo scene loaded");
        editor.set_active_scene(scene);

        Ok(Session {
            window,
            context,
            editor,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: HostError) {
        error!(error = %e, "Stopping editor");
        self.error = Some(e);
        event_loop.exit();
    }
}

impl ApplicationHandler for ForgeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.start_session(event_loop) {
            Ok(session) => {
                self.session = Some(session);
                self.last_frame = Instant::now();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if window_id != session.window.id() {
            return;
        }

        session.editor.handle_event(
            &session.window,
            &Event::WindowEvent {
                window_id,
                event: event.clone(),
            },
        );

        match event {
            WindowEvent::CloseRequested => {
                info!("Main window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                session.context.resize(size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = session.window.inner_size();
                debug!(scale_factor, ?size, "Scale factor changed");
                session.context.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta_time = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                if let Err(e) = run_frame(session, &mut self.scripts, delta_time) {
                    self.fail(event_loop, e.into());
                    return;
                }
                if session.editor.exit_requested() {
                    info!("Exit requested from the editor");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = &self.session {
            session.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!("Loop exited, shutting down");
        if let Some(session) = self.session.take() {
            session.context.wait_idle();
            session.editor.save_settings();
            if let Some(scene) = session.editor.scene() {
                for entity in scene.entities() {
                    self.scripts.release_entity(entity.id());
                }
            }
        }
        self.scripts.shutdown();
    }
}

/// One frame: editor UI on the surface, then script updates
fn run_frame(
    session: &mut Session,
    scripts: &mut ScriptEngine,
    delta_time: f32,
) -> Result<(), GraphicsError> {
    let size = session.window.inner_size();
    if size.width == 0 || size.height == 0 {
        return Ok(());
    }

    let Some(mut frame) = session.context.begin_frame()? else {
        return Ok(());
    };

    let device = session.context.device.clone();
    let queue = session.context.queue.clone();

    session.editor.new_frame(&session.window);
    session
        .editor
        .draw(&device, &queue, &mut frame.encoder, &session.window);
    session
        .editor
        .render(&device, &queue, &mut frame.encoder, &frame.view);
    session.context.end_frame(frame);

    sync_scripts(&mut session.editor, scripts);
    if let Some(scene) = session.editor.scene() {
        scene.update(delta_time, scripts);
    }
    Ok(())
}

/// Mirror editor changes into the script engine
fn sync_scripts(editor: &mut EditorUi, scripts: &mut ScriptEngine) {
    let events = editor.take_events();
    if events.is_empty() {
        return;
    }

    for id in events.destroyed.iter().chain(&events.unscripted) {
        scripts.release_entity(*id);
    }
    if let Some(scene) = editor.scene_mut() {
        for id in events.scripted {
            if let Some(entity) = scene.get_mut(id) {
                scripts.instantiate_entity(entity);
            }
        }
    }
    debug!(registered = scripts.registered_count(), "Script registry synced");
}
