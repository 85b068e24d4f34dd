use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window title and initial extent for [`Runtime::run`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            title: "enki".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Owns the event loop and drives one window.
///
/// The window and its GPU context come up on `resumed` and go away on
/// suspend and on exit, with [`App::on_device_lost`](CoreApp::on_device_lost)
/// invoked before each teardown so higher layers drop device-bound
/// state first.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until it asks to exit or the window closes. Blocks
    /// for the life of the event loop.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: CoreApp + 'static,
    {
        let event_loop = EventLoop::new().context("creating the event loop")?;
        let mut host = Host {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
        };
        event_loop
            .run_app(&mut host)
            .context("event loop terminated with an error")?;
        Ok(())
    }
}

/// The window plus everything pinned to its lifetime. [`Gpu`] borrows
/// the window for its surface, hence the self-referencing struct.
#[self_referencing]
struct WindowState {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Host<A: CoreApp + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowState>,
    exit_requested: bool,
}

impl<A: CoreApp + 'static> Host<A> {
    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("creating the window")?;

        let gpu_init = self.gpu_init.clone();
        let state = WindowStateTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("bringing up the GPU for the window")?;

        self.window = Some(state);
        Ok(())
    }

    /// Tears down the window and its GPU context, app first so it can
    /// drop anything device-bound.
    fn close_window(&mut self, why: &str) {
        if let Some(state) = self.window.take() {
            log::debug!("tearing down window and GPU ({why})");
            self.app.on_device_lost();
            drop(state);
        }
    }

    fn exit_now(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(state) = &self.window {
            state.with_window(|w| w.request_redraw());
        }
    }

    /// Runtime handling for one event, after the app has seen it.
    fn handle(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::CloseRequested => {
                self.close_window("close requested");
                AppControl::Exit
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(state) = self.window.as_mut() {
                    let size = state.with_window(|w| w.inner_size());
                    state.with_gpu_mut(|gpu| gpu.resize(size));
                    state.with_window(|w| w.request_redraw());
                }
                AppControl::Continue
            }

            WindowEvent::RedrawRequested => self.run_frame(window_id),

            _ => AppControl::Continue,
        }
    }

    /// Ticks the frame clock and runs `App::on_frame` once.
    fn run_frame(&mut self, window_id: WindowId) -> AppControl {
        // Borrows split by field so the closure can reach `app` while
        // the window state is opened mutably.
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(state) = window.as_mut() else {
            return AppControl::Continue;
        };
        state.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                time: fields.clock.tick(),
            };
            app.on_frame(&mut ctx)
        })
    }
}

impl<A: CoreApp + 'static> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.open_window(event_loop) {
            Ok(()) => self.request_redraw(),
            Err(err) => {
                log::error!("window bring-up failed: {err:#}");
                self.exit_now(event_loop);
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // The surface borrows the window; both go away until the next
        // `resumed` rebuilds them from scratch.
        self.close_window("suspend");
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.close_window("exit");
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);

        // Scenes animate against frame time, so every presented frame
        // schedules the next one.
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let ours = self
            .window
            .as_ref()
            .is_some_and(|state| state.with_window(|w| w.id()) == window_id);
        if !ours {
            return;
        }

        let mut control = self.app.on_window_event(window_id, &event);
        if control == AppControl::Continue {
            control = self.handle(window_id, &event);
        }
        if control == AppControl::Exit {
            self.exit_now(event_loop);
        }
    }
}
