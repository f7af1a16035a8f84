//! Live window host.
//!
//! Nothing is drawn: the window only supplies pointer input. Signals are
//! logged, so run with `RUST_LOG=info` (or `debug`) to follow a gesture.

use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use tactile_engine::coords::Vec2;
use tactile_engine::input::platform::winit::{translate_window_event, TranslateContext};
use tactile_engine::input::InputState;
use tactile_engine::time::{Clock, SystemClock};
use tactile_ui::pannable::{PanConfig, PanSignal, PannableArea, TimerControl, TimerQueue};

use crate::replay::{Scene, VIEWPORT};

pub fn run(config: PanConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

    let clock = Rc::new(SystemClock::new());
    let area = PannableArea::try_new(config, &clock).context("invalid pan configuration")?;
    let mut state = WindowHost {
        clock,
        scene: Scene::rows(60),
        area,
        queue: TimerQueue::new(),
        input: InputState::default(),
        window: None,
    };

    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;
    Ok(())
}

struct WindowHost {
    clock: Rc<SystemClock>,
    scene: Scene,
    area: PannableArea,
    queue: TimerQueue,
    input: InputState,
    window: Option<Window>,
}

impl WindowHost {
    fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    fn sync(&mut self) {
        let now = self.now_ms();
        self.queue.apply(now, self.area.take_timer_requests());
        self.report();
    }

    fn fire_due(&mut self) {
        self.sync();
        let now = self.now_ms();
        while let Some(timer) = self.queue.pop_due(now) {
            if self.area.on_timer(timer.kind) == TimerControl::Continue {
                self.queue.repeat(timer);
            }
            self.sync();
        }
    }

    fn layout(&mut self, window: &Window) {
        let size = window.inner_size().to_logical::<f64>(window.scale_factor());
        self.area.allocate(&self.scene.tree, Vec2::new(size.width, size.height));
    }

    fn report(&mut self) {
        for signal in self.area.take_signals() {
            match signal {
                PanSignal::ValueChanged { .. }
                | PanSignal::OvershootChanged { .. }
                | PanSignal::IndicatorAlpha(_) => log::trace!("{signal:?}"),
                PanSignal::Forward(ev) => log::info!(
                    "{:?} -> '{}' at ({:.0}, {:.0})",
                    ev.kind,
                    self.scene.tree.label(ev.target),
                    ev.x,
                    ev.y
                ),
                other => log::info!("{other:?}"),
            }
        }
    }
}

impl ApplicationHandler for WindowHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("tactile studio")
            .with_inner_size(LogicalSize::new(VIEWPORT.x, VIEWPORT.y));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                self.area.set_child(Some(self.scene.content));
                self.layout(&window);
                self.area.realize();
                self.window = Some(window);
                self.sync();
            }
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.fire_due();

        let flow = match self.queue.next_due() {
            Some((_, due)) => {
                let wait = (due - self.now_ms()).max(0) as u64;
                ControlFlow::WaitUntil(Instant::now() + Duration::from_millis(wait))
            }
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(flow);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                self.area.unrealize();
                self.sync();
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = self.window.take() {
                    self.layout(&window);
                    self.window = Some(window);
                }
            }
            _ => {}
        }

        let Some(window) = &self.window else {
            return;
        };
        let scale = window.scale_factor();
        let mut ctx = TranslateContext::new(scale, self.now_ms() as u32);
        if let Ok(origin) = window.outer_position() {
            let origin = origin.to_logical::<f64>(scale);
            ctx = ctx.with_window_origin(origin.x, origin.y);
        }

        if let Some(ev) = translate_window_event(&ctx, &self.input, &event) {
            self.input.apply_event(&ev);
            self.area.handle_input(&self.scene.tree, &ev);
        }
        self.sync();
    }
}
