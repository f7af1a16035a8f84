//! Scripted gestures played against a manual clock.

use anyhow::{Context, Result};

use tactile_engine::coords::{Rect, Vec2};
use tactile_engine::input::{
    InputEvent, Modifiers, MouseWheelDelta, PointerButtonEvent, PointerMoveEvent, Timestamp,
};
use tactile_ui::pannable::{ManualHost, Orientation, PanConfig, PanSignal, PannableArea};
use tactile_ui::surface::{EventMask, SurfaceId, SurfaceTree};

pub const ROW_HEIGHT: f64 = 48.0;
pub const VIEWPORT: Vec2 = Vec2::new(400.0, 600.0);

/// A list of tappable rows.
pub struct Scene {
    pub tree: SurfaceTree,
    pub content: SurfaceId,
    pub rows: Vec<SurfaceId>,
}

impl Scene {
    pub fn rows(count: usize) -> Self {
        let mut tree = SurfaceTree::new();
        let content = tree.insert_root(
            "list",
            Rect::new(0.0, 0.0, VIEWPORT.x, count as f64 * ROW_HEIGHT),
            EventMask::ALL,
        );
        let rows = (0..count)
            .map(|i| {
                tree.add_child(
                    content,
                    format!("row {i}"),
                    Rect::new(0.0, i as f64 * ROW_HEIGHT, VIEWPORT.x, ROW_HEIGHT),
                    EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE | EventMask::CROSSING,
                )
            })
            .collect();
        Self { tree, content, rows }
    }
}

#[derive(Debug, Copy, Clone)]
enum Step {
    Press(f64, f64),
    Move(f64, f64),
    Release(f64, f64),
    Wheel(f64),
    Wait(i64),
    ScrollTo(f64, f64),
    GlideTo(f64, f64),
    Settle,
}

struct Script {
    name: &'static str,
    steps: Vec<Step>,
}

fn scripts() -> Vec<Script> {
    let mut flick = vec![Step::Press(200.0, 500.0)];
    flick.extend((1..=6).map(|i| Step::Move(200.0, 500.0 - i as f64 * 40.0)));
    flick.extend([Step::Release(200.0, 240.0), Step::Settle]);

    vec![
        Script {
            name: "tap row",
            steps: vec![Step::Press(100.0, 130.0), Step::Release(100.0, 130.0), Step::Settle],
        },
        Script { name: "flick up", steps: flick },
        Script {
            name: "pull past top",
            steps: vec![
                Step::ScrollTo(0.0, 0.0),
                Step::Settle,
                Step::Press(200.0, 100.0),
                Step::Move(200.0, 140.0),
                Step::Move(200.0, 200.0),
                Step::Move(200.0, 260.0),
                Step::Wait(80),
                Step::Release(200.0, 260.0),
                Step::Settle,
            ],
        },
        Script {
            name: "wheel",
            steps: vec![Step::Wheel(-1.0), Step::Wheel(-1.0), Step::Wheel(1.0), Step::Settle],
        },
        Script {
            name: "scroll to row 40",
            steps: vec![Step::ScrollTo(-1.0, 40.0 * ROW_HEIGHT), Step::Settle],
        },
        Script {
            name: "glide to row 10",
            steps: vec![Step::GlideTo(-1.0, 10.0 * ROW_HEIGHT), Step::Settle],
        },
    ]
}

/// Plays every script in sequence and prints what the area reported.
pub fn run(config: PanConfig) -> Result<()> {
    let scene = Scene::rows(60);
    let mut host = ManualHost::new(0);
    let mut area = PannableArea::try_new(config, host.clock())
        .context("invalid pan configuration")?
        .on_panning_started(|| false);

    area.set_child(Some(scene.content));
    area.allocate(&scene.tree, VIEWPORT);
    area.realize();
    host.run_until_idle(&mut area, 10_000);
    area.take_signals();

    log::info!("replaying over {} rows", scene.rows.len());

    for script in scripts() {
        play(&script, &scene, &mut host, &mut area)
            .with_context(|| format!("script '{}' did not settle", script.name))?;
    }
    Ok(())
}

fn play(script: &Script, scene: &Scene, host: &mut ManualHost, area: &mut PannableArea) -> Result<()> {
    for step in &script.steps {
        let t = (host.now_ms() + 16) as Timestamp;
        log::debug!("{}: {:?} at {} ms", script.name, step, t);
        match *step {
            Step::Press(x, y) => {
                host.dispatch(area, &scene.tree, &InputEvent::PointerButton(PointerButtonEvent::press(x, y, t)));
            }
            Step::Move(x, y) => {
                host.dispatch(area, &scene.tree, &InputEvent::PointerMoved(PointerMoveEvent::new(x, y, t)));
            }
            Step::Release(x, y) => {
                host.dispatch(area, &scene.tree, &InputEvent::PointerButton(PointerButtonEvent::release(x, y, t)));
            }
            Step::Wheel(y) => {
                let wheel = InputEvent::MouseWheel {
                    delta: MouseWheelDelta::Line { x: 0.0, y },
                    modifiers: Modifiers::default(),
                    time: t,
                };
                host.dispatch(area, &scene.tree, &wheel);
            }
            Step::Wait(ms) => {
                host.advance(area, ms);
            }
            Step::ScrollTo(x, y) => {
                area.scroll_to(x, y);
                host.sync(area);
            }
            Step::GlideTo(x, y) => {
                area.glide_to(x, y);
                host.sync(area);
            }
            Step::Settle => {
                if !host.run_until_idle(area, 30_000) {
                    anyhow::bail!("timers still pending at {} ms", host.now_ms());
                }
            }
        }
    }

    report(script.name, scene, area);
    Ok(())
}

fn report(name: &str, scene: &Scene, area: &mut PannableArea) {
    let signals = area.take_signals();
    let mut moves = 0;
    let mut peak_overshoot = 0;

    for signal in &signals {
        match signal {
            PanSignal::ValueChanged { .. } => moves += 1,
            PanSignal::OvershootChanged { vertical, .. } => {
                peak_overshoot = peak_overshoot.max(vertical.abs());
            }
            PanSignal::Forward(ev) => {
                log::info!(
                    "{name}: {:?} -> '{}' at ({:.0}, {:.0})",
                    ev.kind,
                    scene.tree.label(ev.target),
                    ev.x,
                    ev.y
                );
            }
            PanSignal::IndicatorAlpha(_) => {}
            other => log::info!("{name}: {other:?}"),
        }
    }

    println!(
        "  {:<18} value {:>7.1}  moves {:>3}  peak overshoot {:>3}  overshoot now {:>3}",
        name,
        area.vadjustment().value(),
        moves,
        peak_overshoot,
        area.overshoot(Orientation::Vertical).dist,
    );
}
