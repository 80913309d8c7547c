//! Terminal Typing Rain runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. Logs go to a
//! file in the data directory; the terminal belongs to the game.

use std::fs::{self, OpenOptions};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use typing_rain::app::{App, Flow};
use typing_rain::core::{GameSnapshot, Phase};
use typing_rain::session::{AppConfig, FrameTime, Session, SoundSink, TerminalBell};
use typing_rain::store::{FileStore, KeyValueStore, MemoryStore};
use typing_rain::term::{
    playfield_for, FrameBuffer, GameView, RedrawGate, Screen, TerminalRenderer, Viewport,
};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config);
    info!("typing-rain starting (data dir {})", config.data_dir.display());

    let store = open_store(&config);
    let mut session = Session::new(
        store,
        TerminalBell::stdout(),
        config.seed_or_time(),
        config.frame_period(),
        FrameTime::now().wall_ms,
    );
    session.set_muted(config.mute);
    if let Some(request) = config.premium {
        session.apply_premium_request(request, FrameTime::now().wall_ms);
    }
    let mut app = App::new(session);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("typing-rain exiting");
    result
}

fn init_logging(config: &AppConfig) {
    if fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
    else {
        return;
    };
    let _ = env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn open_store(config: &AppConfig) -> Box<dyn KeyValueStore> {
    match FileStore::open_in(&config.data_dir) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("storage unavailable, progress will not be saved: {err}");
            Box::new(MemoryStore::new())
        }
    }
}

fn run<K: KeyValueStore, S: SoundSink>(
    term: &mut TerminalRenderer,
    app: &mut App<K, S>,
) -> Result<()> {
    let view = GameView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut gate = RedrawGate::default();
    let idle_wait = Duration::from_millis(RedrawGate::DEFAULT_INTERVAL_MS);

    loop {
        let now = FrameTime::now();
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        app.session_mut().frame(now, playfield_for(viewport));

        let session = app.session();
        let animating = session.phase() == Phase::Playing;
        if gate.should_render(now.wall_ms, session.revision(), animating) {
            session.snapshot_into(&mut snap);
            let screen = Screen {
                snapshot: &snap,
                options: session.options(),
                premium: session.premium_active(now.wall_ms),
                level_up_banner: session.level_up_banner(now.wall_ms),
            };
            view.render_into(&screen, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        let timeout = session.next_wakeup(now).unwrap_or(idle_wait);
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key, FrameTime::now()) == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                gate.invalidate();
            }
            _ => {}
        }
    }
}
