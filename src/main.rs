//! glowfolio CLI
//!
//! ```text
//! glowfolio                      # fullscreen, scroll with the arrow keys
//! glowfolio --inline             # print the settled page once
//! glowfolio --scene builtin://grid
//! glowfolio --no-scene           # placeholder only, nothing is fetched
//! ```

use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::terminal;

use glowfolio::error::{FolioError, FolioResult};
use glowfolio::input::{apply_action, poll_action, Flow, PageAction};
use glowfolio::pipeline::{
    detect_viewport_size, mount, reveal_all, scroll_offset, viewport_height, MountHandle,
    MountOptions,
};
use glowfolio::renderer::{restore_terminal, InlineRenderer, LineDiffRenderer};
use glowfolio::scene::{
    BuiltinSceneSource, Capability, FileSceneSource, Interactive, LazyScene, NonInteractive,
    RouterSceneSource, TerminalCapability,
};
use glowfolio::site::{page, ContactForm, Gallery, HeroScene, PageProps};
use glowfolio::telemetry::{init_tracing, install_panic_hook};
use glowfolio::types::RenderMode;
use glowfolio::SiteConfig;

/// Ticks run before an inline page is printed, enough for the scene to load
/// and draw.
const INLINE_SETTLE_TICKS: usize = 3;

/// Reactive terminal portfolio
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file
    #[arg(short, long, env = "GLOWFOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Print the page once instead of running fullscreen
    #[arg(long)]
    inline: bool,

    /// Never load the hero scene
    #[arg(long)]
    no_scene: bool,

    /// Scene url (builtin://orb, builtin://grid, file://scene.json)
    #[arg(long)]
    scene: Option<String>,

    /// Page width for inline output (default: terminal width)
    #[arg(long)]
    width: Option<u16>,

    /// Inline output without colors
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<(), FolioError> {
    let args = Args::parse();

    let mut config = SiteConfig::load_or_default(args.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(url) = &args.scene {
        config.scene_url = url.clone();
    }
    if args.inline {
        config.render_mode = RenderMode::Inline;
    }

    let _ = init_tracing(config.log_filter.as_deref());
    tracing::info!(scene = %config.scene_url, mode = ?config.render_mode, "starting");

    let props = page_props(&config, args.no_scene);
    match config.render_mode {
        RenderMode::Inline => {
            install_panic_hook(|| {});
            run_inline(props, args.width, !args.plain)
        }
        RenderMode::Fullscreen => {
            install_panic_hook(|| {
                let _ = restore_terminal();
            });
            run_fullscreen(props, config.tick_ms)
        }
    }
}

fn page_props(config: &SiteConfig, no_scene: bool) -> PageProps {
    let capability: Rc<dyn Capability> = match (no_scene, config.interactive) {
        (true, _) | (false, Some(false)) => Rc::new(NonInteractive),
        (false, Some(true)) => Rc::new(Interactive),
        (false, None) => Rc::new(TerminalCapability),
    };

    let source = RouterSceneSource::new()
        .route("builtin", BuiltinSceneSource)
        .route(
            "file",
            FileSceneSource {
                base_dir: config.scene_dir.clone(),
            },
        );
    let lazy = LazyScene::new(Rc::new(source), config.scene_url.clone());
    let scene = HeroScene::new(lazy, capability, config.scene_rows);

    PageProps::new(config.content.clone(), config.palette(), scene)
}

// =============================================================================
// Inline
// =============================================================================

fn run_inline(props: PageProps, width: Option<u16>, styled: bool) -> FolioResult<()> {
    let (term_width, term_height) = detect_viewport_size();
    let size = (width.unwrap_or(term_width), term_height);

    let mut handle = mount(move || page(props), MountOptions { size: Some(size) });
    handle.settle(INLINE_SETTLE_TICKS);
    reveal_all();
    let frame = handle.refresh();

    InlineRenderer::stdout(styled).render(&frame)?;
    handle.unmount();
    Ok(())
}

// =============================================================================
// Fullscreen
// =============================================================================

fn run_fullscreen(props: PageProps, tick_ms: u64) -> FolioResult<()> {
    detect_viewport_size();
    let form = props.form.clone();
    let gallery = props.gallery.clone();

    let mut handle = mount(move || page(props), MountOptions::default());
    let mut renderer = LineDiffRenderer::stdout();

    terminal::enable_raw_mode()?;
    let result = renderer
        .enter_fullscreen()
        .map_err(FolioError::from)
        .and_then(|()| {
            event_loop(&mut handle, &mut renderer, &form, &gallery, tick_ms)
        });

    let restored = renderer.exit_fullscreen().and(terminal::disable_raw_mode());
    handle.unmount();

    result?;
    restored?;
    Ok(())
}

fn event_loop(
    handle: &mut MountHandle,
    renderer: &mut LineDiffRenderer,
    form: &ContactForm,
    gallery: &Gallery,
    tick_ms: u64,
) -> FolioResult<()> {
    let tick = Duration::from_millis(tick_ms.max(1));
    let mut last_tick = Instant::now();
    let mut frame = handle.tick();
    renderer.render(&frame, scroll_offset(), viewport_height())?;

    loop {
        let timeout = tick.saturating_sub(last_tick.elapsed());
        let editing = form.focused().is_some();

        if let Some(action) = poll_action(timeout, editing)? {
            match apply_action(action, &frame, viewport_height(), form, gallery) {
                Flow::Quit => return Ok(()),
                Flow::Idle => {}
                Flow::Redraw => {
                    if matches!(action, PageAction::Resize(..)) {
                        renderer.invalidate();
                    }
                    frame = handle.refresh();
                    renderer.render(&frame, scroll_offset(), viewport_height())?;
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            frame = handle.tick();
            renderer.render(&frame, scroll_offset(), viewport_height())?;
        }
    }
}
