use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use error_iter::ErrorIter as _;
use log::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use retro_vga::surface::PixelsSurface;
use retro_vga::{Font, Mode, ModeTable, Surface, Vga, VgaError};

use crate::demos::{Demo, DemoKind};

mod demos;

const TITLE: &str = "retro-vga";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Pixels,
    Sdl,
}

/// Indexed-color VGA display emulator demos.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Video mode, defaults to the demo's own mode
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Window scale factor
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=8))]
    scale: u32,

    /// Raw 256-glyph font ROM dump to load after the mode is set
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Treat the font as 9 pixels wide
    #[arg(long, requires = "font")]
    wide: bool,

    /// Presentation backend
    #[arg(short, long, value_enum, default_value_t = Backend::Pixels)]
    backend: Backend,

    /// Demo program to run
    #[arg(value_enum)]
    demo: DemoKind,
}

impl Cli {
    fn mode(&self) -> Mode {
        match self.mode {
            Some(mode) if self.demo.needs_256_colors() && mode != Mode::Vga13h => {
                warn!("{:?} demo runs in mode 13h, ignoring --mode {mode}", self.demo);
                Mode::Vga13h
            }
            Some(mode) => mode,
            None => self.demo.default_mode(),
        }
    }
}

#[derive(Debug)]
enum AppError {
    Vga(VgaError),
    EventLoop(EventLoopError),
    Window(OsError),
    Font(PathBuf, std::io::Error),
    Sdl(String),
    Unsupported(&'static str),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Vga(_) => write!(f, "display device error"),
            AppError::EventLoop(_) => write!(f, "event loop error"),
            AppError::Window(_) => write!(f, "could not open window"),
            AppError::Font(path, _) => write!(f, "could not read font {}", path.display()),
            AppError::Sdl(msg) => write!(f, "SDL error: {msg}"),
            AppError::Unsupported(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Vga(err) => Some(err),
            AppError::EventLoop(err) => Some(err),
            AppError::Window(err) => Some(err),
            AppError::Font(_, err) => Some(err),
            AppError::Sdl(_) | AppError::Unsupported(_) => None,
        }
    }
}

impl From<VgaError> for AppError {
    fn from(err: VgaError) -> Self {
        AppError::Vga(err)
    }
}

impl From<EventLoopError> for AppError {
    fn from(err: EventLoopError) -> Self {
        AppError::EventLoop(err)
    }
}

impl From<OsError> for AppError {
    fn from(err: OsError) -> Self {
        AppError::Window(err)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.backend {
        Backend::Pixels => run_pixels(&cli),
        Backend::Sdl => run_sdl(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error(TITLE, err);
            ExitCode::FAILURE
        }
    }
}

/// Loads the optional font, then lets the demo draw its first frame.
fn prepare<S: Surface>(cli: &Cli, vga: &mut Vga<S>, demo: &mut dyn Demo<S>) -> Result<(), AppError> {
    if let Some(path) = &cli.font {
        let bytes = std::fs::read(path).map_err(|err| AppError::Font(path.clone(), err))?;
        let width = if cli.wide { 9 } else { 8 };
        let height = bytes.len() / 256;
        info!("loading {width}x{height} font from {}", path.display());
        vga.set_font(Font::new(bytes, width, height)?)?;
    }
    demo.setup(vga)?;
    Ok(())
}

fn window_size(cli: &Cli, mode: Mode) -> Result<(u32, u32), AppError> {
    let modes = ModeTable::default();
    let info = modes.lookup(mode)?;
    Ok((info.width as u32 * cli.scale, info.height as u32 * cli.scale))
}

fn run_pixels(cli: &Cli) -> Result<(), AppError> {
    let mode = cli.mode();
    let (width, height) = window_size(cli, mode)?;

    let event_loop = EventLoop::new()?;
    let mut input = WinitInputHelper::new();
    let window = {
        let size = LogicalSize::new(width as f64, height as f64);
        WindowBuilder::new()
            .with_title(TITLE)
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    };

    let mut vga = Vga::new(PixelsSurface::new(&window), mode)?;
    let mut demo = cli.demo.build();
    prepare(cli, &mut vga, demo.as_mut())?;
    info!("running {:?} in mode {mode}", cli.demo);

    let mut failure = None;
    event_loop.run(|event, elwt| {
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = event
        {
            if let Err(err) = demo.update(&mut vga).and_then(|()| vga.show()) {
                failure = Some(err);
                elwt.exit();
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(KeyCode::Escape) || input.close_requested() {
                elwt.exit();
                return;
            }

            if let Some(size) = input.window_resized() {
                if let Some(pixels) = vga.texture_mut() {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        failure = Some(VgaError::PresentFailed(err.to_string()));
                        elwt.exit();
                        return;
                    }
                }
            }

            window.request_redraw();
        }
    })?;

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[cfg(feature = "sdl")]
fn run_sdl(cli: &Cli) -> Result<(), AppError> {
    use retro_vga::surface::SdlSurface;
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;

    let mode = cli.mode();
    let (width, height) = window_size(cli, mode)?;

    let sdl = sdl2::init().map_err(AppError::Sdl)?;
    let video = sdl.video().map_err(AppError::Sdl)?;
    let surface = SdlSurface::new(&video, TITLE, width, height)?;

    let mut vga = Vga::new(surface, mode)?;
    let mut demo = cli.demo.build();
    prepare(cli, &mut vga, demo.as_mut())?;
    info!("running {:?} in mode {mode}", cli.demo);

    let mut event_pump = sdl.event_pump().map_err(AppError::Sdl)?;
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                _ => {}
            }
        }

        demo.update(&mut vga)?;
        vga.show()?;
    }
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn run_sdl(_cli: &Cli) -> Result<(), AppError> {
    Err(AppError::Unsupported(
        "the sdl backend needs a build with `--features sdl`",
    ))
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
