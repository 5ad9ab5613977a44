use std::{backtrace::Backtrace, num::NonZeroUsize, panic, path::PathBuf, process::ExitCode, sync::Arc};

use clap::{Parser, command};
use deskclock_core::{
    adapters::{local_session::LocalSession, system_clock::SystemClock},
    config::{Config, ConfigError, Variant, get_config},
    event_bus::EventBus,
    modules::{ModuleError, clock::Clock, session::Session},
    screen::Shell,
};
use deskclock_gui::{App, get_log_spec};
use flexi_logger::{
    Age, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, LogSpecBuilder, Logger,
    LoggerHandle, Naming,
};
use iced::Font;
use log::{debug, error, warn};
use masterror::Error;
use tokio::runtime::Runtime;

const LOG_DIRECTORY: &str = "/tmp/deskclock";
const WINDOW_SIZE: (f32, f32) = (560.0, 640.0);
const EVENT_BUS_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => panic!("event bus capacity must be non-zero"),
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to start logger: {0}")]
    Logger(#[from] FlexiLoggerError),
    #[error("failed to read config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to assemble modules: {0}")]
    Modules(#[from] ModuleError),
    #[error("window closed with an error: {0}")]
    Gui(#[from] iced::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let logger = match start_logger() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));

    debug!("args: {args:?}");

    match run(args, &logger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logger() -> Result<LoggerHandle, StartupError> {
    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory(LOG_DIRECTORY))
    .duplicate_to_stdout(Duplicate::All)
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    )
    .start()?;

    Ok(logger)
}

fn run(args: Args, logger: &LoggerHandle) -> Result<(), StartupError> {
    let (config, config_path) = get_config(args.config_path)?;
    debug!("Using config {config_path:?}");

    match get_log_spec(&config.log_level) {
        Ok(spec) => logger.set_new_spec(spec),
        Err(err) => warn!("Keeping the default log level, `{}` is invalid: {err}", config.log_level),
    }

    // Hosts the ticker and command tasks; iced drives its own executor for the window.
    let runtime = Runtime::new()?;
    let bus = EventBus::new(EVENT_BUS_CAPACITY);
    let shell = build_shell(&config, &runtime)?;

    let font = match config.appearance.font_name {
        Some(ref font_name) => Font::with_name(Box::leak(font_name.clone().into_boxed_str())),
        None => Font::DEFAULT,
    };

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .scale_factor(App::scale_factor)
        .default_font(font)
        .window_size(WINDOW_SIZE)
        .run_with(App::new((
            config,
            shell,
            bus.sender(),
            runtime.handle().clone(),
            bus.receiver(),
        )))?;

    Ok(())
}

fn build_shell(config: &Config, runtime: &Runtime) -> Result<Shell, ModuleError> {
    let clock = Clock::new(Arc::new(SystemClock::new()), &config.clock);

    let session = match config.variant {
        Variant::Standalone => None,
        Variant::Gated => Some(Session::new(Arc::new(LocalSession::new(
            config.session.clone(),
            runtime.handle().clone(),
        )))),
    };

    Shell::new(config.variant, clock, session)
}
