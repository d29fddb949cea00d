mod cli;
mod script;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use herald_common::{
    default_voice, ConfigError, Event, EventBus, HeraldError, NotificationLevel, SpeechEngine,
};
use herald_config::{config_to_json, toml_loader, HeraldConfig, MessageKey, ReloadManager};
use herald_platform::{ConsoleSpeechEngine, SystemSpeechEngine};
use herald_social::{Announcement, Announcer, InMemoryHost, VoiceEvents};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use cli::{Args, Command, ListenOpts, ReplayOpts};

const DEFAULT_LOG_DIRECTIVE: &str = "herald=info";

fn main() {
    let args = cli::parse();

    // Config is read before logging so its [logging] level can apply; any
    // failure is reported once the subscriber is up.
    let (config, config_error) = match load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (HeraldConfig::default(), Some(e)),
    };

    init_logging(
        args.log_level
            .as_deref()
            .unwrap_or(config.logging.level.as_directive()),
    );
    info!("Herald v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        info!("Using config override: {}", path.display());
    }
    if let Some(e) = config_error {
        warn!("Config load failed, using defaults: {e}");
    }

    if let Err(e) = run(args, config) {
        error!("{e}");
        eprintln!("herald: {e}");
        std::process::exit(1);
    }
}

fn init_logging(directive: &str) {
    let directive: Directive = directive
        .parse()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse())
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<HeraldConfig, ConfigError> {
    match path {
        Some(path) => herald_config::load_config_from(path),
        None => herald_config::load_config(),
    }
}

fn run(args: Args, config: HeraldConfig) -> Result<(), HeraldError> {
    match args.command {
        Command::Replay(opts) => replay(&opts, config),
        Command::Listen(opts) => {
            let path = match args.config {
                Some(path) => path,
                None => toml_loader::default_config_path()?,
            };
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(listen(&opts, path))
        }
        Command::Voices => {
            list_voices();
            Ok(())
        }
        Command::Test { message } => test_message(&message, &config),
        Command::Config => {
            println!("{}", config_to_json(&config));
            Ok(())
        }
    }
}

fn speech_engine(dry_run: bool) -> Arc<dyn SpeechEngine> {
    let system = SystemSpeechEngine::new();
    if dry_run {
        Arc::new(ConsoleSpeechEngine::with_voices(system.list_voices()))
    } else {
        Arc::new(system)
    }
}

fn replay(opts: &ReplayOpts, config: HeraldConfig) -> Result<(), HeraldError> {
    let script = script::load_script(&opts.script)?;
    info!(
        script = %opts.script.display(),
        steps = script.steps.len(),
        "replaying session"
    );

    let host = Arc::new(InMemoryHost::from_seed(script.host));
    let bus = Arc::new(EventBus::new());
    let service = VoiceEvents::new(host.clone(), bus.clone(), speech_engine(opts.dry_run), config);
    service.start();

    for step in &script.steps {
        let update = host.apply(step);
        let handlers = bus.publish(Event::VoiceStateUpdate(update));
        debug!(handlers, "step dispatched");
    }

    report_diagnostics(&service);
    service.stop();
    info!("replay finished");
    Ok(())
}

async fn listen(opts: &ListenOpts, config_path: PathBuf) -> Result<(), HeraldError> {
    let (config, mut config_rx) = ReloadManager::start(config_path).await;

    let host = match &opts.seed {
        Some(path) => InMemoryHost::from_seed(script::load_script(path)?.host),
        None => InMemoryHost::new(opts.local_user.as_str()),
    };
    let host = Arc::new(host);
    let bus = Arc::new(EventBus::new());
    let service = VoiceEvents::new(host.clone(), bus.clone(), speech_engine(opts.dry_run), config);
    service.start();
    info!("listening for presence steps on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut reloading = true;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                match script::parse_step(&line) {
                    Some(Ok(step)) => {
                        let update = host.apply(&step);
                        bus.publish(Event::VoiceStateUpdate(update));
                        report_diagnostics(&service);
                    }
                    Some(Err(e)) => warn!("{e}"),
                    None => {}
                }
            }
            changed = config_rx.changed(), if reloading => {
                if changed.is_err() {
                    warn!("config reload stopped, keeping current settings");
                    reloading = false;
                    continue;
                }
                let config = config_rx.borrow_and_update().clone();
                service.update_settings(config);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    service.stop();
    Ok(())
}

fn list_voices() {
    let engine = SystemSpeechEngine::new();
    let voices = engine.list_voices();
    if voices.is_empty() {
        println!("no speech voices available");
        return;
    }

    let default = default_voice(&voices).map(|v| v.name.clone());
    for voice in &voices {
        let marker = if Some(&voice.name) == default.as_ref() {
            " (default)"
        } else {
            ""
        };
        println!("{} [{}]{marker}", voice.name, voice.lang);
    }
}

fn test_message(message: &str, config: &HeraldConfig) -> Result<(), HeraldError> {
    let key: MessageKey = message
        .parse()
        .map_err(|e: herald_config::schema::UnknownMessageKey| HeraldError::Other(e.to_string()))?;

    let mut announcer = Announcer::new(Arc::new(SystemSpeechEngine::new()));
    announcer.check_voices();
    let result = announcer.preview(key, config);
    for n in announcer.diagnostics().drain() {
        eprintln!("{}: {}", n.title, n.body);
    }

    match result {
        Announcement::Spoken(text) => {
            println!("{text}");
            Ok(())
        }
        Announcement::Dropped(text) => Err(HeraldError::Other(format!("could not speak \"{text}\""))),
        Announcement::Suppressed => Ok(()),
    }
}

fn report_diagnostics(service: &VoiceEvents) {
    for n in service.diagnostics() {
        let level = match n.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        eprintln!("[{level}] {}: {}", n.title, n.body);
    }
}
