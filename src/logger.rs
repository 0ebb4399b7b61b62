use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::LazyLock;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose debug output drowns ours unless verbose logging is on
const NOISY_TARGETS: &[&str] = &["reqwest", "hyper", "h2", "rustls", "want", "mio", "tokio_retry"];

struct PineIrisLogger;

#[derive(Default)]
struct LoggerState {
    enabled: bool,
    to_stdout: bool,
    verbose: bool,
    file: Option<File>,
}

static LOGGER: PineIrisLogger = PineIrisLogger;
static STATE: LazyLock<Mutex<LoggerState>> = LazyLock::new(|| Mutex::new(LoggerState::default()));

fn write_to_file(buf: &[u8]) {
    if let Some(file) = STATE.lock().file.as_mut() {
        let _ = file.write_all(buf);
        let _ = file.flush();
    }
}

/// Tracing writer that only targets the log file
#[derive(Clone)]
struct FileWriter;

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        write_to_file(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = STATE.lock().file.as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for FileWriter {
    type Writer = FileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriter
    }
}

fn target_allowed(target: &str, verbose: bool) -> bool {
    if target.starts_with("pine_iris") || verbose {
        return true;
    }
    !NOISY_TARGETS.iter().any(|noisy| target.starts_with(noisy))
}

impl log::Log for PineIrisLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let state = STATE.lock();
        state.enabled
            && metadata.level() <= Level::Debug
            && target_allowed(metadata.target(), state.verbose)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format!(
            "{} {} [{}] - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );

        write_to_file(message.as_bytes());
        if STATE.lock().to_stdout {
            print!("{message}");
        }
    }

    fn flush(&self) {}
}

/// Initialize unified logging system supporting both log and tracing.
///
/// Stdout logging starts disabled: the tool layer may be speaking a protocol
/// over stdout. Call [`set_log_to_stdout`] to opt in.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::{Once, OnceLock};
    static INIT: Once = Once::new();
    static INIT_RESULT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.call_once(|| {
        let verbose_from_env = std::env::var("PINE_IRIS_VERBOSE").is_ok()
            || std::env::var("RUST_LOG").is_ok_and(|v| v.contains("debug") || v.contains("trace"));

        set_verbose_logging(verbose_from_env);
        enable_logging();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "pine_iris=debug,warn".into());

        let fmt_layer = fmt::Layer::new()
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(FileWriter);

        let tracing_result = Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();

        let log_result = log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug));

        // Either backend on its own is enough; only fail when both are taken
        let result = match (tracing_result, log_result) {
            (Err(tracing_err), Err(log_err)) => Err(format!(
                "Failed to initialize logging: tracing={tracing_err}, log={log_err}"
            )),
            _ => Ok(()),
        };

        let _ = INIT_RESULT.set(result);
    });

    match INIT_RESULT.get() {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => Err(e.clone().into()),
        None => Err("Initialization failed unexpectedly".into()),
    }
}

pub fn enable_logging() {
    STATE.lock().enabled = true;
}

pub fn disable_logging() {
    STATE.lock().enabled = false;
}

pub fn set_verbose_logging(enabled: bool) {
    STATE.lock().verbose = enabled;
}

pub fn set_log_file(file_path: &str) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;

    STATE.lock().file = Some(file);
    Ok(())
}

pub fn set_log_to_stdout(enabled: bool) {
    STATE.lock().to_stdout = enabled;
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}
