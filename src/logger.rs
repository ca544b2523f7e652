//! Logging setup: `<log dir>/concierge.log`, stderr if the file can't be opened.
//! The terminal itself is reserved for the conversation.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::LevelFilter;

pub fn init(log_dir: &Path) {
    let mut builder = env_logger::Builder::new();

    if let Ok(log_level) = std::env::var("RUST_LOG") {
        builder.parse_filters(&log_level);
    } else {
        builder.filter_level(LevelFilter::Info);
    }

    // [HH:MM:SS LEVEL] target - message
    builder.format(|buf, record| {
        let now = chrono::Local::now().format("%H:%M:%S");
        writeln!(
            buf,
            "[{} {}] {} - {}",
            now,
            record.level(),
            record.target(),
            record.args()
        )
    });

    let file = std::fs::create_dir_all(log_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("concierge.log"))
    });

    let fallback = match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            None
        }
        Err(e) => {
            builder.target(env_logger::Target::Stderr);
            Some(e)
        }
    };

    if builder.try_init().is_err() {
        return;
    }

    match fallback {
        None => log::info!("logging to {}", log_dir.join("concierge.log").display()),
        Some(e) => log::warn!(
            "cannot open log file in {}: {}, logging to stderr",
            log_dir.display(),
            e
        ),
    }
}
