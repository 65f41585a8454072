use ansi_term::Color::{Blue, Cyan, Green, Red, Yellow};
use hearmeout_util::clock::format_now;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct CommonLogger;

static LOGGER: CommonLogger = CommonLogger;

impl CommonLogger {
    /// Installs the logger as the global `log` backend.
    pub fn install(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }
}

fn colored_level(level: Level) -> ansi_term::Colour {
    match level {
        Level::Error => Red,
        Level::Warn => Yellow,
        Level::Info => Green,
        Level::Debug => Blue,
        Level::Trace => Cyan,
    }
}

impl Log for CommonLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let formatted_date = format_now().unwrap_or("unknown".to_string());
        let line = format!(
            "[{}][{:>5}][{:>14}]: {} [{}:{}]",
            Cyan.paint(formatted_date),
            Yellow.paint(std::thread::current().name().unwrap_or("main")),
            colored_level(record.level()).paint(record.level().to_string()),
            record.args(),
            Green.paint(record.file().unwrap_or("unknown")),
            Green.paint(record.line().unwrap_or(0).to_string())
        );

        if record.level() <= Level::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn flush(&self) {}
}
