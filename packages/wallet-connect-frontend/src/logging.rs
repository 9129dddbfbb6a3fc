//! Routes `tracing` events from the wallet crates to the browser console.

use crate::console::{self, console_error};
use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    Error,
    Warn,
    Log,
}

fn sink_for(level: Level) -> Sink {
    if level == Level::ERROR {
        Sink::Error
    } else if level == Level::WARN {
        Sink::Warn
    } else {
        Sink::Log
    }
}

/// Buffers one formatted event and hands it to the console when dropped.
struct ConsoleWriter {
    sink: Sink,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        match self.sink {
            Sink::Error => console::error(line),
            Sink::Warn => console::warn(line),
            Sink::Log => console::log(line),
        }
    }
}

struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { sink: Sink::Log, buffer: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter { sink: sink_for(*meta.level()), buffer: Vec::new() }
    }
}

/// Installs the global subscriber. The clock is left out: `SystemTime` is not
/// available on wasm32.
pub(crate) fn init(max_level: Level) {
    let res = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(Console)
        .with_ansi(false)
        .without_time()
        .try_init();
    if let Err(e) = res {
        console_error!("failed to install logger: {}", e);
    }
}
