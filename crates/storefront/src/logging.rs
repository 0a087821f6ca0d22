//! Log subscriber setup.
//!
//! Events are formatted by `tracing-subscriber` without timestamps (the
//! browser clock is not available to `std::time`) or ANSI colours. In the
//! browser each formatted event goes to the `console` method matching its
//! level; natively they go to stderr.

use tracing_subscriber::EnvFilter;

use crate::config::StorefrontConfig;

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed, which happens when
/// the app is mounted more than once on the same page.
pub fn init(config: &StorefrontConfig) -> bool {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("xcommerce_storefront=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_ansi(false);

    #[cfg(target_arch = "wasm32")]
    let builder = builder.with_writer(console::ConsoleMakeWriter);

    builder.try_init().is_ok()
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;

    /// Creates a [`ConsoleWriter`] per event.
    pub struct ConsoleMakeWriter;

    /// Buffers one formatted event and emits it on drop.
    pub struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end().to_string();
            if line.is_empty() {
                return;
            }

            match self.level {
                Level::ERROR => gloo::console::error!(line),
                Level::WARN => gloo::console::warn!(line),
                Level::INFO => gloo::console::info!(line),
                _ => gloo::console::debug!(line),
            }
        }
    }

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buf: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buf: Vec::new(),
            }
        }
    }
}
