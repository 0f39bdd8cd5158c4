use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use tokio::sync::mpsc;

use crate::core::constants::messages;
use crate::core::types::ProgressEvent;

/// How progress is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// indicatif bar on stderr
    Bar,
    /// `\rProgress: (current/total)` written to stderr
    Plain,
    /// Nothing is drawn, events are still drained
    Hidden,
}

impl ProgressMode {
    /// Pick a mode for the current stderr: a bar on terminals, a plain line otherwise
    pub fn detect(enabled: bool) -> Self {
        if !enabled {
            ProgressMode::Hidden
        } else if atty::is(atty::Stream::Stderr) {
            ProgressMode::Bar
        } else {
            ProgressMode::Plain
        }
    }
}

enum Renderer {
    Bar(ProgressBar),
    Plain(Box<dyn Write + Send>),
    Hidden,
}

/// Renders the global completion count as a single line updated in place.
pub struct ProgressReporter {
    total: usize,
    current: usize,
    renderer: Renderer,
}

/// The progress line for `current` of `total`, starting with a carriage return
pub fn render_line(current: usize, total: usize) -> String {
    format!("\r{}: ({current}/{total})", messages::PROGRESS_PREFIX)
}

impl ProgressReporter {
    pub fn new(mode: ProgressMode, total: usize) -> Self {
        let renderer = match mode {
            ProgressMode::Bar => Renderer::Bar(Self::create_bar(total)),
            ProgressMode::Plain => Renderer::Plain(Box::new(io::stderr())),
            ProgressMode::Hidden => Renderer::Hidden,
        };

        Self {
            total,
            current: 0,
            renderer,
        }
    }

    /// Plain reporter drawing into an arbitrary writer
    pub fn with_writer(total: usize, writer: Box<dyn Write + Send>) -> Self {
        Self {
            total,
            current: 0,
            renderer: Renderer::Plain(writer),
        }
    }

    fn create_bar(total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{prefix}: ({pos}/{len}) [{elapsed_precise}] [{bar:40.cyan/blue}] ({eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_prefix(messages::PROGRESS_PREFIX);
        pb
    }

    /// Handle to the bar, if one is drawn, so other output can be printed around it
    pub fn bar(&self) -> Option<ProgressBar> {
        match self.renderer {
            Renderer::Bar(ref pb) => Some(pb.clone()),
            _ => None,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Apply one event. Stale counts that arrive late are ignored so the display never goes back.
    pub fn update(&mut self, event: ProgressEvent) {
        if event.completed <= self.current {
            return;
        }
        self.current = event.completed;
        self.draw();
    }

    fn draw(&mut self) {
        match self.renderer {
            Renderer::Bar(ref pb) => pb.set_position(self.current as u64),
            Renderer::Plain(ref mut writer) => {
                // A broken stderr must not take the scan down with it
                let _ = write!(writer, "{}", render_line(self.current, self.total));
                let _ = writer.flush();
            }
            Renderer::Hidden => {}
        }
    }

    /// Terminate the progress line and return the last count shown
    pub fn finish(mut self) -> usize {
        match self.renderer {
            Renderer::Bar(ref pb) => pb.finish(),
            Renderer::Plain(ref mut writer) => {
                let _ = writeln!(writer);
                let _ = writer.flush();
            }
            Renderer::Hidden => {}
        }
        self.current
    }

    /// Consume events until every sender is gone, then finish the line
    pub async fn run(mut self, mut events: mpsc::Receiver<ProgressEvent>) -> usize {
        self.draw();
        while let Some(event) = events.recv().await {
            self.update(event);
        }
        self.finish()
    }
}
