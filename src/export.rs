//! Frame export as an SVG image sequence.
//!
//! While recording, every rendered frame's draw list is serialized to SVG
//! and written on the IO task pool so the frame loop never waits on disk.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task};
use thiserror::Error;

use crate::constellation::Constellation;
use crate::render::drawable::{Drawable, Primitive};
use crate::simulation::{AdvanceFrameSet, Simulation};
use crate::types::{LabelPlacement, Rgb};

/// Directory frames are written to unless configured otherwise.
pub const DEFAULT_EXPORT_DIR: &str = "frames";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write frame {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Serialize a painted frame to SVG, keeping the draw list's order.
pub fn render_svg(drawables: &[Drawable], constellation: &Constellation, viewport: DVec2) -> String {
    let mut svg = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = viewport.x,
        h = viewport.y
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="black"/>"#);

    for drawable in drawables {
        let Some(body) = constellation.body(drawable.body) else {
            continue;
        };
        let colour = hex(body.colour);
        let _ = match drawable.primitive {
            Primitive::Image { center, radius } => writeln!(
                svg,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{colour}"/>"#,
                center.x, center.y, radius
            ),
            Primitive::Line { start, end } => writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{colour}" stroke-width="1"/>"#,
                start.x, start.y, end.x, end.y
            ),
            Primitive::Label { anchor, placement } => {
                let (text_anchor, baseline) = match placement {
                    LabelPlacement::BottomRight => ("start", "hanging"),
                    LabelPlacement::TopLeft => ("end", "auto"),
                };
                writeln!(
                    svg,
                    r##"<text x="{:.2}" y="{:.2}" text-anchor="{text_anchor}" dominant-baseline="{baseline}" fill="#dcdcdc" font-size="13">{}</text>"##,
                    anchor.x,
                    anchor.y,
                    escape_xml(&body.name)
                )
            }
        };
    }
    svg.push_str("</svg>\n");
    svg
}

/// File name of the `index`-th exported frame.
pub fn frame_path(directory: &Path, index: u64) -> PathBuf {
    directory.join(format!("frame_{index:06}.svg"))
}

/// Write one frame, creating the directory if needed.
pub fn write_frame(path: &Path, contents: &str) -> Result<(), ExportError> {
    let io = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io)?;
    }
    std::fs::write(path, contents).map_err(io)
}

/// Recording state and in-flight frame writes.
#[derive(Resource)]
pub struct ExportQueue {
    directory: PathBuf,
    recording: bool,
    next_frame: u64,
    written: u64,
    pending: Vec<Task<Result<PathBuf, ExportError>>>,
}

impl Default for ExportQueue {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_DIR)
    }
}

impl ExportQueue {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            recording: false,
            next_frame: 0,
            written: 0,
            pending: Vec::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Frames written successfully so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn start(&mut self) {
        self.recording = true;
        info!("Recording frames to {}", self.directory.display());
    }

    pub fn stop(&mut self) {
        self.recording = false;
        info!("Recording stopped after {} frames", self.next_frame);
    }

    pub fn toggle_recording(&mut self) {
        if self.recording {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Stop recording and drop frames not yet written.
    pub fn cancel(&mut self) {
        let dropped = self.pending.len();
        self.recording = false;
        // Dropping a task cancels it.
        self.pending.clear();
        warn!("Export cancelled, {dropped} frames discarded");
    }

    /// Reserve the path for the next frame.
    fn next_path(&mut self) -> PathBuf {
        let path = frame_path(&self.directory, self.next_frame);
        self.next_frame += 1;
        path
    }
}

/// Plugin recording frames while [`ExportQueue`] is recording.
pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExportQueue>().add_systems(
            Update,
            (
                capture_frame.run_if(resource_exists::<Simulation>),
                poll_exports,
            )
                .chain()
                .after(AdvanceFrameSet),
        );
    }
}

fn capture_frame(mut queue: ResMut<ExportQueue>, simulation: Res<Simulation>) {
    if !queue.recording {
        return;
    }
    let svg = render_svg(
        simulation.draw_list(),
        &simulation.constellation,
        simulation.camera.viewport(),
    );
    let path = queue.next_path();
    let task = IoTaskPool::get().spawn(async move {
        write_frame(&path, &svg)?;
        Ok(path)
    });
    queue.pending.push(task);
}

fn poll_exports(mut queue: ResMut<ExportQueue>) {
    let mut written = 0;
    queue.pending.retain_mut(|task| match block_on(future::poll_once(task)) {
        None => true,
        Some(Ok(path)) => {
            debug!("Wrote {}", path.display());
            written += 1;
            false
        }
        Some(Err(err)) => {
            error!("{err}");
            false
        }
    });
    queue.written += written;
}
