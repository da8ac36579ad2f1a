use egui::{pos2, vec2, Color32, Pos2, Rect, Stroke, Vec2};

use crate::{geometry, Theme};

mod canvas;
pub use canvas::{Canvas, PainterCanvas};

#[cfg(test)]
pub use canvas::{Op, Recorder};

mod display;
pub use display::{Metrics, Screen, Viewport};

pub const PLACEHOLDER: &str = "Add names";

const LABEL_RADIUS: f32 = 0.6;
const LABEL_WIDTH: f32 = 0.5;
const LINE_HEIGHT: f32 = 1.2;
const HUB_RADIUS: f32 = 0.16;
const RING_GAP: f32 = 10.0;
// wedges are filled in convex pieces no wider than this
const MAX_PIECE: f64 = 90.0;
const ARC_STEP: f64 = 4.0;

const HUB_FILL: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);
const POINTER_FILL: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

/// What a single frame needs to know about the wheel.
#[derive(Copy, Clone, Debug)]
pub struct Snapshot<'a> {
    pub entries: &'a [String],
    pub rotation: f64,
    pub theme: &'a Theme,
    pub padding: f64,
    pub pointer_angle: f64,
    pub highlight: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Renderer {
    metrics: Metrics,
}

impl Renderer {
    pub fn new(screen: &impl Screen) -> Self {
        Self {
            metrics: Metrics::derive(screen),
        }
    }

    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Re-derives the metrics if the size or density changed.
    pub fn refresh(&mut self, screen: &impl Screen) -> bool {
        let metrics = Metrics::derive(screen);
        if metrics == self.metrics {
            return false;
        }

        log::trace!(
            "wheel surface is now {}x{} device px ({} ppp)",
            metrics.device_size[0],
            metrics.device_size[1],
            metrics.viewport.pixels_per_point
        );
        self.metrics = metrics;
        true
    }

    pub fn paint(&self, snapshot: &Snapshot<'_>, canvas: &mut impl Canvas) {
        let Metrics {
            viewport,
            center,
            radius,
            hairline,
            font_size,
            ..
        } = self.metrics;

        canvas.clear(
            Rect::from_min_size(Pos2::ZERO, viewport.size),
            Color32::TRANSPARENT,
        );

        let count = snapshot.entries.len().max(1);
        let max_width = radius * LABEL_WIDTH;

        for index in 0..count {
            let bounds = match geometry::segment_bounds(count, index) {
                Ok(bounds) => bounds,
                Err(_) => continue,
            };
            let visible = bounds.padded(snapshot.padding);
            let fill = snapshot.theme.fill(index);

            self.fill_wedge(canvas, visible.start, visible.end, snapshot.rotation, fill);

            let outline = if index % 2 == 0 {
                Color32::from_black_alpha(15)
            } else {
                Color32::from_black_alpha(8)
            };
            let outline = match snapshot.highlight {
                Some(winner) if winner == index => {
                    Stroke::new(hairline * 3.0, snapshot.theme.label_color(fill))
                }
                _ => Stroke::new(hairline, outline),
            };
            canvas.stroke_path(
                self.wedge_outline(visible.start, visible.end, snapshot.rotation),
                true,
                outline,
            );

            let label = snapshot
                .entries
                .get(index)
                .map(String::as_str)
                .unwrap_or(PLACEHOLDER);

            let anchor = center + direction(bounds.mid() + snapshot.rotation) * radius * LABEL_RADIUS;
            let lines = wrap_label(label, max_width, |s| canvas.measure_text(s, font_size));
            let color = snapshot.theme.label_color(fill);
            let line_height = font_size * LINE_HEIGHT;
            let middle = (lines.len() as f32 - 1.0) / 2.0;

            for (i, line) in lines.iter().enumerate() {
                let pos = anchor + vec2(0.0, (i as f32 - middle) * line_height);
                canvas.fill_text(pos, line, font_size, color);
            }
        }

        canvas.circle(
            center,
            radius * HUB_RADIUS,
            HUB_FILL,
            Stroke::new(hairline, Color32::from_black_alpha(15)),
        );
        canvas.circle(
            center,
            radius + RING_GAP,
            Color32::TRANSPARENT,
            Stroke::new(hairline * 2.0, Color32::from_black_alpha(8)),
        );

        self.paint_pointer(canvas, snapshot.pointer_angle);
    }

    fn fill_wedge(&self, canvas: &mut impl Canvas, start: f64, end: f64, rotation: f64, fill: Color32) {
        let span = end - start;
        let pieces = (span / MAX_PIECE).ceil().max(1.0) as usize;
        let step = span / pieces as f64;

        for piece in 0..pieces {
            let from = start + step * piece as f64;
            let mut points = vec![self.metrics.center];
            points.extend(self.arc(from, from + step, rotation));
            canvas.fill_polygon(points, fill);
        }
    }

    fn wedge_outline(&self, start: f64, end: f64, rotation: f64) -> Vec<Pos2> {
        let mut points = vec![self.metrics.center];
        points.extend(self.arc(start, end, rotation));
        points
    }

    fn arc(&self, start: f64, end: f64, rotation: f64) -> impl Iterator<Item = Pos2> {
        let Metrics { center, radius, .. } = self.metrics;
        let steps = ((end - start) / ARC_STEP).ceil().max(1.0) as usize;
        (0..=steps).map(move |i| {
            let angle = start + (end - start) * i as f64 / steps as f64;
            center + direction(angle + rotation) * radius
        })
    }

    /// A triangle outside the rim pointing at the center.
    fn paint_pointer(&self, canvas: &mut impl Canvas, pointer_angle: f64) {
        let Metrics {
            center,
            radius,
            hairline,
            ..
        } = self.metrics;

        let dir = direction(pointer_angle);
        let across = vec2(-dir.y, dir.x) * 9.0;
        let tip = center + dir * (radius - 6.0);
        let base = center + dir * (radius + RING_GAP + 4.0);

        let points = vec![tip, base + across, base - across];
        canvas.fill_polygon(points.clone(), POINTER_FILL);
        canvas.stroke_path(points, true, Stroke::new(hairline, Color32::WHITE));
    }
}

/// Unit vector for a screen angle in degrees.
pub fn direction(deg: f64) -> Vec2 {
    let rad = deg.to_radians();
    vec2(rad.cos() as f32, rad.sin() as f32)
}

/// Greedy word wrap. A single word wider than `max_width` gets a line of its own
/// and is left as is.
pub fn wrap_label(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = vec![];
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
