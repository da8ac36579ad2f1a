use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2};

/// The drawing operations the wheel needs from a 2D surface.
///
/// Coordinates are logical points relative to the wheel's own top left corner.
pub trait Canvas {
    fn clear(&mut self, rect: Rect, color: Color32);

    /// `points` must describe a convex polygon.
    fn fill_polygon(&mut self, points: Vec<Pos2>, fill: Color32);

    fn stroke_path(&mut self, points: Vec<Pos2>, closed: bool, stroke: Stroke);

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke);

    fn measure_text(&self, text: &str, size: f32) -> f32;

    /// Draws `text` centered on `center`.
    fn fill_text(&mut self, center: Pos2, text: &str, size: f32, color: Color32);
}

/// Paints through an egui [`Painter`], which takes care of the pixels per point.
pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    offset: Vec2,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, offset: Vec2) -> Self {
        Self { painter, offset }
    }

    fn shift(&self, mut points: Vec<Pos2>) -> Vec<Pos2> {
        points.iter_mut().for_each(|p| *p += self.offset);
        points
    }
}

impl<'a> Canvas for PainterCanvas<'a> {
    fn clear(&mut self, rect: Rect, color: Color32) {
        if color == Color32::TRANSPARENT {
            return;
        }
        self.painter
            .rect_filled(rect.translate(self.offset), Rounding::none(), color);
    }

    fn fill_polygon(&mut self, points: Vec<Pos2>, fill: Color32) {
        let points = self.shift(points);
        self.painter
            .add(Shape::convex_polygon(points, fill, Stroke::none()));
    }

    fn stroke_path(&mut self, points: Vec<Pos2>, closed: bool, stroke: Stroke) {
        let points = self.shift(points);
        let shape = if closed {
            Shape::closed_line(points, stroke)
        } else {
            Shape::line(points, stroke)
        };
        self.painter.add(shape);
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke) {
        self.painter
            .circle(center + self.offset, radius, fill, stroke);
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        self.painter
            .layout_no_wrap(text.to_string(), FontId::proportional(size), Color32::WHITE)
            .size()
            .x
    }

    fn fill_text(&mut self, center: Pos2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            center + self.offset,
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
    }
}

/// Remembers every call, text is measured as half an em per char.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear(Rect),
    Polygon(Vec<Pos2>, Color32),
    Path(Vec<Pos2>, bool, Stroke),
    Circle(Pos2, f32, Color32),
    Text(Pos2, String, Color32),
}

#[cfg(test)]
impl Recorder {
    pub fn texts(&self) -> impl Iterator<Item = (&Pos2, &str, &Color32)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Text(pos, text, color) => Some((pos, &**text, color)),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = (&[Pos2], &Color32)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Polygon(points, color) => Some((&**points, color)),
            _ => None,
        })
    }
}

#[cfg(test)]
impl Canvas for Recorder {
    fn clear(&mut self, rect: Rect, _: Color32) {
        self.ops.push(Op::Clear(rect))
    }

    fn fill_polygon(&mut self, points: Vec<Pos2>, fill: Color32) {
        self.ops.push(Op::Polygon(points, fill))
    }

    fn stroke_path(&mut self, points: Vec<Pos2>, closed: bool, stroke: Stroke) {
        self.ops.push(Op::Path(points, closed, stroke))
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, _: Stroke) {
        self.ops.push(Op::Circle(center, radius, fill))
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    fn fill_text(&mut self, center: Pos2, text: &str, _: f32, color: Color32) {
        self.ops.push(Op::Text(center, text.to_string(), color))
    }
}
