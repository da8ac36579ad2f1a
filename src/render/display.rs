use egui::{pos2, vec2, Pos2, Vec2};

/// Whatever the wheel is painted onto reports its size and density here.
pub trait Screen {
    /// Size in logical points.
    fn logical_size(&self) -> Vec2;
    /// Device pixels per logical point.
    fn pixels_per_point(&self) -> f32;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
    pub pixels_per_point: f32,
}

impl Viewport {
    pub const fn new(size: Vec2, pixels_per_point: f32) -> Self {
        Self {
            size,
            pixels_per_point,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(vec2(400.0, 400.0), 1.0)
    }
}

impl Screen for Viewport {
    fn logical_size(&self) -> Vec2 {
        self.size
    }

    fn pixels_per_point(&self) -> f32 {
        self.pixels_per_point
    }
}

/// Everything derived from the screen. Rotation never lives here, so a resize
/// mid-spin only moves the picture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Metrics {
    pub viewport: Viewport,
    /// backing store size in device pixels
    pub device_size: [u32; 2],
    pub center: Pos2,
    pub radius: f32,
    /// one device pixel, in points
    pub hairline: f32,
    pub font_size: f32,
}

impl Metrics {
    pub const MARGIN: f32 = 18.0;
    const MIN_RADIUS: f32 = 1.0;

    pub fn derive(screen: &impl Screen) -> Self {
        let ppp = match screen.pixels_per_point() {
            ppp if ppp.is_finite() && ppp > 0.0 => ppp,
            _ => 1.0,
        };
        let size = screen.logical_size().max(Vec2::ZERO);

        let device_size = [
            ((size.x * ppp).round() as u32).max(1),
            ((size.y * ppp).round() as u32).max(1),
        ];

        let snap = |v: f32| (v * ppp).round() / ppp;
        let center = pos2(snap(size.x / 2.0), snap(size.y / 2.0));
        let radius = (size.x.min(size.y) / 2.0 - Self::MARGIN).max(Self::MIN_RADIUS);

        Self {
            viewport: Viewport::new(size, ppp),
            device_size,
            center,
            radius,
            hairline: 1.0 / ppp,
            font_size: (radius / 8.0).clamp(12.0, 22.0),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::derive(&Viewport::default())
    }
}
