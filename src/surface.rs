/// Render surface contract shared by the simulation and the renderers.
///
/// Coordinates are surface-local pixels with y growing downward.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ENEMY_BLUE: Color = Color::rgb(0x21, 0x96, 0xf3);
    pub const ENEMY_YELLOW: Color = Color::rgb(0xff, 0xe6, 0x00);
    pub const PLAYER_CYAN: Color = Color::rgb(0x00, 0xea, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hue in degrees, saturation and lightness in percent
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_byte(r), to_byte(g), to_byte(b))
    }

    /// Linear blend between two colors, `t` in [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Color composited over a black background at the given opacity
    pub fn faded(self, alpha: f32) -> Self {
        Color::rgb(0, 0, 0).lerp(self, alpha)
    }
}

/// Glow drawn around a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f32,
    pub shadow: Option<Shadow>,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            alpha: 1.0,
            shadow: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Bug,
}

/// A rotated glyph centered on (x, y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub sprite: Sprite,
    pub x: f32,
    pub y: f32,
    /// Radians, 0 points up, positive turns clockwise on screen
    pub rotation: f32,
    pub size: f32,
    pub paint: Paint,
}

pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, paint: Paint);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: Paint);
    fn fill_glyph(&mut self, glyph: &Glyph);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        paint: Paint,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        paint: Paint,
    },
    Glyph(Glyph),
}

/// Records draw calls so a frame can be replayed by a renderer later
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            paint,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: Paint) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            paint,
        });
    }

    fn fill_glyph(&mut self, glyph: &Glyph) {
        self.commands.push(DrawCommand::Glyph(*glyph));
    }
}

/// Surface that discards everything, for headless stepping
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn fill_circle(&mut self, _x: f32, _y: f32, _radius: f32, _paint: Paint) {}
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _paint: Paint) {}
    fn fill_glyph(&mut self, _glyph: &Glyph) {}
}
