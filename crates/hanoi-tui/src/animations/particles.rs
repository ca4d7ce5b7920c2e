use crossterm::style::Color;
use rand::Rng;

/// A single particle in the celebration
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub glyph: &'static str,
    pub color: Color,
    pub lifetime: f32,
}

impl Particle {
    pub fn is_visible(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0
            && self.x + (self.glyph.chars().count() as f32) < width as f32
            && self.y >= 0.0
            && self.y < height as f32
            && self.lifetime > 0.0
    }

    /// Advance one frame; false once the particle is spent
    pub fn advance(&mut self, gravity: f32, floor: f32) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += gravity;
        self.lifetime -= 0.016;
        self.lifetime > 0.0 && self.y < floor
    }
}

/// Effect types for the win screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectType {
    /// Little disks raining down
    DiskRain,
    /// Bursts from random points
    Fireworks,
    /// Twinkling points that barely move
    Sparkles,
}

impl EffectType {
    pub fn random() -> Self {
        match rand::thread_rng().gen_range(0..3) {
            0 => EffectType::DiskRain,
            1 => EffectType::Fireworks,
            _ => EffectType::Sparkles,
        }
    }
}

/// Falling disk glyphs, narrowest first
pub const DISK_GLYPHS: &[&str] = &["▬", "▬▬", "▬▬▬", "▬▬▬▬"];

pub const SPARKLE_GLYPHS: &[&str] = &["*", "✦", "✧", "★", "☆", "·"];

/// Convert hue (0.0-1.0) to a fully saturated RGB color
pub fn hue_to_rgb(hue: f32) -> Color {
    let h = hue.rem_euclid(1.0) * 6.0;
    let rising = ((h % 1.0) * 255.0) as u8;
    let falling = 255 - rising;

    let (r, g, b) = match h as u8 {
        0 => (255, rising, 0),
        1 => (falling, 255, 0),
        2 => (0, 255, rising),
        3 => (0, falling, 255),
        4 => (rising, 0, 255),
        _ => (255, 0, falling),
    };

    Color::Rgb { r, g, b }
}
