use crossterm::style::Color;
use rand::prelude::SliceRandom;
use rand::Rng;

use super::particles::{hue_to_rgb, EffectType, Particle, DISK_GLYPHS, SPARKLE_GLYPHS};

const WIN_MESSAGES: [&str; 8] = [
    "TOWER COMPLETE!",
    "PUZZLE SOLVED!",
    "WELL STACKED!",
    "MASTER BUILDER!",
    "BRILLIANT!",
    "CONGRATULATIONS!",
    "THE MONKS APPROVE!",
    "ALL DISKS HOME!",
];

const BANNER: &str = r#"
 ____   ___  _ __     __ _____ ____  _
/ ___| / _ \| |\ \   / /| ____|  _ \| |
\___ \| | | | | \ \ / / |  _| | | | | |
 ___) | |_| | |__\ V /  | |___| |_| |_|
|____/ \___/|_____\_/   |_____|____/(_)
"#;

/// Gravity per frame for falling particles
const GRAVITY: f32 = 0.12;

/// The animated win screen
pub struct WinScreen {
    particles: Vec<Particle>,
    effect_type: EffectType,
    frame_count: u32,
    rainbow_offset: f32,
    message_index: usize,
    burst_cooldown: u32,
    pub width: u16,
    pub height: u16,
}

impl WinScreen {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            effect_type: EffectType::random(),
            frame_count: 0,
            rainbow_offset: 0.0,
            message_index: rand::thread_rng().gen_range(0..WIN_MESSAGES.len()),
            burst_cooldown: 0,
            width: 80,
            height: 24,
        }
    }

    /// Fresh celebration with a new effect and message
    pub fn reset(&mut self) {
        self.particles.clear();
        self.frame_count = 0;
        self.rainbow_offset = 0.0;
        self.burst_cooldown = 0;
        self.effect_type = EffectType::random();
        self.message_index = rand::thread_rng().gen_range(0..WIN_MESSAGES.len());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        self.frame_count += 1;
        self.rainbow_offset = (self.rainbow_offset + 0.02) % 1.0;

        if self.frame_count % 240 == 0 {
            self.effect_type = EffectType::random();
        }

        let floor = self.height as f32 + 2.0;
        let gravity = match self.effect_type {
            EffectType::Sparkles => 0.0,
            _ => GRAVITY,
        };
        self.particles.retain_mut(|p| p.advance(gravity, floor));

        match self.effect_type {
            EffectType::DiskRain => self.spawn_disk_rain(),
            EffectType::Fireworks => self.spawn_fireworks(),
            EffectType::Sparkles => self.spawn_sparkles(),
        }
    }

    fn spawn_disk_rain(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..2 {
            let size = rng.gen_range(0..DISK_GLYPHS.len());
            self.particles.push(Particle {
                x: rng.gen_range(0.0..self.width.max(1) as f32),
                y: -1.0,
                vx: 0.0,
                vy: rng.gen_range(0.1..0.4),
                glyph: DISK_GLYPHS[size],
                color: hue_to_rgb(size as f32 / DISK_GLYPHS.len() as f32),
                lifetime: rng.gen_range(4.0..8.0),
            });
        }
    }

    fn spawn_fireworks(&mut self) {
        if self.burst_cooldown > 0 {
            self.burst_cooldown -= 1;
            return;
        }

        let mut rng = rand::thread_rng();
        if self.width < 20 || self.height < 10 || !rng.gen_bool(0.1) {
            return;
        }

        let x = rng.gen_range(8.0..(self.width as f32 - 8.0));
        let y = rng.gen_range(3.0..(self.height as f32 / 2.0));
        let color = hue_to_rgb(rng.gen_range(0.0..1.0));
        for _ in 0..20 {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(0.4..1.6);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed * 0.5,
                glyph: "●",
                color,
                lifetime: rng.gen_range(0.8..2.0),
            });
        }
        self.burst_cooldown = 20;
    }

    fn spawn_sparkles(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..3 {
            self.particles.push(Particle {
                x: rng.gen_range(0.0..self.width.max(1) as f32),
                y: rng.gen_range(0.0..self.height.max(1) as f32),
                vx: 0.0,
                vy: 0.0,
                glyph: SPARKLE_GLYPHS.choose(&mut rng).copied().unwrap_or("*"),
                color: Color::Rgb {
                    r: 255,
                    g: 255,
                    b: rng.gen_range(140..=255),
                },
                lifetime: rng.gen_range(0.3..1.0),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn current_message(&self) -> &str {
        WIN_MESSAGES[self.message_index]
    }

    pub fn banner(&self) -> &'static str {
        BANNER
    }

    pub fn rainbow_offset(&self) -> f32 {
        self.rainbow_offset
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}

impl Default for WinScreen {
    fn default() -> Self {
        Self::new()
    }
}
