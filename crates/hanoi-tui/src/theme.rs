use clap::ValueEnum;
use crossterm::style::Color;
use hanoi_core::Disk;

/// Named themes, selectable on the command line and cycled with `t`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl ThemeKind {
    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::HighContrast,
            ThemeKind::HighContrast => ThemeKind::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::HighContrast => "High contrast",
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Rods and base
    pub rod: Color,
    /// Selected peg marker and raised disk outline
    pub selected: Color,
    /// Keyboard cursor under a peg
    pub cursor: Color,
    /// Rejected move flash
    pub error: Color,
    /// Solved / success color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Hint arrow color
    pub hint: Color,
    /// One color per disk size, smallest first
    disks: [Color; 8],
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
            ThemeKind::HighContrast => Self::high_contrast(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            rod: Color::Rgb { r: 130, g: 140, b: 170 },
            selected: Color::Rgb { r: 255, g: 210, b: 100 },
            cursor: Color::Rgb { r: 80, g: 180, b: 255 },
            error: Color::Rgb { r: 255, g: 107, b: 107 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            hint: Color::Rgb { r: 200, g: 140, b: 255 },
            disks: [
                Color::Rgb { r: 255, g: 107, b: 107 },
                Color::Rgb { r: 255, g: 167, b: 38 },
                Color::Rgb { r: 255, g: 221, b: 87 },
                Color::Rgb { r: 102, g: 214, b: 120 },
                Color::Rgb { r: 77, g: 208, b: 225 },
                Color::Rgb { r: 92, g: 140, b: 255 },
                Color::Rgb { r: 171, g: 110, b: 255 },
                Color::Rgb { r: 240, g: 98, b: 186 },
            ],
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            rod: Color::Rgb { r: 60, g: 60, b: 80 },
            selected: Color::Rgb { r: 200, g: 120, b: 20 },
            cursor: Color::Rgb { r: 30, g: 100, b: 200 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            hint: Color::Rgb { r: 130, g: 60, b: 200 },
            disks: [
                Color::Rgb { r: 211, g: 47, b: 47 },
                Color::Rgb { r: 239, g: 108, b: 0 },
                Color::Rgb { r: 190, g: 150, b: 0 },
                Color::Rgb { r: 56, g: 142, b: 60 },
                Color::Rgb { r: 0, g: 131, b: 143 },
                Color::Rgb { r: 48, g: 79, b: 254 },
                Color::Rgb { r: 123, g: 31, b: 162 },
                Color::Rgb { r: 194, g: 24, b: 91 },
            ],
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            kind: ThemeKind::HighContrast,
            bg: Color::Black,
            fg: Color::White,
            rod: Color::White,
            selected: Color::Yellow,
            cursor: Color::Cyan,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
            hint: Color::Magenta,
            disks: [
                Color::Red,
                Color::Yellow,
                Color::Green,
                Color::Cyan,
                Color::Blue,
                Color::Magenta,
                Color::White,
                Color::Grey,
            ],
        }
    }

    /// Color for a disk, cycling if the tower is taller than the palette
    pub fn disk_color(&self, disk: Disk) -> Color {
        let index = (disk.max(1) as usize - 1) % self.disks.len();
        self.disks[index]
    }
}
