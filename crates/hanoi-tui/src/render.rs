use crate::animations::particles::hue_to_rgb;
use crate::app::{App, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use hanoi_core::Peg;
use std::io;

/// Width of the info panel to the right of the board
const INFO_WIDTH: u16 = 24;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;

    match app.screen_state {
        ScreenState::Win => render_win_screen(stdout, app, term_width, term_height)?,
        ScreenState::Playing => {
            execute!(stdout, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;
            render_game_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

/// Board geometry for the current disk count
struct Layout {
    x: u16,
    y: u16,
    slot_width: u16,
    /// Rows above the base; one more than the tallest stack so a lifted disk fits
    rod_height: u16,
}

impl Layout {
    fn new(disks: u8, term_width: u16, term_height: u16) -> Self {
        let slot_width = 2 * disks as u16 + 5;
        let rod_height = disks as u16 + 2;
        let total_width = slot_width * 3 + 3 + INFO_WIDTH;
        let x = if term_width > total_width + 1 {
            (term_width - total_width) / 2
        } else {
            1
        };
        let y = if term_height > rod_height + 14 { 3 } else { 2 };
        Self {
            x,
            y,
            slot_width,
            rod_height,
        }
    }

    fn width(&self) -> u16 {
        self.slot_width * 3
    }

    /// Board plus the gap and info panel to its right
    fn total_width(&self) -> u16 {
        self.width() + 3 + INFO_WIDTH
    }

    /// Rows down to the last line of the controls grid
    fn total_height(&self) -> u16 {
        self.base_y() + 8
    }

    fn fits(&self, term_width: u16, term_height: u16) -> bool {
        self.x + self.total_width() <= term_width && self.total_height() <= term_height
    }

    fn center(&self, peg: Peg) -> u16 {
        self.x + self.slot_width * peg.index() as u16 + self.slot_width / 2
    }

    fn base_y(&self) -> u16 {
        self.y + self.rod_height
    }
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let layout = Layout::new(app.game.disk_count(), term_width, term_height);

    if !layout.fits(term_width, term_height) {
        let notice = "Terminal too small - enlarge the window or press '-'";
        execute!(
            stdout,
            MoveTo(0, 0),
            SetForegroundColor(app.theme.error),
            Print(notice)
        )?;
        app.peg_spans = [(0, 0); 3];
        app.board_rows = (0, 0);
        return Ok(());
    }

    for peg in Peg::ALL {
        let start = layout.x + layout.slot_width * peg.index() as u16;
        app.peg_spans[peg.index()] = (start, start + layout.slot_width);
    }
    app.board_rows = (layout.y, layout.base_y() + 3);

    render_title(stdout, app, &layout)?;
    render_pegs(stdout, app, &layout)?;

    let info_x = layout.x + layout.width() + 3;
    render_info_panel(stdout, app, info_x, layout.y)?;

    render_controls(stdout, app, layout.x, layout.base_y() + 4)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_title(stdout: &mut io::Stdout, app: &App, layout: &Layout) -> io::Result<()> {
    let title = "T O W E R   O F   H A N O I";
    let x = (layout.x + layout.width() / 2).saturating_sub(title.len() as u16 / 2);
    execute!(
        stdout,
        MoveTo(x, layout.y.saturating_sub(2)),
        SetForegroundColor(app.theme.key),
        Print(title)
    )
}

fn render_pegs(stdout: &mut io::Stdout, app: &App, layout: &Layout) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let base_y = layout.base_y();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Base
    execute!(
        stdout,
        MoveTo(layout.x, base_y),
        SetForegroundColor(theme.rod),
        Print("═".repeat(layout.width() as usize))
    )?;

    for peg in Peg::ALL {
        let shake = match app.shake {
            Some((shaken, ticks)) if shaken == peg => {
                if ticks % 2 == 0 {
                    1
                } else {
                    -1
                }
            }
            _ => 0,
        };
        let center = (layout.center(peg) as i32 + shake).max(0) as u16;

        // Rod
        for y in (layout.y + 1)..base_y {
            execute!(
                stdout,
                MoveTo(center, y),
                SetForegroundColor(theme.rod),
                Print("┃")
            )?;
        }

        let stack = game.peg(peg);
        let lifted = game.selected_peg() == Some(peg);
        for (level, &disk) in stack.iter().enumerate() {
            let is_top = level + 1 == stack.len();
            let y = if lifted && is_top {
                layout.y
            } else {
                base_y - 1 - level as u16
            };
            render_disk(stdout, app, disk, center, y, lifted && is_top)?;
        }

        // Label and cursor under the base
        let label_color = match app.hint {
            Some(hint) if hint.from == peg || hint.to == peg => theme.hint,
            _ if lifted => theme.selected,
            _ => theme.info,
        };
        execute!(
            stdout,
            MoveTo(layout.center(peg), base_y + 1),
            SetForegroundColor(label_color),
            Print(peg)
        )?;
        if app.cursor == peg {
            execute!(
                stdout,
                MoveTo(layout.center(peg), base_y + 2),
                SetForegroundColor(theme.cursor),
                Print("▲")
            )?;
        }
    }

    if let Some(hint) = app.hint {
        let text = format!("{} → {}", hint.from, hint.to);
        let x = (layout.x + layout.width() / 2).saturating_sub(text.chars().count() as u16 / 2);
        execute!(
            stdout,
            MoveTo(x, base_y + 2),
            SetForegroundColor(theme.hint),
            Print(text)
        )?;
    }

    Ok(())
}

fn render_disk(
    stdout: &mut io::Stdout,
    app: &App,
    disk: u8,
    center: u16,
    y: u16,
    lifted: bool,
) -> io::Result<()> {
    let theme = &app.theme;
    let width = 2 * disk as usize + 1;
    let x = center.saturating_sub(disk as u16);
    let label = format!("{:^width$}", disk, width = width);
    let text_color = if lifted { theme.selected } else { theme.bg };

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.disk_color(disk)),
        SetForegroundColor(text_color),
        Print(label),
        SetBackgroundColor(theme.bg)
    )
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ HANOI ═══")
    )?;

    let rows = [
        format!("Moves:   {:>8}", game.move_count()),
        format!("Minimum: {:>8}", game.min_moves()),
        format!("Disks:   {:>8}", game.disk_count()),
    ];
    for (i, row) in rows.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + 2 + i as u16),
            SetForegroundColor(theme.info),
            Print(row)
        )?;
    }

    let (mode, mode_color) = match app.auto_remaining() {
        Some(left) => (format!("Auto ({} left)", left), theme.hint),
        None => ("Manual".to_string(), theme.fg),
    };
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(theme.info),
        Print("Mode: "),
        SetForegroundColor(mode_color),
        Print(mode)
    )?;

    let selected = game
        .selected_peg()
        .map(|peg| format!("peg {}", peg))
        .unwrap_or_else(|| "-".to_string());
    execute!(
        stdout,
        MoveTo(x, y + 7),
        SetForegroundColor(theme.info),
        Print("Holding: "),
        SetForegroundColor(if game.selected_peg().is_some() {
            theme.selected
        } else {
            theme.fg
        }),
        Print(selected)
    )?;

    if game.check_win() {
        let efficiency = game
            .efficiency()
            .map(|e| format!("{:.0}%", e))
            .unwrap_or_else(|| "-".to_string());
        execute!(
            stdout,
            MoveTo(x, y + 9),
            SetForegroundColor(theme.success),
            Print(format!("Solved! Efficiency {}", efficiency))
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 11),
        SetForegroundColor(theme.info),
        Print(format!("Theme: {}", theme.kind.name()))
    )?;

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("1-3", "Pick peg"),
        ("←/→", "Cursor"),
        ("Space", "Pick cursor"),
        ("Esc", "Drop"),
        ("a", "Auto-solve"),
        ("?", "Hint"),
        ("n/r", "New game"),
        ("+/-", "Disks"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Three columns
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 18;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>6}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.bg),
        SetBackgroundColor(theme.info),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn render_win_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    app.win_screen.resize(term_width, term_height);

    let bg_base = Color::Rgb { r: 8, g: 12, b: 20 };
    execute!(stdout, SetBackgroundColor(bg_base), Clear(ClearType::All))?;

    for particle in app.win_screen.particles() {
        if particle.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(particle.x as u16, particle.y as u16),
                SetForegroundColor(particle.color),
                Print(particle.glyph)
            )?;
        }
    }

    // Banner
    let banner = app.win_screen.banner();
    let lines: Vec<&str> = banner.lines().filter(|l| !l.is_empty()).collect();
    let banner_width = lines.iter().map(|l| l.len()).max().unwrap_or(40) as u16;
    let banner_x = term_width.saturating_sub(banner_width) / 2;
    let banner_y = 3;

    for (i, line) in lines.iter().enumerate() {
        let hue = (app.win_screen.rainbow_offset() + i as f32 * 0.1) % 1.0;
        execute!(
            stdout,
            MoveTo(banner_x, banner_y + i as u16),
            SetForegroundColor(hue_to_rgb(hue)),
            Print(line)
        )?;
    }

    // Message
    let msg = app.win_screen.current_message();
    let msg_x = term_width.saturating_sub(msg.len() as u16) / 2;
    let msg_y = banner_y + lines.len() as u16 + 2;
    let hue = (app.win_screen.rainbow_offset() * 2.0) % 1.0;
    execute!(
        stdout,
        MoveTo(msg_x, msg_y),
        SetForegroundColor(hue_to_rgb(hue)),
        Print(msg)
    )?;

    // Stats box
    let game = &app.game;
    let efficiency = game
        .efficiency()
        .map(|e| format!("{:.0}%", e))
        .unwrap_or_else(|| "-".to_string());
    let stats = format!(
        "Disks: {} | Moves: {} | Minimum: {} | Efficiency: {}",
        game.disk_count(),
        game.move_count(),
        game.min_moves(),
        efficiency
    );
    let stats_x = term_width.saturating_sub(stats.len() as u16 + 2) / 2;
    execute!(
        stdout,
        MoveTo(stats_x, msg_y + 3),
        SetForegroundColor(Color::White),
        SetBackgroundColor(Color::Rgb { r: 30, g: 50, b: 30 }),
        Print(format!(" {} ", stats)),
        SetBackgroundColor(bg_base)
    )?;

    let instr = "Press Enter to play again, Esc to view the tower, or 'q' to quit";
    let instr_x = term_width.saturating_sub(instr.len() as u16) / 2;
    // Slow blink
    let instr_color = if app.win_screen.frame_count() / 20 % 2 == 0 {
        Color::Yellow
    } else {
        Color::DarkYellow
    };
    execute!(
        stdout,
        MoveTo(instr_x, msg_y + 5),
        SetForegroundColor(instr_color),
        Print(instr)
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_largest_disk_in_slot() {
        for disks in 3..=8u8 {
            let layout = Layout::new(disks, 120, 40);
            let widest = 2 * disks as u16 + 1;
            assert!(layout.slot_width > widest);
            // Pegs are evenly spaced left to right
            assert!(layout.center(Peg::Left) < layout.center(Peg::Middle));
            assert_eq!(
                layout.center(Peg::Middle) - layout.center(Peg::Left),
                layout.center(Peg::Right) - layout.center(Peg::Middle)
            );
            assert_eq!(layout.base_y(), layout.y + disks as u16 + 2);
        }
    }

    #[test]
    fn test_layout_in_narrow_terminal() {
        let layout = Layout::new(8, 20, 10);
        assert_eq!(layout.x, 1);
        assert_eq!(layout.y, 2);
        assert!(!layout.fits(20, 10));
    }

    #[test]
    fn test_info_panel_counts_toward_fit() {
        // Board alone is 33 columns wide, the panel needs 27 more
        let layout = Layout::new(3, 40, 40);
        assert!(layout.x + layout.width() + 2 <= 40);
        assert!(!layout.fits(40, 40));

        for disks in 3..=8u8 {
            let layout = Layout::new(disks, 120, 40);
            assert!(layout.fits(120, 40));
            assert!(layout.x + layout.total_width() <= 120);
        }
    }
}
