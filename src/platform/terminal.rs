use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui::Terminal;

use super::{FrameBuffer, InputEvent, Platform, Rgb};

pub struct TerminalPlatform {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    frame: FrameBuffer,
    title: String,
    started: Instant,
}

impl TerminalPlatform {
    /// Enter raw mode and the alternate screen, with a `width` x `height` pixel surface
    pub fn new(title: &str, width: u32, height: u32) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        log::info!("Terminal opened for {title} ({width}x{height} px)");

        Ok(Self {
            terminal,
            frame: FrameBuffer::new(width, height),
            title: format!(" {title} "),
            started: Instant::now(),
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!("Failed to restore terminal: {err}");
        }
        log::info!("Terminal closed");
    }
}

/// Map a key press onto the game's input vocabulary
fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Quit);
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Char(' ') | KeyCode::Up => Some(InputEvent::Jump),
        _ => None,
    }
}

#[inline]
fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Fold pixel rows pairwise into styled half-block cells, then lay text over them
fn frame_lines(fb: &FrameBuffer) -> Vec<Line<'static>> {
    let rows: Vec<&[Rgb]> = fb.rows().collect();
    let mut grid: Vec<Vec<(char, Style)>> = rows
        .chunks(2)
        .map(|pair| {
            let top = pair[0];
            let bottom = pair.get(1).copied().unwrap_or(top);
            top.iter()
                .zip(bottom)
                .map(|(t, b)| ('▀', Style::default().fg(color(*t)).bg(color(*b))))
                .collect()
        })
        .collect();

    for item in fb.texts() {
        if item.y < 0 {
            continue;
        }
        let row = item.y as usize / 2;
        let Some(cells) = grid.get_mut(row) else { continue };
        for (i, ch) in item.text.chars().enumerate() {
            let x = item.x + i as i32;
            if x < 0 {
                continue;
            }
            let Some(cell) = cells.get_mut(x as usize) else { break };
            let bg = cell.1.bg.unwrap_or(Color::Reset);
            *cell = (
                ch,
                Style::default()
                    .fg(color(item.color))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

impl Platform for TerminalPlatform {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    events.push(input);
                }
            }
        }
        Ok(events)
    }

    fn frame(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    fn present(&mut self) -> io::Result<()> {
        let lines = frame_lines(&self.frame);
        let width = self.frame.width() as u16 + 2;
        let height = lines.len() as u16 + 2;
        let title = self.title.clone();

        self.terminal.draw(|frame| {
            let screen = frame.area();
            let area = Rect::new(
                screen.x,
                screen.y,
                width.min(screen.width),
                height.min(screen.height),
            );
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(180, 100, 220)))
                .title(title)
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(200, 120, 255))
                        .add_modifier(Modifier::BOLD),
                );
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new(lines), inner);
        })?;
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(press(KeyCode::Enter)), Some(InputEvent::Confirm));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(InputEvent::Jump));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_frame_lines_pairs_rows_and_overlays_text() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_pixel(0, 0, Rgb::WHITE);
        fb.set_pixel(0, 1, Rgb(10, 20, 30));
        fb.draw_text("Hi", 1, 1, Rgb(255, 0, 0));

        let lines = frame_lines(&fb);
        // 3 pixel rows -> 2 cell rows
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 4);

        let first = &lines[0].spans[0];
        assert_eq!(first.content, "▀");
        assert_eq!(first.style.fg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(first.style.bg, Some(Color::Rgb(10, 20, 30)));

        assert_eq!(lines[0].spans[1].content, "H");
        assert_eq!(lines[0].spans[2].content, "i");
        assert_eq!(lines[0].spans[1].style.fg, Some(Color::Rgb(255, 0, 0)));
    }
}
