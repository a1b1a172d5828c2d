//! UI rendering helpers for the terminal user interface.
//!
//! Everything here is a pure function of `App` and `UiSettings`; nothing in
//! this module talks to the session.

use image::RgbaImage;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, ListState, Padding, Paragraph, Widget, Wrap},
};

use crate::app::{App, InputMode};
use crate::config::UiSettings;

/// Colour transparent artwork pixels are blended onto.
const BACKDROP: [u8; 3] = [18, 18, 18];

const CONTROLS: [(&str, &str); 8] = [
    ("j/k", "up/down"),
    ("enter", "play selected"),
    ("p", "pause"),
    ("r", "resume"),
    ("s", "stop"),
    ("+/-", "volume"),
    ("o", "open folder"),
    ("q", "quit"),
];

/// Footer line. The resume hint is dimmed until anything has been played.
fn controls_line(resume_enabled: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(CONTROLS.len() * 2);
    for (i, (key, action)) in CONTROLS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        let span = Span::raw(format!("[{key}] {action}"));
        if *key == "r" && !resume_enabled {
            spans.push(span.add_modifier(Modifier::DIM));
        } else {
            spans.push(span);
        }
    }
    Line::from(spans)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Draws an RGBA bitmap with `▀` cells: each cell shows two stacked pixels,
/// the upper one as foreground and the lower one as background.
pub struct ArtworkView<'a> {
    bitmap: &'a RgbaImage,
}

impl<'a> ArtworkView<'a> {
    pub fn new(bitmap: &'a RgbaImage) -> Self {
        Self { bitmap }
    }
}

impl Widget for ArtworkView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = self.bitmap.dimensions();
        // Side of the square we sample, in pixels (a cell is two pixels tall).
        let side = u32::from(area.width).min(u32::from(area.height) * 2);
        if side < 2 || w == 0 || h == 0 {
            return;
        }

        let cols = side as u16;
        let rows = (side / 2) as u16;
        let x0 = area.x + (area.width - cols) / 2;
        let y0 = area.y + (area.height - rows) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let px = u32::from(col) * w / side;
                let top = sample(self.bitmap, px, u32::from(row) * 2 * h / side);
                let bottom = sample(self.bitmap, px, (u32::from(row) * 2 + 1) * h / side);
                if let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) {
                    cell.set_symbol("▀").set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}

/// Nearest-neighbour sample, alpha-blended over [`BACKDROP`].
fn sample(img: &RgbaImage, x: u32, y: u32) -> Color {
    let [r, g, b, a] = img.get_pixel(x.min(img.width() - 1), y.min(img.height() - 1)).0;
    let blend = |c: u8, bg: u8| -> u8 {
        let a = u16::from(a);
        ((u16::from(c) * a + u16::from(bg) * (255 - a)) / 255) as u8
    };
    Color::Rgb(
        blend(r, BACKDROP[0]),
        blend(g, BACKDROP[1]),
        blend(b, BACKDROP[2]),
    )
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" nocturne ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = if ui_settings.show_artwork {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Min(20)])
            .split(chunks[1]);
        draw_artwork(frame, app, cols[0]);
        cols[1]
    } else {
        chunks[1]
    };

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(body);
    draw_now_playing(frame, app, right[0]);
    draw_playlist(frame, app, right[1]);

    let footer = Paragraph::new(controls_line(app.resume_enabled))
        .block(left_padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    if app.mode == InputMode::FolderPrompt {
        draw_folder_prompt(frame, app, chunks[1]);
    }

    // Drawn last so it covers everything else.
    if let Some(msg) = &app.error {
        let area = centered_rect_sized(60, 7, frame.area());
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::LightRed))
            .block(left_padded(" error (any key closes) "))
            .wrap(Wrap { trim: false });
        frame.render_widget(popup, area);
    }
}

fn draw_artwork(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" artwork ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if let Some(bitmap) = &app.artwork {
        frame.render_widget(ArtworkView::new(bitmap), inner);
    }
}

fn draw_now_playing(frame: &mut Frame, app: &App, area: Rect) {
    let block = left_padded(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(inner);

    let text = vec![
        Line::from(app.now_playing_name().to_string()).bold(),
        Line::from(app.status.to_string()),
        Line::from(app.elapsed_text()),
    ];
    frame.render_widget(Paragraph::new(text), rows[0]);

    let gauge = LineGauge::default()
        .filled_style(Style::default().fg(Color::Cyan))
        .unfilled_style(Style::default().fg(Color::DarkGray))
        .label(format!("vol {:>3}%", app.volume))
        .ratio(f64::from(app.volume.min(100)) / 100.0);
    frame.render_widget(gauge, rows[1]);
}

fn draw_playlist(frame: &mut Frame, app: &App, area: Rect) {
    // Keep the selection centred by only building the visible window.
    let total = app.names.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel = app.selected.min(total.saturating_sub(1));
    let (start, end) = if total <= list_height || list_height == 0 {
        (0, total)
    } else {
        let half = list_height / 2;
        let start = sel.saturating_sub(half).min(total - list_height);
        (start, start + list_height)
    };

    let playing = app.track.as_ref().map(|t| t.path.as_path());
    let items: Vec<ListItem> = (start..end)
        .map(|i| {
            let name = app.names[i].as_str();
            if playing == Some(app.entries[i].as_path()) {
                ListItem::new(format!("♪ {name}")).bold()
            } else {
                ListItem::new(format!("  {name}"))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(sel - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_folder_prompt(frame: &mut Frame, app: &App, within: Rect) {
    let area = centered_rect_sized(64, 5, within);
    frame.render_widget(Clear, area);
    let prompt = Paragraph::new(format!("{}_", app.folder_input))
        .block(left_padded(" open folder (enter loads, esc cancels) "));
    frame.render_widget(prompt, area);
}
