//! TUI rendering
//!
//! Screen layout, centred on the particle background:
//!
//! ```text
//! ┌ Calculator ────────────────┐ ┌ Tape ─────────┐
//! │ ⊞ Large            ☀ Light │ │ 12 + 8 = 20   │
//! │                     12 + 8 │ │               │
//! │                         20 │ │               │
//! │ [keypad]                   │ │               │
//! └────────────────────────────┘ └───────────────┘
//!  t theme · s size · F9 ± · q quit
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::color;
use super::keypad::KeypadWidget;
use crate::appearance::{Palette, SizePreset};

/// Width of the tape panel, drawn only when it fits
pub const TAPE_WIDTH: u16 = 28;

/// Key help shown on the bottom line
pub const HELP_LINE: &str = " t theme · s size · F9 ± · Esc clear · q quit ";

/// Where every part of the UI goes for a given terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    /// Calculator body including its border
    pub body: Rect,
    /// Size toggle (left half of the toggle row)
    pub size_toggle: Rect,
    /// Theme toggle (right half of the toggle row)
    pub theme_toggle: Rect,
    /// Expression trail and main display
    pub display: Rect,
    /// Keypad grid
    pub keypad: Rect,
    /// Tape history panel
    pub tape: Option<Rect>,
    /// Bottom help line
    pub help: Rect,
}

/// Computes the layout for `area` at a size preset
#[must_use]
pub fn layout(area: Rect, size: SizePreset) -> UiLayout {
    let m = size.metrics();
    let help = Rect {
        y: area.bottom().saturating_sub(1),
        height: area.height.min(1),
        ..area
    };
    let usable = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };

    let body_w = m.keypad_width() + 2;
    let body_h = 1 + m.display_height + m.keypad_height() + 2;
    let with_tape = usable.width >= body_w + 1 + TAPE_WIDTH;
    let total_w = if with_tape {
        body_w + 1 + TAPE_WIDTH
    } else {
        body_w
    };

    let left = usable.x + usable.width.saturating_sub(total_w) / 2;
    let top = usable.y + usable.height.saturating_sub(body_h) / 2;
    let body = Rect::new(left, top, body_w, body_h).intersection(usable);
    let inner = Rect {
        x: body.x + 1,
        y: body.y + 1,
        width: body.width.saturating_sub(2),
        height: body.height.saturating_sub(2),
    };

    let half = inner.width / 2;
    let toggle_row = Rect { height: 1, ..inner }.intersection(inner);
    let size_toggle = Rect {
        width: half,
        ..toggle_row
    };
    let theme_toggle = Rect {
        x: toggle_row.x + half,
        width: toggle_row.width.saturating_sub(half),
        ..toggle_row
    };
    let display = Rect::new(inner.x, inner.y + 1, inner.width, m.display_height).intersection(inner);
    let keypad = Rect::new(
        inner.x,
        inner.y + 1 + m.display_height,
        m.keypad_width(),
        m.keypad_height(),
    )
    .intersection(inner);

    let tape = with_tape
        .then(|| Rect::new(left + body_w + 1, top, TAPE_WIDTH, body_h).intersection(usable));

    UiLayout {
        body,
        size_toggle,
        theme_toggle,
        display,
        keypad,
        tape,
        help,
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn palette(&self) -> &'static Palette {
        self.app.widget().palette()
    }

    /// Fills the background and draws the particles
    fn render_background(&self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette();
        buf.set_style(area, Style::default().bg(color(palette.background)));

        let particle_fg = color(palette.particle);
        for p in self.app.widget().particles().particles() {
            let x = area.x.saturating_add(p.x as u16);
            let y = area.y.saturating_add(p.y as u16);
            if x >= area.right() || y >= area.bottom() {
                continue;
            }
            let symbol = if p.size < 2.0 {
                "·"
            } else if p.size < 3.0 {
                "•"
            } else {
                "●"
            };
            let mut style = Style::default().fg(particle_fg);
            if p.opacity < 0.45 {
                style = style.add_modifier(Modifier::DIM);
            }
            buf[(x, y)].set_symbol(symbol).set_style(style);
        }
    }

    fn render_body(&self, rect: Rect, buf: &mut Buffer) {
        let palette = self.palette();
        Block::default()
            .title(" Calculator ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(palette.operator.fill)))
            .style(Style::default().bg(color(palette.surface)))
            .render(rect, buf);
    }

    fn render_toggles(&self, ui: &UiLayout, buf: &mut Buffer) {
        let widget = self.app.widget();
        let palette = self.palette();
        let style = Style::default()
            .fg(color(palette.expression_text))
            .bg(color(palette.surface));

        let size_label = format!("⊞ {}", widget.size().next().name());
        Paragraph::new(Span::styled(size_label, style)).render(ui.size_toggle, buf);

        let theme_label = if widget.theme().is_dark() {
            "☀ Light"
        } else {
            "☾ Dark"
        };
        Paragraph::new(Span::styled(theme_label, style))
            .alignment(Alignment::Right)
            .render(ui.theme_toggle, buf);
    }

    fn render_display(&self, rect: Rect, buf: &mut Buffer) {
        let widget = self.app.widget();
        let palette = self.palette();
        let surface = color(palette.surface);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(color(palette.number.fill)).bg(surface));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let mut lines: Vec<Line> = (0..inner.height.saturating_sub(2))
            .map(|_| Line::raw(""))
            .collect();
        lines.push(Line::styled(
            widget.expression(),
            Style::default().fg(color(palette.expression_text)).bg(surface),
        ));
        lines.push(Line::styled(
            widget.formatted_display(),
            Style::default()
                .fg(color(palette.display_text))
                .bg(surface)
                .add_modifier(Modifier::BOLD),
        ));

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .render(inner, buf);
    }

    fn render_tape(&self, rect: Rect, buf: &mut Buffer) {
        let palette = self.palette();
        let rows = rect.height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .app
            .widget()
            .history()
            .last_n(rows)
            .into_iter()
            .map(|entry| {
                ListItem::new(Span::styled(
                    entry.display(),
                    Style::default().fg(color(palette.display_text)),
                ))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Tape ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color(palette.function.fill))),
            )
            .style(Style::default().bg(color(palette.surface)))
            .render(rect, buf);
    }

    fn render_help(&self, rect: Rect, buf: &mut Buffer) {
        let palette = self.palette();
        Paragraph::new(Span::styled(
            HELP_LINE,
            Style::default().fg(color(palette.expression_text)),
        ))
        .alignment(Alignment::Center)
        .render(rect, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let widget = self.app.widget();
        let ui = layout(area, widget.size());

        self.render_background(area, buf);
        self.render_body(ui.body, buf);
        self.render_toggles(&ui, buf);
        self.render_display(ui.display, buf);

        KeypadWidget::new(self.app.keypad(), self.palette(), widget.size().metrics())
            .pressed(self.app.pressed())
            .render(ui.keypad, buf);

        if let Some(tape) = ui.tape {
            self.render_tape(tape, buf);
        }
        self.render_help(ui.help, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::Theme;
    use crate::config::WidgetConfig;
    use crate::particles::Bounds;
    use crate::tui::KeyAction;
    use crate::widget::{CalculatorWidget, WidgetAction};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(width, height)).unwrap()
    }

    fn app_without_particles() -> CalculatorApp {
        let config = WidgetConfig::new().with_particles_enabled(false);
        CalculatorApp::with_widget(CalculatorWidget::from_config(&config, Bounds::default()))
    }

    fn draw(app: &CalculatorApp, width: u16, height: u16) -> String {
        let mut terminal = create_test_terminal(width, height);
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn type_keys(app: &mut CalculatorApp, keys: &[&str]) {
        for key in keys {
            app.press_key(key);
        }
    }

    // ===== Layout tests =====

    #[test]
    fn test_layout_fits_normal_in_80x24() {
        let area = Rect::new(0, 0, 80, 24);
        let ui = layout(area, SizePreset::Normal);
        assert_eq!(ui.keypad.width, 32);
        assert_eq!(ui.keypad.height, 15);
        assert_eq!(ui.body.height, 22);
        assert!(ui.tape.is_some());
        assert_eq!(ui.help.y, 23);
    }

    #[test]
    fn test_layout_drops_tape_when_narrow() {
        let ui = layout(Rect::new(0, 0, 40, 24), SizePreset::Normal);
        assert!(ui.tape.is_none());
    }

    #[test]
    fn test_layout_regions_inside_body() {
        for size in SizePreset::ALL {
            let ui = layout(Rect::new(0, 0, 120, 40), size);
            for region in [ui.size_toggle, ui.theme_toggle, ui.display, ui.keypad] {
                assert_eq!(region.intersection(ui.body), region, "{size:?}");
            }
        }
    }

    #[test]
    fn test_layout_tiny_terminal_does_not_overflow() {
        let area = Rect::new(0, 0, 5, 3);
        let ui = layout(area, SizePreset::Large);
        assert!(ui.body.right() <= area.right());
        assert!(ui.body.bottom() <= area.bottom());
        assert!(ui.keypad.is_empty());
    }

    // ===== Render tests =====

    #[test]
    fn test_render_initial_display() {
        let app = app_without_particles();
        let content = draw(&app, 80, 24);
        assert!(content.contains("Calculator"));
        assert!(content.contains('0'));
        assert!(content.contains("AC"));
        assert!(content.contains("q quit"));
    }

    #[test]
    fn test_render_expression_and_result() {
        let mut app = app_without_particles();
        type_keys(&mut app, &["1", "2", "3", "4", "+", "1", "Enter"]);
        let content = draw(&app, 80, 24);
        assert!(content.contains("1,234 + 1 ="));
        assert!(content.contains("1,235"));
    }

    #[test]
    fn test_render_error() {
        let mut app = app_without_particles();
        type_keys(&mut app, &["8", "/", "0", "Enter"]);
        let content = draw(&app, 80, 24);
        assert!(content.contains("Error"));
        assert!(content.contains("8 ÷ 0 ="));
    }

    #[test]
    fn test_render_tape() {
        let mut app = app_without_particles();
        type_keys(&mut app, &["6", "*", "7", "Enter"]);
        let content = draw(&app, 80, 24);
        assert!(content.contains("Tape"));
        assert!(content.contains("6 × 7 = 42"));
    }

    #[test]
    fn test_render_toggle_labels() {
        let mut app = app_without_particles();
        let content = draw(&app, 80, 24);
        assert!(content.contains("Large"));
        assert!(content.contains("Light"));

        app.apply(KeyAction::ToggleTheme);
        let content = draw(&app, 80, 24);
        assert!(content.contains("Dark"));
    }

    #[test]
    fn test_render_background_uses_theme() {
        let mut app = app_without_particles();
        app.widget_mut().handle(WidgetAction::ToggleTheme);
        let mut terminal = create_test_terminal(80, 24);
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let corner = &terminal.backend().buffer()[(0, 0)];
        assert_eq!(corner.bg, color(Theme::Light.palette().background));
    }

    #[test]
    fn test_render_particles() {
        let config = WidgetConfig::new().with_seed(1).with_particle_count(200);
        let app = CalculatorApp::with_widget(CalculatorWidget::from_config(
            &config,
            Bounds::new(80.0, 24.0),
        ));
        let content = draw(&app, 80, 24);
        assert!(content.contains('·') || content.contains('•') || content.contains('●'));
    }

    #[test]
    fn test_render_every_size() {
        let mut app = app_without_particles();
        for _ in SizePreset::ALL {
            app.apply(KeyAction::CycleSize);
            let content = draw(&app, 100, 30);
            assert!(content.contains("DEL"));
        }
    }

    #[test]
    fn test_render_small_terminal() {
        let app = app_without_particles();
        let _ = draw(&app, 20, 10);
    }

    #[test]
    fn test_help_line_mentions_toggles() {
        assert!(HELP_LINE.contains("t theme"));
        assert!(HELP_LINE.contains("s size"));
    }
}
