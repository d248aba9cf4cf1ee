mod logging;
mod page;

use std::io;
use std::sync::Arc;
use std::time::Instant;

use constella_config::Config;
use constella_core::ThemeColors;
use constella_field::{FieldCanvas, FieldId, FieldSettings, FrameScheduler, MountPoints, ParticleField};
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
};

use crate::page::Page;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let log_path = logging::init(&config.log_level);
    tracing::info!(?log_path, "starting constella");

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(Into::into)
        .and_then(|()| App::new(config).run(terminal));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange) {
        tracing::warn!(error = %e, "failed to release mouse capture");
    }
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Are frame requests suspended?
    paused: bool,
    config: Config,
    settings: FieldSettings,
    /// Page chrome colors.
    colors: ThemeColors,
    page: Page,
    fields: Vec<ParticleField>,
    scheduler: FrameScheduler,
    /// Field currently under the pointer.
    hovered: Option<FieldId>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let settings = FieldSettings {
            config: Arc::new(config.field.clone()),
            theme: config.theme.clone(),
            freeze_drift: config.motion.freeze_particles(),
        };
        if config.motion.reduced && !settings.freeze_drift {
            tracing::info!("reduced motion requested; particle drift is not gated");
        }

        Self {
            running: false,
            paused: false,
            colors: config.theme.resolve().colors,
            scheduler: FrameScheduler::new(config.frame_interval(), Instant::now()),
            page: Page::layout(Rect::default()),
            fields: Vec::new(),
            hovered: None,
            settings,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.mount_fields(Rect::new(0, 0, size.width, size.height));

        self.running = true;
        while self.running {
            self.advance_frames(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }

        self.teardown();
        Ok(())
    }

    /// Lay out the page and mount a field on every configured section.
    fn mount_fields(&mut self, area: Rect) {
        self.page = Page::layout(area);
        for name in &self.config.mounts {
            if self.fields.iter().any(|f| f.name() == name) {
                tracing::warn!(field = %name, "section listed twice in mounts, ignoring repeat");
                continue;
            }
            let id = FieldId(self.fields.len());
            if let Some(field) =
                ParticleField::mount(id, name, &self.page, &self.settings, &mut self.scheduler)
            {
                self.fields.push(field);
            }
        }
    }

    /// Step every field whose frame request came due.
    fn advance_frames(&mut self, now: Instant) {
        for request in self.scheduler.tick(now) {
            if let Some(field) = self.fields.get_mut(request.owner.0) {
                field.on_frame(request, &mut self.scheduler);
            }
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let colors = self.colors;
        let accent = Color::from(colors.accent);
        let muted = Color::from(colors.text_muted);
        let background = Style::new().bg(Color::from(colors.background));
        frame.render_widget(Block::new().style(background), frame.area());

        let header = Line::from(vec![
            "constella".bold().fg(accent),
            " · drifting points, joined by proximity".fg(muted),
        ]);
        frame.render_widget(Paragraph::new(header).style(background), self.page.header);

        for field in &self.fields {
            if let Some(section) = self.page.section(field.name()) {
                let canvas = FieldCanvas::new(field.canvas(), field.size(), colors.background);
                frame.render_widget(canvas, section.area);
            }
        }

        if let Some(about) = self.page.section("about") {
            let text = Paragraph::new(vec![
                Line::from(""),
                Line::from("Move the pointer across a field to light up the stars near it.")
                    .fg(Color::from(colors.text)),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(text, about.area);
        }

        let pause_label = if self.paused { " resume  " } else { " pause  " };
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".fg(muted),
            "space".bold().fg(accent),
            pause_label.fg(muted),
            "r".bold().fg(accent),
            " reseed".fg(muted),
        ])
        .centered();
        frame.render_widget(help, self.page.help);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.scheduler.time_until_tick(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.on_resize(width, height),
                Event::FocusLost => self.on_pointer_left_page(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('r')) => self.reseed(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.on_pointer(mouse.column, mouse.row)
            }
            _ => {}
        }
    }

    /// Route a pointer position to the field beneath it; every other field
    /// gets a leave.
    fn on_pointer(&mut self, column: u16, row: u16) {
        let mut entered = None;
        for field in &mut self.fields {
            match self.page.local_point(field.name(), column, row) {
                Some(local) => {
                    field.pointer_moved(local);
                    entered = Some(field.id());
                }
                None => field.pointer_left(),
            }
        }

        if entered != self.hovered {
            tracing::trace!(from = ?self.hovered, to = ?entered, "pointer changed field");
            self.hovered = entered;
        }
    }

    fn on_pointer_left_page(&mut self) {
        for field in &mut self.fields {
            field.pointer_left();
        }
        self.hovered = None;
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        self.page = Page::layout(Rect::new(0, 0, width, height));
        let viewport_width = self.page.viewport_width();
        for field in &mut self.fields {
            if let Some(size) = self.page.surface_size(field.name()) {
                field.resize(size, viewport_width);
            }
        }
        tracing::debug!(width, height, "terminal resized");
    }

    /// Regenerate every field's particles at the current size.
    fn reseed(&mut self) {
        let viewport_width = self.page.viewport_width();
        for field in &mut self.fields {
            field.resize(field.size(), viewport_width);
        }
    }

    /// Cancel or re-request every field's frame.
    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        for field in &mut self.fields {
            if self.paused {
                field.stop(&mut self.scheduler);
            } else {
                field.start(&mut self.scheduler);
            }
        }
        tracing::info!(paused = self.paused, "animation toggled");
    }

    /// Cancel every pending frame and drop the fields.
    fn teardown(&mut self) {
        for field in self.fields.drain(..) {
            field.teardown(&mut self.scheduler);
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
