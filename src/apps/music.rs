use crossterm::event::{KeyCode, KeyEvent};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::apps::{app_block, PhoneApp};
use crate::ui::theme::Theme;

pub const TRACKS: [&str; 4] = ["Summer Vibes", "Night Drive", "Chill Lofi", "Electric Dreams"];

const ARTWORK: [&str; 5] = [
    "  ▄▄████▄▄  ",
    " ██▀    ▀██ ",
    " ██  ◉   ██ ",
    " ██▄    ▄██ ",
    "  ▀▀████▀▀  ",
];

pub struct MusicPlayer {
    rng: StdRng,
    playing: bool,
    track: &'static str,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl MusicPlayer {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            playing: false,
            track: TRACKS[0],
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn track(&self) -> &'static str {
        self.track
    }

    /// Starting playback shuffles to a random track; pausing keeps it.
    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        if self.playing {
            self.shuffle();
        }
        debug!("music: playing={} track={}", self.playing, self.track);
    }

    pub fn next(&mut self) {
        self.shuffle();
        debug!("music: next track {}", self.track);
    }

    fn shuffle(&mut self) {
        if let Some(&track) = TRACKS.choose(&mut self.rng) {
            self.track = track;
        }
    }
}

impl PhoneApp for MusicPlayer {
    fn handle_input(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_play(),
            KeyCode::Right => self.next(),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let inner = app_block(frame, area, " Music ", theme);

        let art_color = if self.playing {
            theme.tint(Color::Rgb(200, 120, 255))
        } else {
            theme.muted()
        };
        let mut lines: Vec<Line> = vec![Line::from("")];
        for row in ARTWORK {
            lines.push(Line::from(Span::styled(row, Style::default().fg(art_color))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.track,
            Style::default()
                .fg(theme.text())
                .add_modifier(Modifier::BOLD),
        )));
        let status = if self.playing { "Now playing" } else { "Paused" };
        lines.push(Line::from(Span::styled(status, Style::default().fg(theme.muted()))));
        lines.push(Line::from(""));

        let play = if self.playing { "⏸" } else { "▶" };
        lines.push(Line::from(vec![
            Span::styled("⏮   ", Style::default().fg(theme.muted())),
            Span::styled(
                play,
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   ⏭", Style::default().fg(theme.text())),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "SPACE play/pause │ → next │ Esc home",
            Style::default().fg(theme.muted()),
        )));

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }
}
