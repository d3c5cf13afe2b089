use console::style;

use crate::types::{Song, SongSet};

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Render one song card: display index, title, style prompt, lyrics.
    pub fn song_card(&self, index: usize, song: &Song) {
        self.section(&format!("{}. {}", index + 1, song.title));
        println!("{}", style(&song.style_prompt).cyan());
        println!();
        println!("{}", song.lyrics);
    }

    /// Render the full result list with a summary footer.
    pub fn song_set(&self, songs: &SongSet) {
        for (index, song) in songs.iter().enumerate() {
            self.song_card(index, song);
        }
        println!();
        self.success(&format!("{} tracks generated", songs.len()));
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
