//! PDF Export
//!
//! Pure formatting over an already-validated result: one title page (app
//! name, truncated topic, style text) followed by one page per song in
//! result order. The text content is planned first, deterministically, and
//! only then drawn, so the same result always exports the same document.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::constants::pdf::{
    LINE_HEIGHT_MM, MARGIN_MM, MONO_WRAP_COLUMNS, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, TOPIC_TRUNCATE,
    WRAP_COLUMNS,
};
use crate::constants::APP_NAME;
use crate::types::{GenerationRequest, Result, SongSet, VerseError};

/// Exports a song collection as a paginated PDF document.
#[derive(Debug, Default)]
pub struct PdfExporter;

impl PdfExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the document for `songs` (originating from `request`) to `path`.
    pub fn export(&self, request: &GenerationRequest, songs: &SongSet, path: &Path) -> Result<()> {
        let plan = plan_document(request, songs);
        let doc = render(&plan)?;

        let file = File::create(path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| VerseError::Export(e.to_string()))?;

        info!(
            "Exported {} songs to {}",
            plan.song_pages.len(),
            path.display()
        );
        Ok(())
    }
}

// =============================================================================
// Document Plan
// =============================================================================

/// Text layout decided before any drawing happens.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentPlan {
    pub(crate) title_page: TitlePage,
    pub(crate) song_pages: Vec<SongPage>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TitlePage {
    pub(crate) heading: String,
    pub(crate) topic_lines: Vec<String>,
    pub(crate) style_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SongPage {
    pub(crate) heading: String,
    /// Style prompt, wrapped for the monospace block
    pub(crate) style_lines: Vec<String>,
    /// Lyrics wrapped to the page width, original line breaks preserved
    pub(crate) lyric_lines: Vec<String>,
}

pub(crate) fn plan_document(request: &GenerationRequest, songs: &SongSet) -> DocumentPlan {
    let topic = truncate(request.topic.trim(), TOPIC_TRUNCATE);

    DocumentPlan {
        title_page: TitlePage {
            heading: APP_NAME.to_string(),
            topic_lines: wrap(&topic, WRAP_COLUMNS),
            style_lines: wrap(request.style.trim(), WRAP_COLUMNS),
        },
        song_pages: songs
            .iter()
            .enumerate()
            .map(|(index, song)| SongPage {
                heading: format!("{}. {}", index + 1, song.title),
                style_lines: wrap(&song.style_prompt, MONO_WRAP_COLUMNS),
                lyric_lines: song
                    .lyrics
                    .lines()
                    .flat_map(|line| wrap(line, WRAP_COLUMNS))
                    .collect(),
            })
            .collect(),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Greedy word wrap; words longer than the column budget are hard-split.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > columns {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(columns) {
                lines.push(chunk.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current.chars().count() + 1 + word_len
        };

        if needed > columns {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() { vec![String::new()] } else { lines }
}

// =============================================================================
// Rendering
// =============================================================================

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

fn render(plan: &DocumentPlan) -> Result<PdfDocumentReference> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        APP_NAME,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "title",
    );

    let fonts = Fonts {
        regular: builtin(&doc, BuiltinFont::Helvetica)?,
        bold: builtin(&doc, BuiltinFont::HelveticaBold)?,
        mono: builtin(&doc, BuiltinFont::Courier)?,
    };

    draw_title_page(
        &doc.get_page(first_page).get_layer(first_layer),
        &fonts,
        &plan.title_page,
    );

    for song in &plan.song_pages {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "song");
        draw_song_page(&doc.get_page(page).get_layer(layer), &fonts, song);
    }

    Ok(doc)
}

fn builtin(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| VerseError::Export(e.to_string()))
}

fn draw_title_page(layer: &printpdf::PdfLayerReference, fonts: &Fonts, page: &TitlePage) {
    let x = Mm(MARGIN_MM);
    let mut y = PAGE_HEIGHT_MM - 60.0;

    layer.use_text(&page.heading, 32.0, x, Mm(y), &fonts.bold);
    y -= 24.0;

    for line in &page.topic_lines {
        layer.use_text(line, 14.0, x, Mm(y), &fonts.regular);
        y -= LINE_HEIGHT_MM + 1.0;
    }
    y -= 8.0;

    for line in &page.style_lines {
        layer.use_text(line, 12.0, x, Mm(y), &fonts.regular);
        y -= LINE_HEIGHT_MM;
    }
}

fn draw_song_page(layer: &printpdf::PdfLayerReference, fonts: &Fonts, page: &SongPage) {
    let x = Mm(MARGIN_MM);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    layer.use_text(&page.heading, 16.0, x, Mm(y), &fonts.bold);
    y -= 2.0 * LINE_HEIGHT_MM;

    for line in &page.style_lines {
        layer.use_text(line, 10.0, x, Mm(y), &fonts.mono);
        y -= LINE_HEIGHT_MM;
    }
    y -= LINE_HEIGHT_MM;

    // One page per song: lyrics past the bottom margin are clipped.
    for line in &page.lyric_lines {
        if y < MARGIN_MM {
            break;
        }
        layer.use_text(line, 11.0, x, Mm(y), &fonts.regular);
        y -= LINE_HEIGHT_MM;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Song;

    fn songs() -> SongSet {
        SongSet::new(
            (1..=10)
                .map(|n| Song {
                    title: format!("Track {}", n),
                    style_prompt: "Synthwave, 120bpm, Female Vocals".to_string(),
                    lyrics: "[Verse 1]\nNeon rivers on the dash\n[Chorus]\nDrive on".to_string(),
                })
                .collect(),
        )
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("a midnight drive", "synthwave, 120bpm")
    }

    #[test]
    fn test_one_page_per_song_in_result_order() {
        let plan = plan_document(&request(), &songs());

        assert_eq!(plan.song_pages.len(), 10);
        for (index, page) in plan.song_pages.iter().enumerate() {
            assert_eq!(page.heading, format!("{}. Track {}", index + 1, index + 1));
        }
    }

    #[test]
    fn test_export_planning_is_idempotent() {
        let a = plan_document(&request(), &songs());
        let b = plan_document(&request(), &songs());

        assert_eq!(a.song_pages.len(), b.song_pages.len());
        assert_eq!(a.song_pages, b.song_pages);
        assert_eq!(a.title_page, b.title_page);
    }

    #[test]
    fn test_title_page_truncates_topic() {
        let long_topic = "x".repeat(500);
        let request = GenerationRequest::new(long_topic, "ambient");
        let plan = plan_document(&request, &songs());

        let joined = plan.title_page.topic_lines.concat();
        assert!(joined.chars().count() <= TOPIC_TRUNCATE);
        assert!(joined.ends_with('…'));
    }

    #[test]
    fn test_wrap_respects_column_budget() {
        let lines = wrap("one two three four five six seven eight nine ten", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 12);
        }
    }

    #[test]
    fn test_wrap_hard_splits_oversized_words() {
        let lines = wrap(&"y".repeat(30), 10);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_wrap_preserves_empty_lines() {
        assert_eq!(wrap("", 40), vec![String::new()]);
    }

    #[test]
    fn test_lyrics_keep_section_breaks() {
        let plan = plan_document(&request(), &songs());
        let page = &plan.song_pages[0];

        assert!(page.lyric_lines.iter().any(|l| l == "[Verse 1]"));
        assert!(page.lyric_lines.iter().any(|l| l == "[Chorus]"));
    }

    #[test]
    fn test_pdf_renders_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.pdf");

        PdfExporter::new()
            .export(&request(), &songs(), &path)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
