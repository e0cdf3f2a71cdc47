use std::io::Write;

use serde::Serialize;

use crate::domain::EntryView;
use crate::view::Filter;

/// Everything a presenter needs to draw one screen.
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub entries: Vec<EntryView>,
    pub page: usize,
    pub page_count: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    #[serde(skip)]
    pub filter: &'a Filter,
}

/// Rendering collaborator. The core never produces markup itself.
pub trait Presenter {
    fn render(&mut self, page: &PageView<'_>);

    /// Single channel for user-visible messages, including load failures.
    fn notify(&mut self, message: &str);
}

/// Writes a numbered plain-text listing.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_page(&mut self, page: &PageView<'_>) -> std::io::Result<()> {
        match page.filter {
            Filter::None => {}
            Filter::Favorites => writeln!(self.out, "Favorites")?,
            Filter::Text(needle) => writeln!(self.out, "Search: {}", needle)?,
        }

        if page.entries.is_empty() {
            writeln!(self.out, "No entries")?;
        }

        for (i, entry) in page.entries.iter().enumerate() {
            let star = if entry.is_favorite { "★" } else { "☆" };
            writeln!(self.out, "{:>3}. {} {}", i + 1, star, entry.title)?;
            writeln!(self.out, "     {}", entry.published)?;
            writeln!(self.out, "     {}", entry.link)?;
        }

        if !page.filter.is_active() {
            writeln!(
                self.out,
                "{} Page {}/{} {}",
                if page.can_go_prev { "<" } else { " " },
                page.page,
                page.page_count,
                if page.can_go_next { ">" } else { " " },
            )?;
        }

        self.out.flush()
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render(&mut self, page: &PageView<'_>) {
        if let Err(e) = self.write_page(page) {
            tracing::error!("Failed to write page: {}", e);
        }
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{}", message) {
            tracing::error!("Failed to write message: {}", e);
        }
    }
}

/// Writes each page as one JSON document per line.
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn render(&mut self, page: &PageView<'_>) {
        let result = serde_json::to_writer(&mut self.out, page)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.out));
        if let Err(e) = result {
            tracing::error!("Failed to write page: {}", e);
        }
    }

    fn notify(&mut self, message: &str) {
        let line = serde_json::json!({ "message": message });
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::error!("Failed to write message: {}", e);
        }
    }
}
