//! Line-driven interactive loop over a [`Session`].

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app::{Result, Session};
use crate::config::KeybindingConfig;
use crate::domain::entry::NO_LINK;
use crate::presenter::Presenter;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    Search(String),
    ShowFavorites,
    ShowAll,
    Reload,
    /// 1-based position in the current listing.
    ToggleStar(usize),
    /// 1-based position in the current listing.
    OpenInBrowser(usize),
    Load(String),
    Help,
    Invalid(String),
    None,
}

/// Read commands from `input` until `quit` or end of input.
///
/// Load, search and toggle failures are reported through the presenter and
/// never end the loop.
pub async fn run<R, S>(
    session: &mut Session<S>,
    keybindings: &KeybindingConfig,
    input: R,
    presenter: &mut dyn Presenter,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: Store,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let action = keybindings.get_action(&line);
        if action == Action::Quit {
            break;
        }
        handle_action(session, keybindings, action, presenter).await;
    }

    Ok(())
}

async fn handle_action<S: Store>(
    session: &mut Session<S>,
    keybindings: &KeybindingConfig,
    action: Action,
    presenter: &mut dyn Presenter,
) {
    match action {
        Action::Quit | Action::None => {}
        Action::NextPage => {
            if session.next_page() {
                session.render(presenter);
            }
        }
        Action::PrevPage => {
            if session.prev_page() {
                session.render(presenter);
            }
        }
        Action::Search(text) => match session.search(&text) {
            Ok(()) => session.render(presenter),
            Err(e) => presenter.notify(&e.to_string()),
        },
        Action::ShowFavorites => {
            session.show_favorites();
            session.render(presenter);
        }
        Action::ShowAll => {
            session.show_all();
            session.render(presenter);
        }
        Action::Reload => match session.reload().await {
            Ok(count) => {
                presenter.notify(&format!("Loaded {} entries", count));
                session.render(presenter);
            }
            Err(e) => presenter.notify(&e.to_string()),
        },
        Action::Load(url) => match session.load_feed(&url).await {
            Ok(count) => {
                presenter.notify(&format!("Loaded {} entries", count));
                session.render(presenter);
            }
            Err(e) => presenter.notify(&e.to_string()),
        },
        Action::ToggleStar(position) => {
            let Some(entry) = session.entry_at(position) else {
                presenter.notify(&format!("No entry {}", position));
                return;
            };
            match session.toggle_favorite(&entry.link) {
                Ok(true) => presenter.notify(&format!("★ {}", entry.title)),
                Ok(false) => presenter.notify(&format!("☆ {}", entry.title)),
                Err(e) => presenter.notify(&e.to_string()),
            }
        }
        Action::OpenInBrowser(position) => match session.entry_at(position) {
            Some(entry) if entry.link != NO_LINK => {
                if let Err(e) = open::that(&entry.link) {
                    presenter.notify(&format!("Failed to open {}: {}", entry.link, e));
                }
            }
            Some(_) => presenter.notify(&format!("Entry {} has no link", position)),
            None => presenter.notify(&format!("No entry {}", position)),
        },
        Action::Help => presenter.notify(&help_text(keybindings)),
        Action::Invalid(line) => {
            presenter.notify(&format!("Unknown command: {} (try {})", line, first(&keybindings.help)))
        }
    }
}

fn first(words: &[String]) -> &str {
    words.first().map(String::as_str).unwrap_or("?")
}

fn help_text(keybindings: &KeybindingConfig) -> String {
    let rows = [
        (&keybindings.next_page, "", "next page"),
        (&keybindings.prev_page, "", "previous page"),
        (&keybindings.search, " <text>", "search titles and summaries"),
        (&keybindings.show_favorites, "", "show favorites"),
        (&keybindings.show_all, "", "show all entries"),
        (&keybindings.reload, "", "fetch the feed again"),
        (&keybindings.toggle_star, " <n>", "star or unstar entry n"),
        (&keybindings.open_in_browser, " <n>", "open entry n in the browser"),
        (&keybindings.load, " <url>", "load another feed"),
        (&keybindings.quit, "", "quit"),
    ];

    rows.iter()
        .map(|(words, arg, what)| format!("  {}{:<8} {}", words.join("|"), arg, what))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::TributaryError;
    use crate::fetcher::testing::ScriptedFetcher;
    use crate::fetcher::{Envelope, FetchRetriever, Route};
    use crate::presenter::PageView;
    use crate::store::{FavoritesStore, SqliteStore};

    #[derive(Default)]
    struct RecordingPresenter {
        pages: Vec<(usize, Vec<String>)>,
        messages: Vec<String>,
    }

    impl Presenter for RecordingPresenter {
        fn render(&mut self, page: &PageView<'_>) {
            let titles = page.entries.iter().map(|e| e.title.clone()).collect();
            self.pages.push((page.page, titles));
        }

        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn feed(n: usize) -> Vec<u8> {
        let items: String = (0..n)
            .map(|i| {
                format!(
                    "<item><title>Item {}</title><link>https://example.com/{}</link></item>",
                    i, i
                )
            })
            .collect();
        format!("<rss><channel><title>T</title>{}</channel></rss>", items).into_bytes()
    }

    fn session(fetcher: Arc<ScriptedFetcher>) -> Session<SqliteStore> {
        let retriever = FetchRetriever::new(
            fetcher,
            vec![Route::new("only", "https://proxy.test/?u={url}", Envelope::Raw)],
        );
        let favorites = FavoritesStore::load(Arc::new(SqliteStore::in_memory().unwrap())).unwrap();
        Session::new(retriever, favorites)
    }

    async fn drive(session: &mut Session<SqliteStore>, script: &str) -> RecordingPresenter {
        let mut presenter = RecordingPresenter::default();
        run(
            session,
            &KeybindingConfig::default(),
            script.as_bytes(),
            &mut presenter,
        )
        .await
        .unwrap();
        presenter
    }

    #[tokio::test]
    async fn test_paging_and_search_commands() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(feed(15))]));
        let mut session = session(fetcher);
        session.load_feed("https://example.com/rss").await.unwrap();

        let presenter = drive(&mut session, "n\nn\ns item 1\nq\nn\n").await;

        // Second `n` is a no-op; input after `q` is never read.
        assert_eq!(presenter.pages.len(), 2);
        assert_eq!(presenter.pages[0].0, 2);
        assert_eq!(presenter.pages[0].1.len(), 5);
        // "Item 1" and "Item 10".."Item 14"
        assert_eq!(presenter.pages[1].1.len(), 6);
        assert_eq!(session.view().page_label(), 1);
    }

    #[tokio::test]
    async fn test_toggle_then_favorites_view() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(feed(3))]));
        let mut session = session(fetcher);
        session.load_feed("https://example.com/rss").await.unwrap();

        let presenter = drive(&mut session, "t 2\nf\nt 9\n").await;

        assert_eq!(presenter.messages[0], "★ Item 1");
        assert_eq!(presenter.pages[0].1, vec!["Item 1".to_string()]);
        assert_eq!(presenter.messages[1], "No entry 9");
        assert!(session.favorites().is_favorite("https://example.com/1"));
    }

    #[tokio::test]
    async fn test_failures_are_notified_not_fatal() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(feed(3))]));
        let mut session = session(fetcher.clone());
        session.load_feed("https://example.com/rss").await.unwrap();
        fetcher.push(Ok(b"<html><title>x</title></html>".to_vec()));

        let presenter = drive(&mut session, "s\nl https://example.com/bad\nbogus\na\n").await;

        assert_eq!(
            presenter.messages[0],
            TributaryError::EmptyInput("enter text to search for").to_string()
        );
        assert_eq!(presenter.messages[1], TributaryError::InvalidFeedFormat.to_string());
        assert!(presenter.messages[2].starts_with("Unknown command: bogus"));
        assert_eq!(presenter.pages.len(), 1);
        assert_eq!(presenter.pages[0].1.len(), 3);
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text(&KeybindingConfig::default());
        assert!(help.contains("n|next"));
        assert!(help.contains("o|open <n>"));
        assert_eq!(help.lines().count(), 10);
    }
}
