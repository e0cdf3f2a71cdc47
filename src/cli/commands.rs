use std::io::{self, Write};

use crate::app::{AppContext, Result, Session};
use crate::presenter::{JsonPresenter, Presenter, TextPresenter};
use crate::store::{FavoritesStore, Store};

pub struct ShowOptions {
    pub page: usize,
    pub search: Option<String>,
    pub favorites: bool,
    pub json: bool,
}

pub async fn show_feed(ctx: &AppContext, url: &str, options: &ShowOptions) -> Result<()> {
    let mut session = ctx.session()?;
    session.load_feed(url).await?;
    apply_show_options(&mut session, options)?;

    let stdout = io::stdout();
    if options.json {
        session.render(&mut JsonPresenter::new(stdout.lock()));
    } else {
        session.render(&mut TextPresenter::new(stdout.lock()));
    }

    Ok(())
}

fn apply_show_options<S: Store>(session: &mut Session<S>, options: &ShowOptions) -> Result<()> {
    if let Some(text) = &options.search {
        session.search(text)?;
    } else if options.favorites {
        session.show_favorites();
    } else {
        for _ in 1..options.page {
            if !session.next_page() {
                break;
            }
        }
    }
    Ok(())
}

pub async fn browse_feed(ctx: &AppContext, url: &str) -> Result<()> {
    let mut session = ctx.session()?;
    let mut presenter = TextPresenter::new(io::stdout());
    let input = tokio::io::BufReader::new(tokio::io::stdin());

    match session.load_feed(url).await {
        Ok(count) => {
            presenter.notify(&format!("Loaded {} entries", count));
            session.render(&mut presenter);
        }
        Err(e) => presenter.notify(&e.to_string()),
    }

    super::browse::run(&mut session, &ctx.config.keybindings, input, &mut presenter).await
}

pub fn list_favorites(ctx: &AppContext) -> Result<()> {
    let favorites = FavoritesStore::load(ctx.store.clone())?;
    let links = favorites.links();

    if links.is_empty() {
        println!("No favorites");
        return Ok(());
    }

    for link in links {
        println!("★ {}", link);
    }

    Ok(())
}

pub fn toggle_favorite(ctx: &AppContext, link: &str) -> Result<()> {
    let mut favorites = FavoritesStore::load(ctx.store.clone())?;
    let is_favorite = favorites.toggle(link)?;

    let mut stdout = io::stdout();
    writeln!(stdout, "{} {}", if is_favorite { "★" } else { "☆" }, link)?;
    Ok(())
}
