mod cli;
mod menu;

use anyhow::Result;
use std::io;

use crate::db::Database;
use crate::ui::theme::Theme;

pub(crate) use cli::{as_cli, print_usage};

pub(crate) fn as_menu(db: &Database) -> Result<()> {
    let stdin = io::stdin();
    let mut menu = menu::Menu::new(stdin.lock(), io::stdout(), Theme::detect());
    menu.run(db)
}
