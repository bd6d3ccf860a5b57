//! Book files
//!
//! A book file is TOML that lists the games of a book and its options:
//!
//! ```toml
//! title = "Famous Games"
//!
//! [[games]]
//! alias = "ear-reddening"
//! path = "games/shusaku-gennan.sgf"
//!
//! [spec]
//! position_type = "GAME_COMMENTARY"
//!
//! [diagram]
//! diagramType = "GNOS"
//! ```
//!
//! Game paths are relative to the book file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::config::{ConfigError, SpecDefaults};
use crate::domain::{BookOptions, DiagramOptions, GameSource, SpecOptions, TemplateOptions};

/// A game listed in a book file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntry {
    /// Defaults to `sgf-{n}` by position in the list
    #[serde(default)]
    pub alias: Option<String>,

    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BookConfig {
    /// Title of the root grouping
    pub title: Option<String>,

    pub games: Vec<GameEntry>,

    /// Spec option overrides for this book
    pub spec: SpecDefaults,

    pub diagram: DiagramOptions,

    pub template: TemplateOptions,
}

impl BookConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let book: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if book.games.is_empty() {
            return Err(ConfigError::Invalid("a book needs at least one game".to_string()));
        }
        book.spec.validate()?;
        Ok(book)
    }

    /// Reads a book file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read book file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse book file: {}", path.display()))
    }

    /// Reads every game and builds the options for [`crate::domain::Spec::create`].
    ///
    /// `base` is the directory game paths are relative to; `defaults` are
    /// the spec options before this book's overrides.
    pub fn into_book_options(self, base: &Path, defaults: SpecOptions) -> Result<BookOptions> {
        let mut games = Vec::with_capacity(self.games.len());
        for entry in &self.games {
            let path = base.join(&entry.path);
            let sgf = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read SGF file: {}", path.display()))?;
            games.push(GameSource {
                alias: entry.alias.clone(),
                sgf,
            });
        }

        let mut spec_options = defaults;
        self.spec.apply(&mut spec_options);

        Ok(BookOptions {
            games,
            grouping_title: self.title,
            position_type: self.spec.position_type,
            spec_options,
            diagram_options: self.diagram,
            template_options: self.template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiagramType, IdGenType, PositionType};
    use tempfile::TempDir;

    const BOOK: &str = r#"
title = "Famous Games"

[[games]]
alias = "ear-reddening"
path = "games/shusaku.sgf"

[[games]]
path = "other.sgf"

[spec]
position_type = "GAME_COMMENTARY"

[diagram]
diagramType = "GNOS"
fontSize = 12

[template]
title = "Famous Games"
authors = ["Anon"]
"#;

    #[test]
    fn parse_book() {
        let book = BookConfig::parse(BOOK).unwrap();
        assert_eq!(book.title.as_deref(), Some("Famous Games"));
        assert_eq!(book.games.len(), 2);
        assert_eq!(book.games[0].alias.as_deref(), Some("ear-reddening"));
        assert_eq!(book.games[1].alias, None);
        assert_eq!(book.spec.position_type, Some(PositionType::GameCommentary));
        assert_eq!(book.diagram.diagram_type, Some(DiagramType::Gnos));
        assert_eq!(book.diagram.extra["fontSize"], 12);
        assert_eq!(book.template.authors, vec!["Anon"]);
    }

    #[test]
    fn book_needs_games() {
        assert!(matches!(
            BookConfig::parse("title = \"Empty\""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn reads_games_relative_to_base() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("games")).unwrap();
        fs::write(dir.path().join("games/shusaku.sgf"), "(;GM[1]C[hi])").unwrap();
        fs::write(dir.path().join("other.sgf"), "(;GM[1])").unwrap();

        let defaults = SpecOptions {
            id_gen_type: IdGenType::Path,
            ..Default::default()
        };
        let options = BookConfig::parse(BOOK)
            .unwrap()
            .into_book_options(dir.path(), defaults)
            .unwrap();

        assert_eq!(options.games[0].sgf, "(;GM[1]C[hi])");
        assert_eq!(options.grouping_title.as_deref(), Some("Famous Games"));
        assert_eq!(options.position_type, Some(PositionType::GameCommentary));
        assert_eq!(options.spec_options.id_gen_type, IdGenType::Path);
    }

    #[test]
    fn missing_game_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let err = BookConfig::parse(BOOK)
            .unwrap()
            .into_book_options(dir.path(), SpecOptions::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("shusaku.sgf"));
    }
}
