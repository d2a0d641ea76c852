use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use gitwiki::{OpenOptions, WikiConfig};

/// Serve a wiki stored in a git repository.
#[derive(Clone, Debug, Parser)]
#[command(name = "gitwiki-server", version, about)]
pub struct Config {
    /// Path to the git repository holding the pages.
    #[arg(long, env = "GITWIKI_REPO")]
    pub repo: PathBuf,

    /// File extension appended to page names in the tree.
    #[arg(long, env = "GITWIKI_EXTENSION", default_value = ".md")]
    pub extension: String,

    /// Page `/` redirects to.
    #[arg(long, env = "GITWIKI_HOMEPAGE", default_value = "Home")]
    pub homepage: String,

    /// Address to listen on.
    #[arg(long, env = "GITWIKI_BIND", default_value = "127.0.0.1:4567")]
    pub bind: SocketAddr,

    /// Commit author name.
    #[arg(long, env = "GITWIKI_AUTHOR")]
    pub author: Option<String>,

    /// Commit author email.
    #[arg(long, env = "GITWIKI_EMAIL")]
    pub email: Option<String>,

    /// Fail instead of initialising a missing repository.
    #[arg(long)]
    pub no_create: bool,
}

impl Config {
    pub fn wiki_config(&self) -> WikiConfig {
        WikiConfig::new(self.extension.clone(), self.homepage.clone())
    }

    pub fn open_options(&self) -> OpenOptions {
        OpenOptions {
            create: !self.no_create,
            author: self.author.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::try_parse_from(["gitwiki-server", "--repo", "/srv/wiki.git"]).unwrap();
        assert_eq!(c.repo, PathBuf::from("/srv/wiki.git"));
        assert_eq!(c.extension, ".md");
        assert_eq!(c.homepage, "Home");
        assert_eq!(c.bind, "127.0.0.1:4567".parse::<SocketAddr>().unwrap());
        assert!(c.open_options().create);
        assert!(c.open_options().author.is_none());
    }

    #[test]
    fn overrides() {
        let c = Config::try_parse_from([
            "gitwiki-server",
            "--repo",
            "w.git",
            "--extension",
            ".txt",
            "--homepage",
            "FrontPage",
            "--bind",
            "0.0.0.0:8080",
            "--author",
            "Alice",
            "--no-create",
        ])
        .unwrap();
        let wiki = c.wiki_config();
        assert_eq!(wiki.extension, ".txt");
        assert_eq!(wiki.homepage, "FrontPage");
        assert_eq!(c.bind.port(), 8080);
        let opts = c.open_options();
        assert!(!opts.create);
        assert_eq!(opts.author.as_deref(), Some("Alice"));
    }

    #[test]
    fn repo_is_required() {
        assert!(Config::try_parse_from(["gitwiki-server"]).is_err());
    }
}
