//! Command-line surface for `techlens`.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "techlens", version, about = "TechLens content and configuration tools", long_about = None)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `techlens_client=trace`
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which credentials are configured (never their values)
    Env,
    /// Check Contentful connectivity
    Status {
        /// Also probe every known content type
        #[arg(long)]
        types: bool,
    },
    /// Print an accessor's result as JSON
    Content {
        kind: ContentKind,
        /// Slug for blog, parks and services; identifier for banner
        #[arg(long)]
        slug: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContentKind {
    Homepage,
    Blog,
    Photos,
    Categories,
    Photographer,
    Parks,
    Services,
    Banner,
}

impl ContentKind {
    /// Check `--slug` against what this kind accepts.
    ///
    /// Blog, parks and services take an optional slug, banner requires an
    /// identifier, every other kind rejects it.
    pub fn check_slug(self, slug: Option<&str>) -> Result<(), String> {
        match (self, slug) {
            (ContentKind::Blog | ContentKind::Parks | ContentKind::Services, _) | (ContentKind::Banner, Some(_)) => Ok(()),
            (ContentKind::Banner, None) => Err("banner requires --slug <identifier>".to_string()),
            (kind, Some(_)) => Err(format!("--slug is not supported for {kind:?}")),
            (_, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_content_with_slug() {
        let cli = Cli::try_parse_from(["techlens", "content", "blog", "--slug", "owls"]).unwrap();
        match cli.command {
            Commands::Content { kind, slug } => {
                assert_eq!(kind, ContentKind::Blog);
                assert_eq!(slug.as_deref(), Some("owls"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_slug_scope() {
        assert!(ContentKind::Blog.check_slug(Some("owls")).is_ok());
        assert!(ContentKind::Parks.check_slug(None).is_ok());
        assert!(ContentKind::Banner.check_slug(Some("about")).is_ok());
        assert!(ContentKind::Banner.check_slug(None).is_err());
        assert!(ContentKind::Homepage.check_slug(None).is_ok());

        for kind in [ContentKind::Homepage, ContentKind::Photos, ContentKind::Categories, ContentKind::Photographer] {
            let err = kind.check_slug(Some("x")).unwrap_err();
            assert!(err.contains("--slug"), "{kind:?}");
        }
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from(["techlens", "status", "--types"]).unwrap();
        assert!(matches!(cli.command, Commands::Status { types: true }));
    }
}
