// Command-line interface parsing.
// Maps flags onto the cache configuration and the lookup to perform.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{Config, PartitionScan};
use crate::rainforest::{Binding, IdKind};

/// Cached Amazon product lookups via the Rainforest API
#[derive(Parser, Debug)]
#[command(name = "asin-cache")]
#[command(version)]
pub struct Cli {
    /// Cache root directory (defaults to the platform cache dir)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Load every month partition instead of only the current one
    #[arg(long, global = true)]
    pub all_partitions: bool,

    /// Remember ASINs that upstream reports as missing
    #[arg(long, global = true)]
    pub mark_missing_asin: bool,

    /// Do not remember GTINs that upstream reports as missing
    #[arg(long, global = true)]
    pub no_mark_missing_gtin: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up products by ASIN
    Asin {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Look up products by GTIN (ISBN, UPC, EAN)
    Gtin {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print the first variant of a product matching the given titles
    Variant {
        asin: String,
        /// Candidate variant titles, tried in order
        #[arg(long = "title")]
        titles: Vec<String>,
        /// Use a binding group's titles instead of explicit ones
        #[arg(long, value_parser = parse_binding, conflicts_with = "titles")]
        binding: Option<Binding>,
    },
    /// Drop any cached entry and fetch again from upstream
    Refetch {
        #[arg(value_enum)]
        kind: KindArg,
        id: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Asin,
    Gtin,
}

impl From<KindArg> for IdKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Asin => IdKind::Asin,
            KindArg::Gtin => IdKind::Gtin,
        }
    }
}

fn parse_binding(s: &str) -> Result<Binding, String> {
    s.parse()
}

impl Cli {
    /// Apply command-line overrides on top of an environment-derived config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if self.all_partitions {
            config.partition_scan = PartitionScan::All;
        }
        if self.mark_missing_asin {
            config.missing_policy.asin = true;
        }
        if self.no_mark_missing_gtin {
            config.missing_policy.gtin = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_asin_ids() {
        let cli = Cli::parse_from(["asin-cache", "asin", "B000AAAA", "B000BBBB"]);
        match cli.command {
            Command::Asin { ids } => assert_eq!(ids, vec!["B000AAAA", "B000BBBB"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_requires_ids() {
        assert!(Cli::try_parse_from(["asin-cache", "gtin"]).is_err());
    }

    #[test]
    fn test_cli_variant_titles() {
        let cli = Cli::parse_from([
            "asin-cache",
            "variant",
            "B000TEST",
            "--title",
            "Kindle",
            "--title",
            "Paperback",
        ]);
        match cli.command {
            Command::Variant {
                asin,
                titles,
                binding,
            } => {
                assert_eq!(asin, "B000TEST");
                assert_eq!(titles, vec!["Kindle", "Paperback"]);
                assert!(binding.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_variant_binding() {
        let cli = Cli::parse_from(["asin-cache", "variant", "B000TEST", "--binding", "hardcover"]);
        match cli.command {
            Command::Variant { binding, .. } => assert_eq!(binding, Some(Binding::Hardcover)),
            other => panic!("unexpected command: {:?}", other),
        }

        let err = Cli::try_parse_from(["asin-cache", "variant", "B000TEST", "--binding", "scroll"])
            .unwrap_err();
        assert!(err.to_string().contains("Invalid binding"));
    }

    #[test]
    fn test_cli_refetch() {
        let cli = Cli::parse_from(["asin-cache", "refetch", "gtin", "9780000000002"]);
        match cli.command {
            Command::Refetch { kind, id } => {
                assert_eq!(IdKind::from(kind), IdKind::Gtin);
                assert_eq!(id, "9780000000002");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "asin-cache",
            "--root",
            "/tmp/amazon",
            "--all-partitions",
            "--mark-missing-asin",
            "--no-mark-missing-gtin",
            "asin",
            "B000TEST",
        ]);
        let mut config = Config::new(PathBuf::from("/elsewhere"), "key");
        cli.apply(&mut config);

        assert_eq!(config.root, PathBuf::from("/tmp/amazon"));
        assert_eq!(config.partition_scan, PartitionScan::All);
        assert!(config.missing_policy.asin);
        assert!(!config.missing_policy.gtin);
    }
}
