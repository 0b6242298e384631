//! Command-line argument definitions for the Stencil CLI.
//!
//! [`Args`] is parsed with [`clap`] and selects the model file, the
//! representation to render, where the graphical model is written, the
//! configuration file and the logging verbosity.

use clap::Parser;

use stencil::uml::Representation;

/// Render a UML model into the graphical model of one diagram kind
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON model document
    #[arg(help = "Path to the input model")]
    pub input: String,

    /// Representation to render (class, package, sequence, use-case)
    #[arg(short, long, default_value = "class")]
    pub representation: Representation,

    /// Path to the output graphical model (JSON)
    #[arg(short, long, default_value = "gmodel.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Record the loaded model in the revision timeline next to the output,
    /// with this message
    #[arg(long, value_name = "MESSAGE")]
    pub snapshot: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["stencil", "model.json"]).unwrap();
        assert_eq!(args.input, "model.json");
        assert_eq!(args.representation, Representation::Class);
        assert_eq!(args.output, "gmodel.json");
        assert!(args.config.is_none());
        assert!(args.snapshot.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_representation_flag() {
        let args =
            Args::try_parse_from(["stencil", "model.json", "-r", "use-case", "-o", "out.json"])
                .unwrap();
        assert_eq!(args.representation, Representation::UseCase);
        assert_eq!(args.output, "out.json");

        assert!(Args::try_parse_from(["stencil", "model.json", "-r", "activity"]).is_err());
    }

    #[test]
    fn test_snapshot_flag() {
        let args =
            Args::try_parse_from(["stencil", "model.json", "--snapshot", "before refactor"])
                .unwrap();
        assert_eq!(args.snapshot.as_deref(), Some("before refactor"));
    }
}
