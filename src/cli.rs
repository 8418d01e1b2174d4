use clap::{Parser, ValueEnum};

/// Loan refinancing backend: universities proxy, selector options, Plaid link flow.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value_t = default_tracing_format())]
    pub tracing: TracingFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable, colored output
    Pretty,
    /// One JSON object per line
    Json,
}

fn default_tracing_format() -> TracingFormat {
    if cfg!(debug_assertions) {
        TracingFormat::Pretty
    } else {
        TracingFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_flag_parses() {
        let args = Args::try_parse_from(["refi", "--tracing", "json"]).unwrap();
        assert_eq!(args.tracing, TracingFormat::Json);
    }

    #[test]
    fn tracing_flag_rejects_unknown_format() {
        assert!(Args::try_parse_from(["refi", "--tracing", "xml"]).is_err());
    }

    #[test]
    fn args_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
